use tracing::warn;

use super::*;
use crate::ast::INHERIT_KEY;

pub(super) fn transform_document(parser: &mut Parser) -> Result<String, JscError> {
    match parser.peek() {
        Some(Token::Eof) => parser.emit("{}"),
        Some(Token::LBrace) => value::transform_object(parser, &[])?,
        Some(Token::LBracket) => value::transform_array(parser)?,
        _ => {
            // Braces around the root object are optional
            parser.emit("{");
            transform_members(parser, None)?;
            parser.emit("}");
        }
    }

    match parser.peek() {
        Some(Token::Eof) => Ok(std::mem::take(&mut parser.out)),
        _ => Err(parser.unexpected("end of document", 204)),
    }
}

/// Transform `key: value` members up to the closing `}`.
///
/// `open` is the position of the opening brace; `None` means the body runs
/// to the end of input.
pub(super) fn transform_members(
    parser: &mut Parser,
    open: Option<(usize, usize)>,
) -> Result<(), JscError> {
    loop {
        match (parser.peek(), open) {
            (Some(Token::RBrace), Some(_)) => {
                parser.bump()?;
                return Ok(());
            }
            (Some(Token::Eof), None) => return Ok(()),
            (Some(Token::Eof), Some((line, column))) => {
                return Err(JscError::SyntaxError {
                    message: "Object is never closed".into(),
                    line,
                    column,
                    hint: Some("Add the missing '}'".into()),
                    code: Some(205),
                });
            }
            _ => {}
        }

        transform_member(parser)?;

        match parser.peek() {
            Some(Token::Comma) => {
                parser.bump()?;
                parser.emit(",");
            }
            Some(Token::RBrace) | Some(Token::Eof) => {}
            _ => return Err(parser.unexpected("',' or '}'", 206)),
        }
    }
}

fn transform_member(parser: &mut Parser) -> Result<(), JscError> {
    let key = match parser.peek() {
        Some(Token::String(_)) | Some(Token::Word(_)) => parser.bump()?,
        _ => return Err(parser.unexpected("key", 207)),
    };

    if parser.peek() != Some(&Token::Colon) {
        return Err(parser.unexpected("':' after key", 208));
    }
    parser.bump()?;

    let value_is_object = parser.peek() == Some(&Token::LBrace);

    // Quoted keys are taken literally; only bare keys carry annotations
    let (name, parents) = match key {
        Token::Word(word) => {
            let (name, parents) = split_inheritance(&word);
            parser.emit(&quote(&name));
            (name, parents)
        }
        Token::String(raw) => {
            parser.emit(&raw);
            (raw, Vec::new())
        }
        _ => unreachable!(),
    };
    parser.emit(":");

    if value_is_object {
        value::transform_object(parser, &parents)
    } else {
        if !parents.is_empty() {
            warn!(
                key = %name,
                parents = ?parents,
                "inheritance annotation on a non-object value is ignored"
            );
        }
        value::transform_value(parser)
    }
}

pub(super) fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text))
}

pub(super) fn inherit_field(parents: &[String]) -> String {
    let list = parents
        .iter()
        .map(|p| quote(p))
        .collect::<Vec<_>>()
        .join(",");
    format!("{}:[{}],", quote(INHERIT_KEY), list)
}
