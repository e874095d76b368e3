use super::*;
use super::document::{inherit_field, quote, transform_members};

/// What a bare value turns into once quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Object,
    Array,
    Bool,
    Null,
    Int,
    /// Valid JSON number outside the 64-bit integer and finite float ranges
    Number,
    Float,
    Hex,
    Binary,
}

pub(super) fn transform_value(parser: &mut Parser) -> Result<(), JscError> {
    match parser.peek() {
        Some(Token::LBrace) => transform_object(parser, &[]),
        Some(Token::LBracket) => transform_array(parser),
        _ => transform_scalar(parser),
    }
}

pub(super) fn transform_object(parser: &mut Parser, parents: &[String]) -> Result<(), JscError> {
    let open = (parser.line(), parser.column());
    parser.bump()?; // consume {
    parser.emit("{");

    if !parents.is_empty() {
        let field = inherit_field(parents);
        parser.emit(&field);
    }

    transform_members(parser, Some(open))?;
    parser.emit("}");
    Ok(())
}

pub(super) fn transform_array(parser: &mut Parser) -> Result<(), JscError> {
    let (line, column) = (parser.line(), parser.column());
    parser.bump()?; // consume [
    parser.emit("[");

    // An enclosing `}` or the end of input means this `[` is never closed
    let unclosed = || JscError::MalformedArray {
        line,
        column,
        hint: Some("Add the missing ']'".into()),
        code: Some(209),
    };

    loop {
        match parser.peek() {
            Some(Token::RBracket) => {
                parser.bump()?;
                parser.emit("]");
                return Ok(());
            }
            Some(Token::Eof) | Some(Token::RBrace) => return Err(unclosed()),
            Some(Token::Comma) => return Err(parser.unexpected("array element", 210)),
            _ => transform_value(parser)?,
        }

        match parser.peek() {
            Some(Token::Comma) => {
                parser.bump()?;
                parser.emit(",");
            }
            Some(Token::RBracket) => {}
            Some(Token::Eof) | Some(Token::RBrace) => return Err(unclosed()),
            _ => return Err(parser.unexpected("',' or ']'", 211)),
        }
    }
}

/// A scalar runs up to the next `,` `}` `]` at this depth; bare text may
/// contain `:` (`C:/tools`).
fn transform_scalar(parser: &mut Parser) -> Result<(), JscError> {
    let mut text = String::new();
    let mut literal: Option<String> = None;

    loop {
        match parser.peek() {
            Some(Token::Word(_)) | Some(Token::Colon) | Some(Token::String(_)) => {}
            _ => break,
        }
        let (line, column) = (parser.line(), parser.column());
        if let Some(raw) = &literal {
            return Err(JscError::SyntaxError {
                message: format!("Unexpected text after string value {}", raw),
                line,
                column,
                hint: Some("Quote the whole value".into()),
                code: Some(212),
            });
        }
        match parser.bump()? {
            Token::Word(word) => text.push_str(&word),
            Token::Colon => text.push(':'),
            Token::String(raw) if text.is_empty() => literal = Some(raw),
            Token::String(raw) => {
                return Err(JscError::SyntaxError {
                    message: format!("Unexpected string {} inside a bare value", raw),
                    line,
                    column,
                    hint: Some("Quote the whole value".into()),
                    code: Some(212),
                });
            }
            _ => unreachable!(),
        }
    }

    match literal {
        Some(raw) => parser.emit(&raw),
        None => {
            let rendered = render_scalar(&text);
            parser.emit(&rendered);
        }
    }
    Ok(())
}

/// Classify a bare token.
pub fn classify(token: &str) -> ValueKind {
    let token = token.trim();

    if token.is_empty() || token.starts_with('"') {
        return ValueKind::String;
    }
    if token.starts_with('{') {
        return ValueKind::Object;
    }
    if token.starts_with('[') {
        return ValueKind::Array;
    }
    match token {
        "true" | "false" => return ValueKind::Bool,
        "null" => return ValueKind::Null,
        _ => {}
    }
    if parse_radix(token, "0x", 16).is_some() {
        return ValueKind::Hex;
    }
    if parse_radix(token, "0b", 2).is_some() {
        return ValueKind::Binary;
    }
    if parse_float(token).is_some() {
        return ValueKind::Float;
    }
    if parse_integer(token).is_some() {
        return ValueKind::Int;
    }
    if token.parse::<serde_json::Number>().is_ok() {
        return ValueKind::Number;
    }
    ValueKind::String
}

/// JSON text for a bare scalar token.
pub fn render_scalar(token: &str) -> String {
    let trimmed = token.trim();
    match classify(trimmed) {
        ValueKind::Bool | ValueKind::Null => trimmed.to_string(),
        ValueKind::Hex => parse_radix(trimmed, "0x", 16).map_or_else(|| quote(trimmed), |n| n.to_string()),
        ValueKind::Binary => parse_radix(trimmed, "0b", 2).map_or_else(|| quote(trimmed), |n| n.to_string()),
        ValueKind::Float => parse_float(trimmed).map_or_else(|| quote(trimmed), |f| format!("{:?}", f)),
        ValueKind::Int => parse_integer(trimmed).unwrap_or_else(|| quote(trimmed)),
        ValueKind::Number => trimmed.to_string(),
        ValueKind::String | ValueKind::Object | ValueKind::Array => quote(trimmed),
    }
}

fn parse_radix(token: &str, prefix: &str, radix: u32) -> Option<u64> {
    let digits = token.strip_prefix(prefix)?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok()
}

/// Decimal text of an integer token that fits `i64` or `u64`.
fn parse_integer(token: &str) -> Option<String> {
    token
        .parse::<i64>()
        .map(|n| n.to_string())
        .or_else(|_| token.parse::<u64>().map(|n| n.to_string()))
        .ok()
}

fn parse_float(token: &str) -> Option<f64> {
    let numeric = token
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
    let has_digit = token.chars().any(|c| c.is_ascii_digit());
    let has_marker = token.contains(['.', 'e', 'E']);
    if !(numeric && has_digit && has_marker) {
        return None;
    }
    token.parse::<f64>().ok().filter(|f| f.is_finite())
}
