use super::*;
use super::scanner::{bump, group_closes, is_delimiter, is_structural, peek_second, skip_whitespace};
use crate::normalize::requote_single;

pub(super) fn next_token(lexer: &mut Lexer) -> Result<Token, JscError> {
    skip_whitespace(lexer);
    lexer.token_line = lexer.line;
    lexer.token_column = lexer.column;

    match lexer.peek {
        Some('{') => tokenize_symbol(lexer, Token::LBrace),
        Some('}') => tokenize_symbol(lexer, Token::RBrace),
        Some('[') => tokenize_symbol(lexer, Token::LBracket),
        Some(']') => tokenize_symbol(lexer, Token::RBracket),
        Some(':') => tokenize_symbol(lexer, Token::Colon),
        Some(',') => tokenize_symbol(lexer, Token::Comma),
        Some(quote @ ('"' | '\'')) => tokenize_string(lexer, quote),
        Some(_) => Ok(tokenize_word(lexer)),
        None => Ok(Token::Eof),
    }
}

fn tokenize_symbol(lexer: &mut Lexer, token: Token) -> Result<Token, JscError> {
    bump(lexer);
    Ok(token)
}

fn tokenize_string(lexer: &mut Lexer, quote: char) -> Result<Token, JscError> {
    let line = lexer.line;
    let column = lexer.column;
    bump(lexer); // opening quote

    let mut content = String::new();
    loop {
        match bump(lexer) {
            Some(c) if c == quote => break,
            Some('\\') => {
                // Escapes are kept verbatim for the JSON parser
                let Some(next) = bump(lexer) else {
                    return Err(JscError::UnclosedString {
                        quote,
                        line,
                        column,
                        hint: Some("Trailing backslash in string".into()),
                        code: Some(103),
                    });
                };
                content.push('\\');
                content.push(next);
            }
            Some(c) => content.push(c),
            None => {
                return Err(JscError::UnclosedString {
                    quote,
                    line,
                    column,
                    hint: Some("String literal not closed".into()),
                    code: Some(103),
                });
            }
        }
    }

    let body = if quote == '"' {
        content
    } else {
        requote_single(&content)
    };
    Ok(Token::String(format!("\"{}\"", body)))
}

fn tokenize_word(lexer: &mut Lexer) -> Token {
    let mut word = String::new();

    while let Some(ch) = lexer.peek {
        if ch == '(' && group_closes(lexer, ')', |c| c == '(' || is_structural(c)) {
            // parent lists keep their commas: `name(a,b)`
            consume_group(lexer, &mut word, '(', ')');
        } else if ch == '$' && peek_second(lexer) == Some('{') {
            word.push(ch);
            bump(lexer);
            if group_closes(lexer, '}', |c| c == ',' || c.is_whitespace() || is_structural(c)) {
                consume_group(lexer, &mut word, '{', '}');
            } else {
                // unterminated `${` stays literal text
                word.push('{');
                bump(lexer);
            }
        } else if is_delimiter(ch) {
            break;
        } else {
            word.push(ch);
            bump(lexer);
        }
    }

    Token::Word(word)
}

/// Consume a bracketed group, nesting included. Callers check with
/// `group_closes` first.
fn consume_group(lexer: &mut Lexer, word: &mut String, open: char, close: char) {
    let mut depth = 0usize;
    while let Some(ch) = bump(lexer) {
        word.push(ch);
        if ch == open {
            depth += 1;
        } else if ch == close {
            depth -= 1;
            if depth == 0 {
                break;
            }
        }
    }
}
