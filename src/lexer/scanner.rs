use super::*;

/// Advance the character iterator and update line/column tracking
pub(super) fn bump(lexer: &mut Lexer) -> Option<char> {
    let curr = lexer.peek;
    if let Some(c) = curr {
        if c == '\n' {
            lexer.line += 1;
            lexer.column = 0;
        } else {
            lexer.column += 1;
        }
    }
    lexer.peek = lexer.input.next();
    curr
}

/// Skip whitespace, newlines included
pub(super) fn skip_whitespace(lexer: &mut Lexer) {
    while let Some(c) = lexer.peek {
        if c.is_whitespace() {
            bump(lexer);
        } else {
            break;
        }
    }
}

/// Look one character past the current one
pub(super) fn peek_second(lexer: &Lexer) -> Option<char> {
    lexer.input.clone().next()
}

/// Characters that end a bare word
pub(super) fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '{' | '}' | '[' | ']' | ':' | ',' | '"' | '\'')
}

/// Characters that can never sit inside a `(...)` or `${...}` group
pub(super) fn is_structural(c: char) -> bool {
    matches!(c, '\n' | '{' | '}' | '[' | ']' | ':' | '"' | '\'')
}

/// Whether the group opened by the current character finds `close` before a
/// character for which `stop` holds.
pub(super) fn group_closes(lexer: &Lexer, close: char, stop: impl Fn(char) -> bool) -> bool {
    for c in lexer.input.clone() {
        if c == close {
            return true;
        }
        if stop(c) {
            return false;
        }
    }
    false
}
