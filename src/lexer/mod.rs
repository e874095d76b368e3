// Author: Dustin Pilgrim
// License: MIT

use std::str::Chars;
use crate::JscError;

mod scanner;
mod tokenizer;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // --- literals ---
    /// A string literal, always rendered as a double-quoted JSON literal
    /// with its escapes untouched.
    String(String),
    /// A bare run of text: key, number, bool, unquoted string...
    Word(String),

    // --- structure ---
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Colon,
    Comma,

    Eof,
}

pub struct Lexer<'a> {
    input: Chars<'a>,
    peek: Option<char>,
    line: usize,
    column: usize,
    token_line: usize,
    token_column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer {
            input: input.chars(),
            peek: None,
            line: 1,
            column: 0,
            token_line: 1,
            token_column: 0,
        };
        lexer.peek = lexer.input.next();
        lexer
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Line where the most recently produced token starts.
    pub fn token_line(&self) -> usize {
        self.token_line
    }

    /// Column where the most recently produced token starts.
    pub fn token_column(&self) -> usize {
        self.token_column
    }

    pub fn next_token(&mut self) -> Result<Token, JscError> {
        tokenizer::next_token(self)
    }
}

#[cfg(test)]
mod tests;
