use crate::lexer::{Lexer, Token};
use crate::JscError;

mod document;
mod key;
mod value;

pub use key::split_inheritance;
pub use value::{classify, render_scalar, ValueKind};

/// Recursive-descent transformer: reads config-language tokens and writes
/// the equivalent JSON text.
///
/// Separators are emitted as written, so a trailing comma in the source is
/// still present in the output; [`crate::normalize::remove_trailing_commas`]
/// finishes the job.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    peek: Option<Token>,
    out: String,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Result<Self, JscError> {
        let mut lexer = Lexer::new(input);
        let peek = Some(lexer.next_token()?);
        Ok(Self {
            lexer,
            peek,
            out: String::with_capacity(input.len() + input.len() / 4),
        })
    }

    pub(crate) fn bump(&mut self) -> Result<Token, JscError> {
        let curr = self.peek.take().ok_or(JscError::SyntaxError {
            message: "Unexpected end of input".into(),
            line: self.lexer.line(),
            column: self.lexer.column(),
            hint: None,
            code: Some(201),
        })?;
        self.peek = Some(self.lexer.next_token()?);
        Ok(curr)
    }

    pub(crate) fn peek(&self) -> Option<&Token> {
        self.peek.as_ref()
    }

    /// Line of the token currently in `peek`.
    pub(crate) fn line(&self) -> usize {
        self.lexer.token_line()
    }

    /// Column of the token currently in `peek`.
    pub(crate) fn column(&self) -> usize {
        self.lexer.token_column()
    }

    pub(crate) fn emit(&mut self, text: &str) {
        self.out.push_str(text);
    }

    pub(crate) fn unexpected(&self, expected: &str, code: u32) -> JscError {
        JscError::SyntaxError {
            message: format!("Expected {}, got {}", expected, describe(self.peek())),
            line: self.line(),
            column: self.column(),
            hint: None,
            code: Some(code),
        }
    }

    pub fn transform_document(&mut self) -> Result<String, JscError> {
        document::transform_document(self)
    }
}

/// Transform normalized config-language text into JSON text (trailing commas
/// from the source still included).
pub fn transform(input: &str) -> Result<String, JscError> {
    let mut parser = Parser::new(input)?;
    parser.transform_document()
}

fn describe(token: Option<&Token>) -> String {
    match token {
        Some(Token::String(s)) => format!("string {}", s),
        Some(Token::Word(w)) => format!("'{}'", w),
        Some(Token::LBrace) => "'{'".into(),
        Some(Token::RBrace) => "'}'".into(),
        Some(Token::LBracket) => "'['".into(),
        Some(Token::RBracket) => "']'".into(),
        Some(Token::Colon) => "':'".into(),
        Some(Token::Comma) => "','".into(),
        Some(Token::Eof) | None => "end of input".into(),
    }
}
