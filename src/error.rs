use thiserror::Error;

/// The main error type for JSC processing.
///
/// Every fatal condition aborts the whole resolution; nothing partial is
/// handed back to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum JscError {
    #[error("[JSC] Syntax Error at {line}:{column}: {message}{}", suffix(.hint, .code))]
    SyntaxError {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when a string literal is not closed.
    #[error("[JSC] Unclosed string starting with '{quote}' at {line}:{column}{}", suffix(.hint, .code))]
    UnclosedString {
        quote: char,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised for an `[` that never finds its `]`.
    #[error("[JSC] Malformed array starting at {line}:{column}{}", suffix(.hint, .code))]
    MalformedArray {
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// The transformed buffer was rejected by the JSON parser.
    #[error("[JSC] Invalid buffer at {line}:{column}: {message}{}", suffix(.hint, .code))]
    InvalidBuffer {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[JSC] Missing import '{path}'{}", suffix(.hint, .code))]
    MissingImport {
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[JSC] Import cycle on '{path}': {}{}", .chain.join(" -> "), suffix(.hint, .code))]
    ImportCycle {
        path: String,
        chain: Vec<String>,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[JSC] Inheritance cycle: {}{}", .chain.join(" -> "), suffix(.hint, .code))]
    InheritanceCycle {
        chain: Vec<String>,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when `${name}` has no binding in scope. `environment` holds the
    /// definitions that were visible, rendered as JSON.
    #[error("[JSC] Undefined variable '{name}'{}\n  current definitions: {environment}", suffix(.hint, .code))]
    UndefinedVariable {
        name: String,
        environment: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[JSC] File Error '{path}': {message}{}", suffix(.hint, .code))]
    FileError {
        message: String,
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[JSC] Type Error: {message}{}", suffix(.hint, .code))]
    TypeError {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// A resolved tree could not be rendered as JSON text.
    #[error("[JSC] Export Error: {message}{}", suffix(.hint, .code))]
    ExportError {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[JSC] Path '{path}' not found{}", suffix(.hint, .code))]
    PathNotFound {
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
}

impl JscError {
    pub fn code(&self) -> Option<u32> {
        match self {
            JscError::SyntaxError { code, .. }
            | JscError::UnclosedString { code, .. }
            | JscError::MalformedArray { code, .. }
            | JscError::InvalidBuffer { code, .. }
            | JscError::MissingImport { code, .. }
            | JscError::ImportCycle { code, .. }
            | JscError::InheritanceCycle { code, .. }
            | JscError::UndefinedVariable { code, .. }
            | JscError::FileError { code, .. }
            | JscError::TypeError { code, .. }
            | JscError::ExportError { code, .. }
            | JscError::PathNotFound { code, .. } => *code,
        }
    }
}

fn suffix(hint: &Option<String>, code: &Option<u32>) -> String {
    format!(
        "{}{}",
        hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
        code.map_or(String::new(), |c| format!(" Code: {}", c))
    )
}
