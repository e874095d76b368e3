pub mod ast;
pub mod error;
pub mod spans;
pub mod normalize;
pub mod lexer;
pub mod parser;
pub mod platform;
pub mod resolver;
pub mod config;
pub mod export;

pub use ast::{Mapping, Value};
pub use error::JscError;
pub use config::{JscConfig, LoadOptions, load_jsc, parse_jsc};
pub use platform::Platform;
