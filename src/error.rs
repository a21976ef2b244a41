use miette::Diagnostic;
use thiserror::Error;

/// Main error type for layerdiv operations
#[derive(Error, Diagnostic, Debug)]
pub enum DividerError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(layerdiv::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Invalid input: {message}")]
    #[diagnostic(code(layerdiv::input))]
    Input {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(layerdiv::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Document error: {message}")]
    #[diagnostic(code(layerdiv::document))]
    Document {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, DividerError>;
