use thiserror::Error;

#[derive(Error, Debug)]
pub enum RustyWarpscriptError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("WarpScript error on line {line:?}: {message}")]
    ExecError {
        line: Option<u64>,
        message: String,
    },

    #[error("Not a GTS: {0}")]
    NotAGts(String),

    #[error("Expected a single element on the stack, got {0}")]
    NotSingular(usize),

    #[error("No column named `{0}`")]
    MissingColumn(String),
}
