use std::fmt;

#[derive(Debug)]
pub enum CodegenError {
    Io(String),
    Definition(String),
    Template(String),
    Configuration(String),
}

impl CodegenError {
    /// Write and read failures are fatal for the run; everything else is
    /// isolated to the file that caused it.
    pub fn is_io(&self) -> bool {
        matches!(self, CodegenError::Io(_))
    }
}

impl fmt::Display for CodegenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodegenError::Io(msg) => write!(f, "I/O error: {}", msg),
            CodegenError::Definition(msg) => write!(f, "Entity definition error: {}", msg),
            CodegenError::Template(msg) => write!(f, "Template error: {}", msg),
            CodegenError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for CodegenError {}

impl From<std::io::Error> for CodegenError {
    fn from(err: std::io::Error) -> Self {
        CodegenError::Io(err.to_string())
    }
}

pub type CodegenResult<T> = Result<T, CodegenError>;
