use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Error parsing incoming JSON {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Error parsing incoming YAML {0}")]
    YamlError(#[from] serde_yaml::Error),
    #[error("Formatting error when writing {0}")]
    FormatError(#[from] std::fmt::Error),
    #[error("I/O error when reading {0}")]
    IoError(#[from] std::io::Error),
    #[error("invalid condition: {0}")]
    InvalidCondition(String),
    #[error("context path not found: {0}")]
    PathNotFound(String),
    #[error("empty path")]
    EmptyPath,
    #[error("key not found: {0}")]
    KeyNotFound(String),
    #[error("nil value at {0}")]
    NullValue(String),
    #[error("index out of bounds: {0}")]
    IndexOutOfBounds(i64),
    #[error("cannot access key '{0}' on non-object type")]
    NotAnObject(String),
    #[error("cannot access index on non-array type")]
    NotAnArray,
    #[error("invalid index: {0}")]
    InvalidIndex(String),
    #[error("unclosed bracket in path")]
    UnclosedBracket,
    #[error("invalid JSON: {0}")]
    InvalidBody(String),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("invalid path: {0}")]
    InvalidStorePath(String),
    #[error("{0}")]
    IllegalArguments(String),
    #[error(transparent)]
    Errors(#[from] Errors),
}

#[derive(Debug, Error)]
pub struct Errors(pub Vec<Error>);

impl std::fmt::Display for Errors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages = self
            .0
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>();
        f.write_str(&messages.join("; "))
    }
}
