use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Every hidden-layer slot reserved at construction time is already in use.
    TooManyHiddenLayers,
    InvalidConfig(String),
    InvalidShape(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TooManyHiddenLayers => {
                write!(f, "all reserved hidden layer slots are in use")
            }
            Error::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Error::InvalidShape(msg) => write!(f, "invalid shape: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
