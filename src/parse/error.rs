use std::fmt::Display;

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    MissingAttr(&'static str),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingAttr(attr) => {
                write!(f, "delivery window element is missing the `{attr}` attribute")
            }
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
