use crate::parse;
use std::fmt::{self, Display, Formatter};

#[derive(Debug)]
pub enum Error {
    Request(reqwest::Error),
    Parse(parse::Error),
    Json(serde_json::Error),
    Credentials(&'static str),
    Sms(String),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e)
    }
}

impl From<parse::Error> for Error {
    fn from(e: parse::Error) -> Self {
        Error::Parse(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::Request(e) => write!(f, "Request error: {e}"),
            Error::Parse(e) => write!(f, "Parse error: {e}"),
            Error::Json(e) => write!(f, "Json error: {e}"),
            Error::Credentials(var) => {
                write!(f, "Credentials error: environment variable {var} is not set")
            }
            Error::Sms(msg) => write!(f, "Sms error: {msg}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
