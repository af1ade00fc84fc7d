//! Runtime error type: a small hand-written enum, no third-party error stack.
use std::{error::Error as StdError, fmt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackError {
    InvalidKey(String),         // identifier key without `namespace:key` shape
    ConfigAlreadyInstalled,     // config::install called twice
}

impl fmt::Display for CallbackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallbackError::InvalidKey(s) => {
                write!(f, "invalid identifier key {s:?}: expected `namespace:key`")
            }
            CallbackError::ConfigAlreadyInstalled => {
                write!(f, "dispatch config already installed for this process")
            }
        }
    }
}
impl StdError for CallbackError {}

pub type Result<T = ()> = std::result::Result<T, CallbackError>;
