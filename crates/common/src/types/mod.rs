use serde::{Deserialize, Serialize};

/// Uniform JSON wrapper written for every response, success or failure.
///
/// `success` is derived: it is true exactly when `error` is empty.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    pub code: u16,
    pub data: Option<T>,
    pub error: String,
    pub success: bool,
}

impl<T> Envelope<T> {
    pub fn new(code: u16, data: Option<T>, error: impl Into<String>) -> Self {
        let error = error.into();
        Self { code, data, success: error.is_empty(), error }
    }

    pub fn ok(code: u16, data: T) -> Self {
        Self::new(code, Some(data), "")
    }
}

impl Envelope<()> {
    pub fn error(code: u16, error: impl Into<String>) -> Self {
        Self::new(code, None, error)
    }
}
