pub mod booking;
pub mod core;
pub mod rules;

use std::{
    error::Error,
    fmt::{Debug, Display},
    str::FromStr,
};

use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Strongly typed entity identifier.
pub trait Id:
    Copy
    + Eq
    + std::ops::Deref<Target = Self::Inner>
    + From<Self::Inner>
    + Display
    + Debug
    + Serialize
    + for<'de> Deserialize<'de>
{
    type Inner: FromStr;
}

pub trait Entity: Debug + Clone {
    type Id: Id;

    const ENTITY_NAME: &'static str;

    fn id(&self) -> Self::Id;
}

/// Raised only when the backing store itself cannot complete an operation.
/// Validation and not-found conditions never take this path.
#[derive(Error, Debug)]
pub enum DataAccessError {
    #[error("Data read error: {0}")]
    ReadError(Box<dyn Error + Send + Sync>),
    #[error("Data write error: {0}")]
    WriteError(Box<dyn Error + Send + Sync>),
}

/// Records that survived a load, plus how many rows were skipped as
/// malformed. Skipping is a tolerance policy, not an error.
#[derive(Clone, Debug, Deref, IntoIterator)]
pub struct Loaded<T> {
    #[deref]
    #[into_iterator]
    records: Vec<T>,
    skipped: usize,
}

impl<T> Loaded<T> {
    pub fn new(records: Vec<T>, skipped: usize) -> Self {
        Self { records, skipped }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn into_records(self) -> Vec<T> {
        self.records
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<T> Default for Loaded<T> {
    fn default() -> Self {
        Self::new(Vec::new(), 0)
    }
}

/// Outcome of an operation that reports failures as an accumulated list of
/// human-readable messages. Success means the list is empty.
#[derive(Clone, Debug)]
pub struct Response<T> {
    payload: Option<T>,
    messages: Vec<String>,
}

impl<T> Response<T> {
    pub fn new() -> Self {
        Self {
            payload: None,
            messages: Vec::new(),
        }
    }

    pub fn success(payload: T) -> Self {
        Self {
            payload: Some(payload),
            messages: Vec::new(),
        }
    }

    pub fn error(message: impl Display) -> Self {
        let mut response = Self::new();
        response.add_error(message);
        response
    }

    pub fn add_error(&mut self, message: impl Display) {
        self.messages.push(message.to_string());
    }

    pub fn is_success(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    pub fn into_payload(self) -> Option<T> {
        self.payload
    }
}

impl<T> Default for Response<T> {
    fn default() -> Self {
        Self::new()
    }
}
