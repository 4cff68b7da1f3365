// Core structs: Product, Listing, MatchOutcome and the error enums
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::path::PathBuf;
use thiserror::Error;

/// A canonical catalog entry.
///
/// `fields` holds the complete decoded object, so fields other than the three
/// the matcher reads travel along untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub product_name: String,
    pub manufacturer: String,
    pub model: String,
    pub fields: Map<String, Value>,
}

/// A merchant posting waiting to be classified.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub title: String,
    pub manufacturer: String,
    pub fields: Map<String, Value>,
}

/// A record that can be built from one decoded JSON object.
pub trait Record: Sized {
    /// Fails with the name of the first required field that is missing or not a string.
    fn from_object(fields: Map<String, Value>) -> Result<Self, &'static str>;
}

impl Record for Product {
    fn from_object(fields: Map<String, Value>) -> Result<Self, &'static str> {
        Ok(Self {
            product_name: required_str(&fields, "product_name")?,
            manufacturer: required_str(&fields, "manufacturer")?,
            model: required_str(&fields, "model")?,
            fields,
        })
    }
}

impl Record for Listing {
    fn from_object(fields: Map<String, Value>) -> Result<Self, &'static str> {
        Ok(Self {
            title: required_str(&fields, "title")?,
            manufacturer: required_str(&fields, "manufacturer")?,
            fields,
        })
    }
}

fn required_str(fields: &Map<String, Value>, key: &'static str) -> Result<String, &'static str> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or(key)
}

// Both records serialize back to the object they were decoded from.
impl Serialize for Product {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl Serialize for Listing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

/// Result of candidate selection for one listing.
#[derive(Debug, Clone, Copy)]
pub struct MatchOutcome<'a> {
    pub score: i64,
    pub product: Option<&'a Product>,
}

impl<'a> MatchOutcome<'a> {
    /// Best score before any candidate has been looked at.
    pub const SENTINEL: i64 = -1;

    pub fn none() -> Self {
        Self {
            score: Self::SENTINEL,
            product: None,
        }
    }

    pub fn is_match(&self) -> bool {
        self.score > Self::SENTINEL && self.product.is_some()
    }

    /// The matched product, if any.
    pub fn matched(&self) -> Option<&'a Product> {
        if self.is_match() { self.product } else { None }
    }
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("line {line}: invalid JSON: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("line {line}: expected a JSON object")]
    NotAnObject { line: usize },
    #[error("line {line}: missing or non-string field `{field}`")]
    MissingField { line: usize, field: &'static str },
    #[error("read error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("write error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },
    #[error("cannot open input file {}: {source}", path.display())]
    OpenInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Parser(#[from] ParserError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
