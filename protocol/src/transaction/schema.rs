//! # QR Payload Schemas
//!
//! Each message kind carried over a QR code has a fixed JSON-Schema
//! (draft-07) document, embedded at compile time from `protocol/schemas/`.
//! A document is compiled once into a draft-07 validator; every keyword it
//! uses is enforced.

use std::fmt;
use std::sync::Arc;

use jsonschema::Validator;
use serde_json::Value;

use crate::config::{COMPLETE_TRANSACTION_SCHEMA_ID, JSON_SCHEMA_DRAFT, PENDING_TRANSACTION_SCHEMA_ID};

use super::wire::WireError;

/// The kinds of message exchanged during a handshake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageKind {
    PendingTransaction,
    CompleteTransaction,
}

impl MessageKind {
    /// Identifier the schema document must declare as `$id`.
    pub fn schema_id(self) -> &'static str {
        match self {
            MessageKind::PendingTransaction => PENDING_TRANSACTION_SCHEMA_ID,
            MessageKind::CompleteTransaction => COMPLETE_TRANSACTION_SCHEMA_ID,
        }
    }

    /// The embedded schema document.
    pub fn schema_source(self) -> &'static str {
        match self {
            MessageKind::PendingTransaction => include_str!("../../schemas/pending_transaction.json"),
            MessageKind::CompleteTransaction => {
                include_str!("../../schemas/complete_transaction.json")
            }
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageKind::PendingTransaction => write!(f, "pending transaction"),
            MessageKind::CompleteTransaction => write!(f, "complete transaction"),
        }
    }
}

// ---------------------------------------------------------------------------
// Compiled schema
// ---------------------------------------------------------------------------

/// A compiled message schema.
#[derive(Clone)]
pub struct MessageSchema {
    id: String,
    validator: Arc<Validator>,
}

impl fmt::Debug for MessageSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageSchema").field("id", &self.id).finish_non_exhaustive()
    }
}

fn schema_error(kind: MessageKind, reason: impl Into<String>) -> WireError {
    WireError::Schema {
        kind,
        reason: reason.into(),
    }
}

impl MessageSchema {
    /// Compile the embedded schema for `kind`.
    pub fn load(kind: MessageKind) -> Result<Self, WireError> {
        Self::from_source(kind, kind.schema_source())
    }

    /// Compile a schema document for `kind`.
    ///
    /// The document must declare draft-07 and the kind's `$id`, and must
    /// itself be a valid draft-07 schema.
    pub fn from_source(kind: MessageKind, source: &str) -> Result<Self, WireError> {
        let document: Value =
            serde_json::from_str(source).map_err(|e| schema_error(kind, e.to_string()))?;

        let draft = document.get("$schema").and_then(Value::as_str);
        if draft != Some(JSON_SCHEMA_DRAFT) {
            return Err(schema_error(kind, format!("unsupported draft {draft:?}")));
        }

        let id = document.get("$id").and_then(Value::as_str).unwrap_or_default();
        if id != kind.schema_id() {
            return Err(schema_error(
                kind,
                format!("declares id {id:?} instead of {}", kind.schema_id()),
            ));
        }

        let validator =
            jsonschema::draft7::new(&document).map_err(|e| schema_error(kind, e.to_string()))?;

        Ok(Self {
            id: id.to_string(),
            validator: Arc::new(validator),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Validate a JSON tree, returning every violation found.
    pub fn validate(&self, value: &Value) -> Vec<String> {
        self.validator
            .iter_errors(value)
            .map(|error| {
                let path = error.instance_path.to_string();
                if path.is_empty() {
                    error.to_string()
                } else {
                    format!("{path}: {error}")
                }
            })
            .collect()
    }
}
