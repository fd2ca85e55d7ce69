//! # QR Wire Codec
//!
//! Transactions cross between devices as JSON rendered into QR codes. The
//! codec validates the JSON tree against the message's schema on *both*
//! sides: before a payload is emitted and before a scanned payload is
//! turned into a value. A payload that fails validation is never consumed.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::schema::{MessageKind, MessageSchema};
use super::types::{CompleteTransaction, PendingTransaction};

/// Errors raised while encoding or decoding a QR payload.
#[derive(Debug, Error)]
pub enum WireError {
    /// The payload is not JSON, or does not map onto the Rust type.
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    /// An embedded schema document could not be loaded.
    #[error("invalid {kind} schema: {reason}")]
    Schema { kind: MessageKind, reason: String },

    /// The JSON tree violates the message schema.
    #[error("{kind} failed schema validation: {}", .violations.join("; "))]
    Validation {
        kind: MessageKind,
        violations: Vec<String>,
    },
}

/// A type that travels over QR codes under a fixed schema.
pub trait WireMessage: Serialize + DeserializeOwned {
    const KIND: MessageKind;
}

impl WireMessage for PendingTransaction {
    const KIND: MessageKind = MessageKind::PendingTransaction;
}

impl WireMessage for CompleteTransaction {
    const KIND: MessageKind = MessageKind::CompleteTransaction;
}

/// Schema-validating JSON codec for handshake messages.
///
/// Schemas are loaded once in [`WireCodec::new`]; build one codec per
/// device and share it.
#[derive(Clone, Debug)]
pub struct WireCodec {
    pending: MessageSchema,
    complete: MessageSchema,
}

impl WireCodec {
    pub fn new() -> Result<Self, WireError> {
        tracing::debug!("loading QR payload schemas");
        Ok(Self {
            pending: MessageSchema::load(MessageKind::PendingTransaction)?,
            complete: MessageSchema::load(MessageKind::CompleteTransaction)?,
        })
    }

    fn schema(&self, kind: MessageKind) -> &MessageSchema {
        match kind {
            MessageKind::PendingTransaction => &self.pending,
            MessageKind::CompleteTransaction => &self.complete,
        }
    }

    fn validate(&self, kind: MessageKind, value: &Value) -> Result<(), WireError> {
        let violations = self.schema(kind).validate(value);
        if violations.is_empty() {
            return Ok(());
        }

        tracing::warn!(%kind, ?violations, "payload rejected by schema");
        Err(WireError::Validation { kind, violations })
    }

    /// Serialize `message` into a QR payload.
    pub fn encode<T: WireMessage>(&self, message: &T) -> Result<String, WireError> {
        let value = serde_json::to_value(message)?;
        self.validate(T::KIND, &value)?;
        Ok(serde_json::to_string(&value)?)
    }

    /// Parse a scanned QR payload.
    pub fn decode<T: WireMessage>(&self, payload: &str) -> Result<T, WireError> {
        let value: Value = serde_json::from_str(payload)?;
        self.validate(T::KIND, &value)?;
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> WireCodec {
        WireCodec::new().unwrap()
    }

    #[test]
    fn decodes_reference_pending_payload() {
        let json = "{\"datetime\": 104320,\"destination\": \"marc\",\"amount\": 10.5}";
        let pending: PendingTransaction = codec().decode(json).unwrap();
        assert_eq!(pending, PendingTransaction::new("marc", 10.5, 104320));
    }

    #[test]
    fn complete_transaction_round_trip() {
        let tx = CompleteTransaction::new("source", "dest", 10.5, 104320);
        let json = codec().encode(&tx).unwrap();

        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"source": "source", "destination": "dest", "amount": 10.5, "datetime": 104320})
        );

        let back: CompleteTransaction = codec().decode(&json).unwrap();
        assert_eq!(back, tx);
    }

    #[test]
    fn negative_datetime_fails_validation() {
        let json = "{\"datetime\": -6,\"source\": \"Source\",\"destination\": \"Dest\",\"amount\": 12.5}";
        let err = codec().decode::<CompleteTransaction>(json).unwrap_err();
        assert!(matches!(
            err,
            WireError::Validation { kind: MessageKind::CompleteTransaction, .. }
        ));

        let tx = CompleteTransaction::new("Source", "Dest", 12.5, -6);
        assert!(matches!(codec().encode(&tx), Err(WireError::Validation { .. })));
    }

    #[test]
    fn non_positive_amounts_are_not_encoded() {
        for amount in [0.0, -1.0, f64::NAN] {
            let tx = PendingTransaction::new("dest", amount, 1);
            assert!(codec().encode(&tx).is_err(), "amount {amount} was encoded");
        }
    }

    #[test]
    fn pending_payload_is_not_a_complete_transaction() {
        let json = codec().encode(&PendingTransaction::new("dest", 1.0, 1)).unwrap();
        let err = codec().decode::<CompleteTransaction>(&json).unwrap_err();
        match err {
            WireError::Validation { violations, .. } => {
                assert_eq!(violations.len(), 1, "{violations:?}");
                assert!(violations[0].contains("source"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn whole_float_datetime_never_becomes_a_value() {
        let json = r#"{"datetime": 1e3, "destination": "marc", "amount": 1.0}"#;
        assert!(codec().decode::<PendingTransaction>(json).is_err());
    }

    #[test]
    fn garbage_is_a_json_error() {
        let err = codec().decode::<PendingTransaction>("not json").unwrap_err();
        assert!(matches!(err, WireError::Json(_)));
    }
}
