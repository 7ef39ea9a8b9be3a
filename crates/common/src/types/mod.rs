use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Generic acknowledgment returned by every mutating operation.
///
/// Rejections travel in the same shape with `success = false`, so clients
/// only ever parse one body type for writes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    pub success: bool,
    pub message: String,
}

impl Ack {
    pub fn ok(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into() }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into() }
    }
}
