//! Invocation result returned to the Lambda caller

use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub const SUCCESS_MESSAGE: &str = "Processing successful!";

/// `{ "statusCode": ..., "body": ... }`. Bodies are JSON-encoded strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResult {
    pub status_code: u16,
    pub body: String,
}

fn json_string(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}

impl InvocationResult {
    pub fn success() -> Self {
        Self {
            status_code: 200,
            body: json_string(SUCCESS_MESSAGE),
        }
    }

    pub fn failure(err: &impl Display) -> Self {
        Self {
            status_code: 500,
            body: json_string(&format!("Error processing file: {}", err)),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}
