use serde_json::Value;
use thiserror::Error;

use crate::shared::http::HttpError;

/// Failure of a requisition action, already phrased for the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequisitionError {
    /// Draft rejected locally; no request was sent
    #[error("{0}")]
    Validation(String),

    /// Network or client-side failure
    #[error("{0}")]
    Transport(String),

    /// The backend refused the mutation
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Some lines of a multi-line create were committed, others were not
    #[error("{message}")]
    PartialCreate {
        submitted: usize,
        failed: usize,
        message: String,
    },

    /// The backend answered with a body we could not read
    #[error("{0}")]
    Decode(String),
}

impl RequisitionError {
    pub fn validation(message: &str) -> Self {
        RequisitionError::Validation(message.to_string())
    }

    /// Maps a transport failure, preferring the server's own wording over `fallback`.
    pub fn from_http(err: HttpError, fallback: &str) -> Self {
        match err {
            HttpError::Status { status, body } => RequisitionError::Server {
                status,
                message: server_message(&body).unwrap_or_else(|| fallback.to_string()),
            },
            HttpError::Network(_) | HttpError::Serialize(_) => {
                RequisitionError::Transport(fallback.to_string())
            }
            HttpError::Decode(_) => RequisitionError::Decode(fallback.to_string()),
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, RequisitionError::Validation(_))
    }

    /// Some records may exist server-side despite the failure; refetch before retrying.
    pub fn may_have_committed(&self) -> bool {
        matches!(self, RequisitionError::PartialCreate { .. })
    }
}

/// Message carried by an error body.
///
/// A JSON object yields its non-empty `message` field (or nothing); any
/// other non-empty payload is returned as-is, unquoted when it is a JSON string.
pub fn server_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => map
            .get("message")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string),
        Ok(Value::String(s)) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        _ => Some(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_message_wins() {
        let err = RequisitionError::from_http(
            HttpError::Status {
                status: 400,
                body: r#"{"message":"Fulfillment quantity exceeds remaining balance","status":400}"#
                    .to_string(),
            },
            "Failed to fulfill requisition",
        );
        assert_eq!(
            err,
            RequisitionError::Server {
                status: 400,
                message: "Fulfillment quantity exceeds remaining balance".to_string()
            }
        );
    }

    #[test]
    fn test_raw_payload_then_fallback() {
        assert_eq!(
            server_message("Insufficient stock"),
            Some("Insufficient stock".to_string())
        );
        assert_eq!(
            server_message("\"Request already approved\""),
            Some("Request already approved".to_string())
        );
        assert_eq!(server_message(r#"{"error":"Bad Request"}"#), None);
        assert_eq!(server_message("   "), None);

        let err = RequisitionError::from_http(
            HttpError::Status {
                status: 500,
                body: String::new(),
            },
            "Failed to approve requisition",
        );
        assert_eq!(err.message(), "Failed to approve requisition");
    }

    #[test]
    fn test_network_failure_uses_fallback() {
        let err = RequisitionError::from_http(
            HttpError::Network("connection refused".to_string()),
            "Failed to reject requisition",
        );
        assert_eq!(
            err,
            RequisitionError::Transport("Failed to reject requisition".to_string())
        );
        assert!(!err.is_validation());
    }
}
