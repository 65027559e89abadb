//! Legacy status check records
//!
//! Kept for the `/status` endpoints; unrelated to translations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A client heartbeat record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCheck {
    pub id: Uuid,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

impl StatusCheck {
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_name: client_name.into(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_check_serializes_snake_case() {
        let check = StatusCheck::new("probe");
        let json = serde_json::to_value(&check).unwrap();
        assert_eq!(json["client_name"], "probe");
        assert!(json.get("timestamp").is_some());
        assert!(json.get("id").is_some());
    }

    #[test]
    fn test_status_check_ids_differ() {
        assert_ne!(StatusCheck::new("a").id, StatusCheck::new("a").id);
    }
}
