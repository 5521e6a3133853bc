//! Persisted crossword record

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::payload::{SaveRequest, UserScore};

/// Game state stored under the caller's id. Each save replaces the whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrosswordRecord {
    pub users: Vec<UserScore>,
    pub crossword: Value,
    pub generated_by: String,
    /// ISO-8601 in UTC with millisecond precision, e.g. `2024-05-01T09:30:00.000Z`
    pub timestamp: String,
}

impl CrosswordRecord {
    /// Split a save request into its store key and the record stamped at `now`
    pub fn from_save(request: SaveRequest, now: DateTime<Utc>) -> (String, Self) {
        let record = Self {
            users: request.users,
            crossword: request.crossword,
            generated_by: request.generated_by,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        (request.id, record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_from_save_stamps_timestamp() {
        let request = SaveRequest {
            id: "room-9".to_string(),
            users: vec![UserScore {
                name: "bo".to_string(),
                score: serde_json::Number::from(12_u64),
            }],
            crossword: serde_json::json!({"across": []}),
            generated_by: "bo".to_string(),
        };
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();

        let (key, record) = CrosswordRecord::from_save(request, now);
        assert_eq!(key, "room-9");
        assert_eq!(record.timestamp, "2024-05-01T09:30:00.000Z");

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "users": [{"name": "bo", "score": 12}],
                "crossword": {"across": []},
                "generatedBy": "bo",
                "timestamp": "2024-05-01T09:30:00.000Z"
            })
        );
    }
}
