//! ISO-8601 timestamps as they travel over the wire:
//! UTC with millisecond precision, e.g. `2024-05-01T10:00:00.000Z`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

pub fn to_iso(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn serialize<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&to_iso(timestamp))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&text)
        .map(|t| t.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod test {
    use chrono::TimeZone;

    use crate::prelude::*;

    use super::*;

    #[test]
    fn test_to_iso_uses_millis_and_zulu() {
        let timestamp = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();

        assert_eq!(to_iso(&timestamp), "2024-05-01T10:00:00.000Z");
    }

    #[test]
    fn test_desilialize_post() {
        // Arrange
        let text = r#"{
            "id": 7,
            "title": "Scholarship list",
            "description": "",
            "timestamp": "2024-05-01T10:00:00.000Z",
            "isDemo": true,
            "comments": [
                {"id": 1, "postId": 7, "text": "thanks", "timestamp": "2024-05-01T11:30:00.250Z"}
            ]
        }"#;

        // Act
        let post = serde_json::from_str::<PostEntity>(text).unwrap();

        // Assert
        assert!(post.is_demo);
        assert_eq!(post.comments.len(), 1);
        assert_eq!(post.comment(1).map(|c| c.text.as_str()), Some("thanks"));
        assert_eq!(to_iso(&post.comments[0].timestamp), "2024-05-01T11:30:00.250Z");
    }

    #[test]
    fn test_serialize_comment_keys() {
        let comment = CommentEntity {
            id: 3,
            post_id: 9,
            text: "hi".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        };

        let json = serde_json::to_value(&comment).unwrap();

        assert_eq!(json["postId"], 9);
        assert_eq!(json["timestamp"], "2024-01-02T03:04:05.000Z");
    }

    #[test]
    fn test_reject_garbage_timestamp() {
        let text = r#"{"id": 1, "postId": 1, "text": "x", "timestamp": "yesterday"}"#;

        assert!(serde_json::from_str::<CommentEntity>(text).is_err());
    }
}
