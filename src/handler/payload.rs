//! POST body decoding
//!
//! The body is a JSON object discriminated by its `type` field. Each known
//! type decodes into its own payload struct, which requires its fields and
//! rejects any it does not know.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Recognized values of the `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Words,
    CrosswordSave,
    CrosswordHint,
}

impl RequestKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Words => "words",
            Self::CrosswordSave => "crossword-save",
            Self::CrosswordHint => "crossword-hint",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "words" => Some(Self::Words),
            "crossword-save" => Some(Self::CrosswordSave),
            "crossword-hint" => Some(Self::CrosswordHint),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum PostRequest {
    Words(WordsRequest),
    CrosswordSave(SaveRequest),
    CrosswordHint(HintRequest),
}

impl PostRequest {
    pub const fn kind(&self) -> RequestKind {
        match self {
            Self::Words(_) => RequestKind::Words,
            Self::CrosswordSave(_) => RequestKind::CrosswordSave,
            Self::CrosswordHint(_) => RequestKind::CrosswordHint,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WordsRequest {
    pub topic: String,
    #[serde(deserialize_with = "string_or_number")]
    pub num_of_words: String,
    pub difficulty_level: String,
}

/// One player on the scoreboard; `score` keeps the caller's numeric form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserScore {
    pub name: String,
    pub score: serde_json::Number,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SaveRequest {
    pub id: String,
    pub users: Vec<UserScore>,
    pub crossword: Value,
    pub generated_by: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HintRequest {
    pub input_word: String,
    pub input_question: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("request body is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("missing or unsupported request type")]
    UnsupportedType,
    #[error("invalid {} payload: {source}", .kind.as_str())]
    InvalidPayload {
        kind: RequestKind,
        #[source]
        source: serde_json::Error,
    },
}

/// Decode a POST body into one of the supported requests
pub fn decode(body: &[u8]) -> Result<PostRequest, DecodeError> {
    let value: Value = serde_json::from_slice(body).map_err(DecodeError::Malformed)?;
    let Value::Object(mut fields) = value else {
        return Err(DecodeError::UnsupportedType);
    };

    let tag = fields.remove("type");
    let kind = tag
        .as_ref()
        .and_then(Value::as_str)
        .and_then(RequestKind::from_tag)
        .ok_or(DecodeError::UnsupportedType)?;

    let payload = Value::Object(fields);
    let invalid = |source| DecodeError::InvalidPayload { kind, source };
    match kind {
        RequestKind::Words => serde_json::from_value(payload)
            .map(PostRequest::Words)
            .map_err(invalid),
        RequestKind::CrosswordSave => serde_json::from_value(payload)
            .map(PostRequest::CrosswordSave)
            .map_err(invalid),
        RequestKind::CrosswordHint => serde_json::from_value(payload)
            .map(PostRequest::CrosswordHint)
            .map_err(invalid),
    }
}

/// Accept `"10"` or `10`; the value only ends up inside a prompt
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Count::deserialize(deserializer)? {
        Count::Text(s) => s,
        Count::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_words() {
        let body = br#"{"type":"words","topic":"space","numOfWords":"8","difficultyLevel":"easy"}"#;
        let PostRequest::Words(words) = decode(body).unwrap() else {
            panic!("expected words request");
        };
        assert_eq!(words.topic, "space");
        assert_eq!(words.num_of_words, "8");
        assert_eq!(words.difficulty_level, "easy");
    }

    #[test]
    fn test_decode_words_numeric_count() {
        let body = br#"{"type":"words","topic":"space","numOfWords":12,"difficultyLevel":"hard"}"#;
        let PostRequest::Words(words) = decode(body).unwrap() else {
            panic!("expected words request");
        };
        assert_eq!(words.num_of_words, "12");
    }

    #[test]
    fn test_decode_save() {
        let body = br#"{"type":"crossword-save","id":"room-1","users":[{"name":"ana","score":3}],"crossword":{"grid":[["c","a","t"]]},"generatedBy":"ana"}"#;
        let request = decode(body).unwrap();
        assert_eq!(request.kind(), RequestKind::CrosswordSave);
        let PostRequest::CrosswordSave(save) = request else {
            unreachable!()
        };
        assert_eq!(save.id, "room-1");
        assert_eq!(save.users[0].name, "ana");
        assert_eq!(save.users[0].score.to_string(), "3");
        assert_eq!(save.crossword["grid"][0][2], "t");
    }

    #[test]
    fn test_decode_hint() {
        let body = br#"{"type":"crossword-hint","inputWord":"cat","inputQuestion":"Is it an animal?"}"#;
        let PostRequest::CrosswordHint(hint) = decode(body).unwrap() else {
            panic!("expected hint request");
        };
        assert_eq!(hint.input_word, "cat");
        assert_eq!(hint.input_question, "Is it an animal?");
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(decode(b"not json"), Err(DecodeError::Malformed(_))));
        assert!(matches!(decode(b""), Err(DecodeError::Malformed(_))));
    }

    #[test]
    fn test_unsupported_type() {
        for body in [
            &br#"{"type":"unknown"}"#[..],
            br#"{"topic":"space"}"#,
            br#"{"type":7}"#,
            br#"["words"]"#,
        ] {
            assert!(
                matches!(decode(body), Err(DecodeError::UnsupportedType)),
                "body: {}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn test_missing_field_is_invalid_payload() {
        let body = br#"{"type":"crossword-hint","inputWord":"cat"}"#;
        match decode(body) {
            Err(DecodeError::InvalidPayload { kind, .. }) => {
                assert_eq!(kind, RequestKind::CrosswordHint);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_field_is_invalid_payload() {
        let body = br#"{"type":"words","topic":"a","numOfWords":"1","difficultyLevel":"b","extra":true}"#;
        assert!(matches!(
            decode(body),
            Err(DecodeError::InvalidPayload {
                kind: RequestKind::Words,
                ..
            })
        ));
    }
}
