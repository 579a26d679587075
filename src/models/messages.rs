use serde::{Deserialize, Serialize};
use crate::error::SyncError;

/// Snapshot sent once, right after a connection is admitted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct InitMessage {
    pub content: String,
}

/// Content produced by another member's edit.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UpdateMessage {
    pub content: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum SendMessage {
    #[serde(rename = "init")]
    Init(InitMessage),
    #[serde(rename = "update")]
    Update(UpdateMessage),
}

impl SendMessage {
    pub fn init(content: impl Into<String>) -> Self {
        SendMessage::Init(InitMessage { content: content.into() })
    }

    pub fn update(content: impl Into<String>) -> Self {
        SendMessage::Update(UpdateMessage { content: content.into() })
    }
}

/// Edit received from a client. Any field besides `content` is ignored.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EditMessage {
    pub content: String,
}

impl EditMessage {
    pub fn parse(text: &str) -> Result<Self, SyncError> {
        serde_json::from_str(text).map_err(|e| SyncError::MalformedMessage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn outbound_messages_carry_type_tag() {
        let init = serde_json::to_value(SendMessage::init("hello")).unwrap();
        assert_eq!(init, json!({"type": "init", "content": "hello"}));

        let update = serde_json::to_value(SendMessage::update("v1")).unwrap();
        assert_eq!(update, json!({"type": "update", "content": "v1"}));
    }

    #[test]
    fn edit_ignores_extra_fields() {
        let edit = EditMessage::parse(r#"{"type":"edit","content":"abc","cursor":3}"#).unwrap();
        assert_eq!(edit.content, "abc");
    }

    #[test]
    fn edit_without_content_is_malformed() {
        for raw in [r#"{"text":"abc"}"#, r#"{"content":42}"#, "not json", "[]"] {
            assert!(
                matches!(EditMessage::parse(raw), Err(SyncError::MalformedMessage(_))),
                "{raw} should be rejected"
            );
        }
    }
}
