//! Messages stored in the conversation log.

use pairline_common::{ConversationError, MessageId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Text of the reply synthesized when a turn goes unanswered.
pub const PLACEHOLDER_TEXT: &str = "Sorry, no replies as yet";

/// Field every payload must carry as a non-empty string.
const TEXT_FIELD: &str = "message";

/// Keys owned by the log; caller-supplied values for them are discarded.
const RESERVED_FIELDS: [&str; 2] = ["id", "replyId"];

/// A single entry in the conversation.
///
/// Caller-supplied payload fields are flattened next to `id` and `replyId`
/// when serialized, so a message round-trips as one flat JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(flatten)]
    payload: Map<String, Value>,
    id: MessageId,
    #[serde(rename = "replyId", default, skip_serializing_if = "Option::is_none")]
    reply_id: Option<MessageId>,
}

impl Message {
    /// Build an unpaired message from a raw JSON payload.
    ///
    /// Rejects anything that is not an object with a non-empty `message`
    /// string.
    pub(crate) fn from_payload(id: MessageId, payload: Value) -> Result<Self, ConversationError> {
        let Value::Object(mut payload) = payload else {
            return Err(ConversationError::InvalidPayload(
                "payload must be a JSON object".into(),
            ));
        };

        match payload.get(TEXT_FIELD) {
            Some(Value::String(text)) if !text.is_empty() => {}
            _ => {
                return Err(ConversationError::InvalidPayload(format!(
                    "`{TEXT_FIELD}` must be a non-empty string"
                )));
            }
        }

        for key in RESERVED_FIELDS {
            payload.remove(key);
        }

        Ok(Self {
            payload,
            id,
            reply_id: None,
        })
    }

    /// The auto-generated stand-in reply, not yet paired.
    pub(crate) fn placeholder(id: MessageId) -> Self {
        let mut payload = Map::new();
        payload.insert(TEXT_FIELD.into(), Value::String(PLACEHOLDER_TEXT.into()));
        Self {
            payload,
            id,
            reply_id: None,
        }
    }

    /// Record the partner of this message. A message is paired at most once.
    pub(crate) fn pair_with(&mut self, partner: MessageId) {
        debug_assert!(
            self.reply_id.is_none(),
            "message {} is already paired",
            self.id
        );
        self.reply_id = Some(partner);
    }

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn reply_id(&self) -> Option<&MessageId> {
        self.reply_id.as_ref()
    }

    pub fn is_paired(&self) -> bool {
        self.reply_id.is_some()
    }

    /// The `message` text of the payload.
    pub fn text(&self) -> &str {
        self.payload
            .get(TEXT_FIELD)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Caller-supplied fields, excluding `id` and `replyId`.
    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }
}
