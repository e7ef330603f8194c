//! Payloads exchanged with chat bridges over HTTP and WebSocket.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::dto::validation::{validate_identity, validate_text};

/// A chat message relayed by a bridge: who wrote what, where.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct InboundChatMessage {
    /// Display identity of the author (push name or phone number).
    #[validate(custom(function = validate_identity))]
    pub sender: String,
    /// Identifier of the chat the message was posted in.
    #[validate(custom(function = validate_identity))]
    pub chat: String,
    /// Raw message body.
    #[validate(custom(function = validate_text))]
    pub text: String,
}

/// Answer to a relayed message. `reply` is absent when the bot stays silent.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChatReply {
    /// Text to post back in the chat.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
}

/// Frames accepted from bridge WebSocket clients.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(tag = "type")]
pub enum BridgeInboundMessage {
    /// One chat message to run through the bot.
    #[serde(rename = "message")]
    Message {
        /// Display identity of the author.
        sender: String,
        /// Chat the message was posted in.
        chat: String,
        /// Raw message body.
        text: String,
        /// Bridge-side identifier echoed back in the reply.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message_id: Option<String>,
    },
    /// Any other frame type; ignored.
    #[serde(other)]
    Unknown,
}

/// A validated chat message relayed over WebSocket, with its bridge-side id.
pub type RelayedMessage = (InboundChatMessage, Option<String>);

impl BridgeInboundMessage {
    /// Parse and validate a text frame. Frames of unknown type yield `None`.
    pub fn from_json_str(raw: &str) -> Result<Option<RelayedMessage>, BridgeFrameError> {
        let Self::Message {
            sender,
            chat,
            text,
            message_id,
        } = serde_json::from_str(raw)?
        else {
            return Ok(None);
        };

        let message = InboundChatMessage { sender, chat, text };
        message.validate()?;
        Ok(Some((message, message_id)))
    }
}

/// Reasons an inbound bridge frame is rejected.
#[derive(Debug, thiserror::Error)]
pub enum BridgeFrameError {
    /// The frame is not valid JSON for any known shape.
    #[error("malformed frame: {0}")]
    Json(#[from] serde_json::Error),
    /// The message failed field validation.
    #[error("invalid message: {0}")]
    Invalid(#[from] ValidationErrors),
}

/// Frames pushed to bridge WebSocket clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "type")]
pub enum BridgeOutboundMessage {
    /// Text the bridge should post in `chat`.
    #[serde(rename = "reply")]
    Reply {
        /// Chat to post in.
        chat: String,
        /// `message_id` of the frame being answered, when it carried one.
        #[serde(skip_serializing_if = "Option::is_none")]
        in_reply_to: Option<String>,
        /// Reply body.
        text: String,
    },
}
