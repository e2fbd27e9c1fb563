use serde_json::Value;

use super::{
    errors::{ProtocolError, Result},
    messages::{ClientMessage, ServerMessage},
};

/// Maximum allowed frame size (1MB). Nothing the server sends comes close.
pub const MAX_FRAME_SIZE: usize = 1024 * 1024;

/// A decoded server frame together with the type string it carried, so
/// unknown types can still be named in logs.
#[derive(Clone, Debug, PartialEq)]
pub struct Inbound {
    pub message_type: String,
    pub message: ServerMessage,
}

/// Decode one text frame.
///
/// Anything that isn't a JSON object with a string `message_type` is a
/// malformation, as is a known type with missing or invalid fields. A
/// well-formed object with an unrecognized type decodes successfully as
/// [`ServerMessage::Unknown`].
pub fn decode_frame(frame: &str) -> Result<Inbound> {
    if frame.len() > MAX_FRAME_SIZE {
        return Err(ProtocolError::FrameTooLarge {
            actual: frame.len(),
            max: MAX_FRAME_SIZE,
        });
    }

    let value: Value = serde_json::from_str(frame).map_err(ProtocolError::Malformed)?;
    let Some(object) = value.as_object() else {
        return Err(ProtocolError::NotAnObject);
    };
    let message_type = object
        .get("message_type")
        .and_then(Value::as_str)
        .ok_or(ProtocolError::MissingDiscriminator)?
        .to_string();

    match serde_json::from_value(value) {
        Ok(message) => Ok(Inbound {
            message_type,
            message,
        }),
        Err(source) => Err(ProtocolError::InvalidMessage {
            message_type,
            source,
        }),
    }
}

pub fn encode_message(message: &ClientMessage) -> Result<String> {
    serde_json::to_string(message).map_err(ProtocolError::Encode)
}
