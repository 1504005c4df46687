use super::DecodeError;
use common::position::Fix;
use serde::Serialize;
use serde_json::Value;

/// rosbridge op of a message published on a topic.
pub const PUBLISH_OP: &str = "publish";

/// Request that makes rosbridge forward all messages of a topic.
#[derive(Debug, Serialize)]
pub struct SubscribeRequest<'a> {
    op: &'static str,
    topic: &'a str,
}

impl<'a> SubscribeRequest<'a> {
    pub fn new(topic: &'a str) -> Self {
        SubscribeRequest {
            op: "subscribe",
            topic,
        }
    }

    /// The request as one newline terminated JSON line.
    pub fn to_line(&self) -> Result<String, serde_json::Error> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}

/// Decodes a rosbridge publish event of `topic`.
///
/// The event must look like
/// `{"op":"publish","topic":"<topic>","msg":{"latitude":..,"longitude":..}}`.
pub fn decode(value: &Value, topic: &str) -> Result<Fix, DecodeError> {
    let event = value.as_object().ok_or(DecodeError::NotAnObject)?;
    let op = event
        .get("op")
        .and_then(Value::as_str)
        .ok_or(DecodeError::MissingField("op"))?;
    if op != PUBLISH_OP {
        return Err(DecodeError::UnexpectedOp(op.to_owned()));
    }
    let actual = event
        .get("topic")
        .and_then(Value::as_str)
        .ok_or(DecodeError::MissingField("topic"))?;
    if actual != topic {
        return Err(DecodeError::TopicMismatch {
            expected: topic.to_owned(),
            actual: actual.to_owned(),
        });
    }
    let msg = event.get("msg").ok_or(DecodeError::MissingField("msg"))?;
    let latitude = number(msg, "latitude")?;
    let longitude = number(msg, "longitude")?;
    Ok(Fix::new(latitude, longitude)?)
}

fn number(msg: &Value, key: &'static str) -> Result<f64, DecodeError> {
    msg.get(key)
        .ok_or(DecodeError::MissingField(key))?
        .as_f64()
        .ok_or(DecodeError::NotNumeric(key))
}
