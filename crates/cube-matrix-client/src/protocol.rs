//! Wire protocol framing for the fixture's JSON/TCP control channel.
//!
//! Requests are CRLF-terminated UTF-8 JSON objects
//! `{"id": <int>, "method": <string>, "params": <array>}`. Replies are
//! JSON objects carrying either a `result` array or an `error` object;
//! the fixture also pushes unsolicited `{"method": "props", ...}` frames
//! that must be absorbed, not returned.

use serde::Serialize;
use serde_json::{Map, Value};

/// Default TCP control port of the fixture.
pub const DEFAULT_PORT: u16 = 55443;

/// Transition duration in milliseconds used by the smooth-effect
/// convenience commands.
pub const EFFECT_DURATION_MS: u32 = 500;

/// A single outgoing command frame.
#[derive(Debug, Serialize)]
pub struct Request {
    pub id: u64,
    pub method: String,
    pub params: Vec<Value>,
}

impl Request {
    /// Serializes the frame, CRLF terminator included.
    pub fn frame(&self) -> serde_json::Result<String> {
        let mut frame = serde_json::to_string(self)?;
        frame.push_str("\r\n");
        Ok(frame)
    }
}

/// A classified incoming frame.
#[derive(Debug)]
pub enum Frame {
    /// Unsolicited device-property push; the params object is merged
    /// into the client's cache.
    Props(Map<String, Value>),
    /// A reply to a command (possibly a device-reported error).
    Reply(Value),
}

/// Sorts an incoming frame into a props push or a command reply.
pub fn classify(value: Value) -> Frame {
    if value.get("method").and_then(Value::as_str) == Some("props") {
        let params = match value.get("params") {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        };
        Frame::Props(params)
    } else {
        Frame::Reply(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_frame() {
        let request = Request {
            id: 1,
            method: "set_power".to_string(),
            params: vec![json!("on"), json!("smooth"), json!(500)],
        };
        assert_eq!(
            request.frame().unwrap(),
            "{\"id\":1,\"method\":\"set_power\",\"params\":[\"on\",\"smooth\",500]}\r\n"
        );
    }

    #[test]
    fn test_classify_props() {
        let frame = classify(json!({"method": "props", "params": {"power": "on"}}));
        match frame {
            Frame::Props(params) => assert_eq!(params.get("power"), Some(&json!("on"))),
            Frame::Reply(_) => panic!("props frame classified as reply"),
        }
    }

    #[test]
    fn test_classify_props_without_params() {
        let frame = classify(json!({"method": "props"}));
        assert!(matches!(frame, Frame::Props(params) if params.is_empty()));
    }

    #[test]
    fn test_classify_reply() {
        let frame = classify(json!({"id": 3, "result": ["ok"]}));
        match frame {
            Frame::Reply(value) => assert_eq!(value["result"], json!(["ok"])),
            Frame::Props(_) => panic!("reply classified as props"),
        }
    }
}
