use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A classified lexeme as reported by the tokenization service.
///
/// Positions are kept signed: grammar engines report `-1` sentinels for
/// synthetic tokens such as EOF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    #[serde(rename = "type")]
    pub token_type: String,
    /// 1-based row.
    pub line: i64,
    /// 0-based offset within the row.
    pub column: i64,
    pub channel: i64,
    pub token_index: i64,
    pub start: i64,
    pub stop: i64,
}

impl Token {
    /// JSON object with fields in wire order.
    pub fn to_json(&self) -> Value {
        json!({
            "text": self.text,
            "type": self.token_type,
            "line": self.line,
            "column": self.column,
            "channel": self.channel,
            "token_index": self.token_index,
            "start": self.start,
            "stop": self.stop,
        })
    }

    pub fn is_default_channel(&self) -> bool {
        self.channel == 0
    }
}
