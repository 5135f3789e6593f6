//! Wire types for the two HTTP endpoints. Client ↔ server JSON.

use serde::{Deserialize, Serialize};

/// Body of `POST /chat/invoke`: `{"input": {"question": ..., "chat_history": []}}`.
#[derive(Debug, Clone, Serialize)]
pub struct InvokeRequest<'a> {
    pub input: InvokeInput<'a>,
}

/// The `input` object of an invoke request.
#[derive(Debug, Clone, Serialize)]
pub struct InvokeInput<'a> {
    pub question: &'a str,
    /// Always sent empty; every call is stateless from the client side.
    pub chat_history: Vec<(String, String)>,
}

impl<'a> InvokeRequest<'a> {
    pub fn new(question: &'a str) -> Self {
        Self {
            input: InvokeInput {
                question,
                chat_history: Vec::new(),
            },
        }
    }
}

/// Server → client: invoke response. Unknown fields (`metadata`, ...) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct InvokeResponse {
    pub output: InvokeOutput,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InvokeOutput {
    pub answer: String,
}

/// The remote `config.json` document. Every field is optional; a field that is
/// not a string is treated as absent without discarding its siblings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default, deserialize_with = "string_or_none", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "string_or_none", skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(default, deserialize_with = "string_or_none", skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}
