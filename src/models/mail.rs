use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One address or a list of addresses, as accepted by the relay endpoint.
///
/// Entries are kept as raw JSON; the provider judges whether they are valid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Recipients {
    Many(Vec<Value>),
    One(Value),
}

impl Recipients {
    pub fn into_vec(self) -> Vec<Value> {
        match self {
            Recipients::Many(list) => list,
            Recipients::One(email) => vec![email],
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Recipients::Many(list) => list.is_empty(),
            Recipients::One(email) => !is_truthy(email),
        }
    }
}

/// JavaScript-style truthiness, which is how clients of this API expect
/// optional fields to be read.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Body of `POST /api/send-email`
#[derive(Debug, Clone, Deserialize)]
pub struct SendEmailRequest {
    #[serde(default)]
    pub to: Option<Recipients>,
    #[serde(default)]
    pub cc: Option<Recipients>,
    #[serde(default)]
    pub bcc: Option<Recipients>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
}

/// Body of `POST /api/contact`
///
/// A field counts as present when it is truthy. Non-string values are kept
/// as text: numbers as written (phone numbers often arrive unquoted), arrays
/// and objects as their JSON form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactRequest {
    #[serde(default, deserialize_with = "truthy_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "truthy_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "truthy_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "truthy_text")]
    pub message: Option<String>,
}

fn truthy_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.filter(is_truthy).map(|v| match v {
        Value::String(s) => s,
        other => other.to_string(),
    }))
}

/// Successful relay, echoing the provider's response
#[derive(Debug, Serialize, Deserialize)]
pub struct RelayResponse {
    pub success: bool,
    pub response: Value,
}

impl RelayResponse {
    pub fn delivered(response: Value) -> Self {
        Self {
            success: true,
            response,
        }
    }
}
