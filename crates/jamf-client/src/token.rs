use reqwest::StatusCode;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::{Error, ErrorKind, Result};

/// An authentication token issued by the server.
///
/// The token is returned to the caller as-is: it is neither stored nor
/// validated against its expiry.
///
/// Keys are matched case-insensitively, with the exact `Token` and `Expires`
/// spellings taking precedence. A missing or `null` key leaves the
/// corresponding field empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenResponse {
    /// Bearer token.
    pub token: String,
    /// Token expiry.
    pub expires: i64,
}

// Looks up a key, falling back to a case-insensitive match.
fn field<'a>(fields: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    fields.get(name).or_else(|| {
        fields
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    })
}

impl<'de> Deserialize<'de> for TokenResponse {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(fields) = Option::<Map<String, Value>>::deserialize(deserializer)? else {
            return Ok(Self::default());
        };

        let token = match field(&fields, "Token") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(token)) => token.clone(),
            Some(value) => {
                return Err(serde::de::Error::custom(format!(
                    "invalid `Token` value: {value}"
                )));
            }
        };

        let expires = match field(&fields, "Expires") {
            None | Some(Value::Null) => 0,
            Some(value) => value.as_i64().ok_or_else(|| {
                serde::de::Error::custom(format!("invalid `Expires` value: {value}"))
            })?,
        };

        Ok(Self { token, expires })
    }
}

impl TokenResponse {
    pub(crate) fn from_json(body: &[u8], status: StatusCode) -> Result<Self> {
        serde_json::from_slice(body).map_err(|e| {
            Error::new(
                ErrorKind::JsonResponse,
                format!("Token response with status {status} is not valid: {e}"),
            )
        })
    }
}
