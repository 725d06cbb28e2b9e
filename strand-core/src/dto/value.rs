//! Wire encodings shared by calls and responses

use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier as the agent encodes it: `{"value": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IdValue {
    pub value: String,
}

impl IdValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// Accepts a 64-bit unsigned integer as a JSON number or a decimal string
///
/// The proto3 JSON mapping encodes 64-bit integers as strings, the agent's own
/// encoder as numbers.
pub(crate) fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    struct Visitor;

    impl serde::de::Visitor<'_> for Visitor {
        type Value = u64;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("an unsigned integer or a decimal string")
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<u64, E> {
            u64::try_from(v).map_err(|_| E::custom(format!("negative value: {}", v)))
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<u64, E> {
            v.parse()
                .map_err(|_| E::custom(format!("invalid unsigned integer: {:?}", v)))
        }
    }

    deserializer.deserialize_any(Visitor)
}

/// Decodes standard-alphabet base64 into raw bytes; `null` means no bytes
pub(crate) fn base64_bytes<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let encoded: Option<String> = Option::deserialize(deserializer)?;
    match encoded {
        Some(s) if !s.is_empty() => base64::engine::general_purpose::STANDARD
            .decode(s.as_bytes())
            .map_err(serde::de::Error::custom),
        _ => Ok(Vec::new()),
    }
}
