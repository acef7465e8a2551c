//! Lenient decoding helpers for model output.
//!
//! The model is asked for JSON but routinely wraps it in fences or prose, returns a scalar
//! where a list was requested, or quotes numbers. These helpers absorb those deviations;
//! anything they cannot absorb is a malformed response.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Locates the JSON object inside a model reply.
///
/// Order: a ```json fenced block, then the span from the first `{` to the last `}`.
pub fn extract_json_block(text: &str) -> Option<&str> {
    if let Some(start) = text.find("```json") {
        let body = &text[start + "```json".len()..];
        let end = body.find("```").unwrap_or(body.len());
        let block = body[..end].trim();
        if !block.is_empty() {
            return Some(block);
        }
    }

    let open = text.find('{')?;
    let close = text.rfind('}')?;
    if close <= open {
        return None;
    }
    Some(&text[open..=close])
}

fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => {
            let s = s.trim().to_string();
            (!s.is_empty()).then_some(s)
        }
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Accepts a list of scalars, a single scalar, or null.
pub fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.into_iter().filter_map(value_to_string).collect(),
        other => value_to_string(other).into_iter().collect(),
    })
}

/// Accepts any scalar and renders it as text. Null becomes an empty string.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_string(value).unwrap_or_default())
}

/// Accepts `85`, `0.85`, `"85"` or `"85%"`.
pub fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match &value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| serde::de::Error::custom("score is not a finite number")),
        Value::String(s) => s
            .trim()
            .trim_end_matches('%')
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("score '{s}' is not numeric"))),
        _ => Err(serde::de::Error::custom("score must be a number")),
    }
}

/// Normalises a score that should live in [0, 1]. Percent-style values are scaled down.
pub fn unit_score(raw: f64) -> Result<f64, String> {
    if !raw.is_finite() {
        return Err(format!("score {raw} is not finite"));
    }
    let scaled = if raw > 1.0 && raw <= 100.0 {
        raw / 100.0
    } else {
        raw
    };
    Ok(scaled.clamp(0.0, 1.0))
}

/// Normalises a score that should live in [0, 100]. Fraction-style values are scaled up.
pub fn percent_score(raw: f64) -> Result<u32, String> {
    if !raw.is_finite() {
        return Err(format!("score {raw} is not finite"));
    }
    let scaled = if raw > 0.0 && raw < 1.0 {
        raw * 100.0
    } else {
        raw
    };
    Ok(scaled.round().clamp(0.0, 100.0) as u32)
}

/// Entry / mid / senior salary bands as free text ("90k-120k USD").
///
/// Decodes from an object of bands or from a single string. A lone string such as
/// "$80k-$150k" is kept as the mid-level band; missing bands read "N/A".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryBands {
    pub entry_level: String,
    pub mid_level: String,
    pub senior_level: String,
}

impl<'de> Deserialize<'de> for SalaryBands {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let bands = match value {
            Value::Object(mut map) => {
                let mut band = |key: &str| {
                    map.remove(key)
                        .and_then(value_to_string)
                        .unwrap_or_else(not_available)
                };
                Self {
                    entry_level: band("entry_level"),
                    mid_level: band("mid_level"),
                    senior_level: band("senior_level"),
                }
            }
            other => match value_to_string(other) {
                Some(text) => Self {
                    mid_level: text,
                    ..Self::unavailable()
                },
                None => Self::unavailable(),
            },
        };
        Ok(bands)
    }
}

impl SalaryBands {
    pub fn unavailable() -> Self {
        Self {
            entry_level: not_available(),
            mid_level: not_available(),
            senior_level: not_available(),
        }
    }
}

impl Default for SalaryBands {
    fn default() -> Self {
        Self::unavailable()
    }
}

fn not_available() -> String {
    "N/A".to_string()
}
