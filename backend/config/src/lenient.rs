//! Tolerant scalar parsing for hand-edited config files.
//!
//! Host-generated files sometimes carry `"true"`, `1`, or `"3000"` where a
//! typed value is expected. These helpers accept the common spellings and
//! fall back to the field default where the reference behavior does.

use serde::de::{self, Deserializer, IgnoredAny};
use serde::Deserialize;

/// Interpret a string as a boolean: `1/true/yes/y/on` or `0/false/no/n/off`.
pub fn parse_bool_like(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolLike {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

fn bool_like<'de, D>(deserializer: D, default: bool) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match BoolLike::deserialize(deserializer)? {
        BoolLike::Bool(b) => b,
        BoolLike::Int(i) => i != 0,
        BoolLike::Float(f) => f != 0.0,
        BoolLike::Text(s) => parse_bool_like(&s).unwrap_or(default),
        BoolLike::Other(_) => default,
    })
}

pub(crate) fn bool_default_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    bool_like(deserializer, true)
}

pub(crate) fn bool_default_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    bool_like(deserializer, false)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PortLike {
    Int(i64),
    Text(String),
}

/// Accept a port as an integer or a numeric string.
pub(crate) fn port<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match PortLike::deserialize(deserializer)? {
        PortLike::Int(i) => u16::try_from(i).ok(),
        PortLike::Text(s) => s.trim().parse::<u16>().ok(),
    };
    parsed.ok_or_else(|| de::Error::custom("napcat_port must be an integer between 0 and 65535"))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScalarLike {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// Accept any scalar where text is expected; `123456` becomes `"123456"`.
pub(crate) fn string_like<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match ScalarLike::deserialize(deserializer)? {
        ScalarLike::Bool(b) => b.to_string(),
        ScalarLike::Int(i) => i.to_string(),
        ScalarLike::Float(f) => f.to_string(),
        ScalarLike::Text(s) => s,
    })
}

fn count_like<'de, D>(deserializer: D, key: &str) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match PortLike::deserialize(deserializer)? {
        PortLike::Int(i) => u64::try_from(i).ok(),
        PortLike::Text(s) => s.trim().parse::<u64>().ok(),
    };
    parsed.ok_or_else(|| de::Error::custom(format!("{key} must be a non-negative integer")))
}

/// Non-negative integer given as a number or a numeric string.
pub(crate) fn u64_like<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    count_like(deserializer, "timeout_secs")
}

pub(crate) fn usize_like<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let n = count_like(deserializer, "min_reason_length")?;
    usize::try_from(n).map_err(|_| de::Error::custom("min_reason_length is too large"))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdLike {
    Text(String),
    Int(i64),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListLike {
    List(Vec<IdLike>),
    Other(IgnoredAny),
}

/// User-id list: strings or integers, trimmed, blanks dropped. Non-lists become empty.
pub(crate) fn id_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let ListLike::List(items) = ListLike::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            IdLike::Text(s) => Some(s.trim().to_string()),
            IdLike::Int(i) => Some(i.to_string()),
            IdLike::Other(_) => None,
        })
        .filter(|s| !s.is_empty())
        .collect())
}
