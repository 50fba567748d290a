// Licensed to Elasticsearch B.V. under one or more contributor
// license agreements. See the NOTICE file distributed with
// this work for additional information regarding copyright
// ownership. Elasticsearch B.V. licenses this file to you under
// the Apache License, Version 2.0 (the "License"); you may
// not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Query string encoding.
//!
//! Parameters are written in the order the endpoint declares them, followed
//! by `pretty`, `human`, `error_trace` and `filter_path`. Unset values never
//! appear in the output.

use crate::endpoint::ParamKind;
use crate::error::Error;
use crate::request::Request;
use std::time::Duration;

/// A typed query parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Bool(bool),
    String(String),
    List(Vec<String>),
    Integer(i64),
    Number(f64),
    Duration(Duration),
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::String(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::String(value)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(value: Vec<String>) -> Self {
        QueryValue::List(value)
    }
}

impl From<&[&str]> for QueryValue {
    fn from(value: &[&str]) -> Self {
        QueryValue::List(value.iter().map(|s| (*s).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for QueryValue {
    fn from(value: [&str; N]) -> Self {
        QueryValue::List(value.iter().map(|s| (*s).to_string()).collect())
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Integer(value)
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        QueryValue::Integer(i64::from(value))
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        QueryValue::Integer(i64::from(value))
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        QueryValue::Number(value)
    }
}

impl From<Duration> for QueryValue {
    fn from(value: Duration) -> Self {
        QueryValue::Duration(value)
    }
}

/// Parameters every endpoint accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonParams {
    pub pretty: bool,
    pub human: bool,
    pub error_trace: bool,
    pub filter_path: Vec<String>,
}

// Encodes the query parameters of a request.
//
// # Arguments
//
// * `request` - The validated request.
//
// # Returns
//
// Ordered key/value pairs, one per present parameter.
#[must_use]
pub fn encode(request: &Request) -> Vec<(String, String)> {
    let mut query = Vec::new();

    for param in request.endpoint().params {
        let Some(value) = request.param(param.name) else {
            continue;
        };
        if let Some(formatted) = format_value(param.kind, value) {
            insert(&mut query, param.name, formatted);
        }
    }

    let common = request.common();
    if common.pretty {
        insert(&mut query, "pretty", "true".to_string());
    }
    if common.human {
        insert(&mut query, "human", "true".to_string());
    }
    if common.error_trace {
        insert(&mut query, "error_trace", "true".to_string());
    }
    if !common.filter_path.is_empty() {
        insert(&mut query, "filter_path", common.filter_path.join(","));
    }

    query
}

/// Renders encoded pairs as an `application/x-www-form-urlencoded` string.
///
/// # Errors
///
/// Returns [`Error::FormEncode`] if the pairs cannot be serialized.
pub fn to_query_string(pairs: &[(String, String)]) -> Result<String, Error> {
    Ok(serde_urlencoded::to_string(pairs)?)
}

// Last write wins, keeping the position of the first write.
fn insert(query: &mut Vec<(String, String)>, key: &str, value: String) {
    if let Some(entry) = query.iter_mut().find(|(k, _)| k == key) {
        entry.1 = value;
    } else {
        query.push((key.to_string(), value));
    }
}

fn format_value(kind: ParamKind, value: &QueryValue) -> Option<String> {
    match (kind, value) {
        (ParamKind::Flag, QueryValue::Bool(true)) => Some("true".to_string()),
        (ParamKind::Flag, QueryValue::Bool(false)) => None,
        (_, QueryValue::Bool(b)) => Some(b.to_string()),
        (_, QueryValue::String(s)) if s.is_empty() => None,
        (_, QueryValue::String(s)) => Some(s.clone()),
        (_, QueryValue::List(items)) if items.is_empty() => None,
        (_, QueryValue::List(items)) => Some(items.join(",")),
        (_, QueryValue::Integer(i)) => Some(i.to_string()),
        (_, QueryValue::Number(n)) => Some(n.to_string()),
        (_, QueryValue::Duration(d)) if d.is_zero() => None,
        (_, QueryValue::Duration(d)) => Some(format_duration(*d)),
    }
}

/// Formats a duration the way Elasticsearch time units expect it, in the
/// coarsest of `ms`, `micros` and `nanos` that represents it exactly.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos % 1_000_000 == 0 {
        format!("{}ms", nanos / 1_000_000)
    } else if nanos % 1_000 == 0 {
        format!("{}micros", nanos / 1_000)
    } else {
        format!("{nanos}nanos")
    }
}

/// Parses an Elasticsearch time value such as `30s`, `1m` or `500ms`.
///
/// # Errors
///
/// Returns a message when the number or the unit is not recognized.
pub fn parse_duration(raw: &str) -> Result<Duration, String> {
    let split = raw
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(|| format!("missing time unit in `{raw}`"))?;
    let (amount, unit) = raw.split_at(split);
    let amount: u64 = amount
        .parse()
        .map_err(|_| format!("invalid time value `{raw}`"))?;

    let duration = match unit {
        "d" => Duration::from_secs(amount.saturating_mul(86_400)),
        "h" => Duration::from_secs(amount.saturating_mul(3_600)),
        "m" => Duration::from_secs(amount.saturating_mul(60)),
        "s" => Duration::from_secs(amount),
        "ms" => Duration::from_millis(amount),
        "micros" => Duration::from_micros(amount),
        "nanos" => Duration::from_nanos(amount),
        _ => return Err(format!("unknown time unit `{unit}` in `{raw}`")),
    };
    Ok(duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_duration_uses_millis_for_whole_milliseconds() {
        assert_eq!(format_duration(Duration::from_secs(30)), "30000ms");
        assert_eq!(format_duration(Duration::from_millis(1)), "1ms");
    }

    #[test]
    fn format_duration_keeps_sub_millisecond_precision() {
        assert_eq!(format_duration(Duration::from_micros(1500)), "1500micros");
        assert_eq!(format_duration(Duration::from_micros(250)), "250micros");
        assert_eq!(format_duration(Duration::from_nanos(1_000_007)), "1000007nanos");
        assert_eq!(format_duration(Duration::from_nanos(7)), "7nanos");
    }

    #[test]
    fn parse_duration_units() {
        assert_eq!(parse_duration("1d"), Ok(Duration::from_secs(86_400)));
        assert_eq!(parse_duration("2h"), Ok(Duration::from_secs(7_200)));
        assert_eq!(parse_duration("1m"), Ok(Duration::from_secs(60)));
        assert_eq!(parse_duration("500ms"), Ok(Duration::from_millis(500)));
        assert_eq!(parse_duration("10micros"), Ok(Duration::from_micros(10)));
        assert_eq!(parse_duration("3nanos"), Ok(Duration::from_nanos(3)));
    }

    #[test]
    fn parse_duration_rejects_garbage() {
        assert!(parse_duration("10").is_err());
        assert!(parse_duration("s").is_err());
        assert!(parse_duration("10weeks").is_err());
    }

    #[test]
    fn flag_false_is_omitted_but_boolean_false_is_kept() {
        assert_eq!(format_value(ParamKind::Flag, &QueryValue::Bool(false)), None);
        assert_eq!(
            format_value(ParamKind::Boolean, &QueryValue::Bool(false)),
            Some("false".to_string())
        );
    }

    #[test]
    fn empty_values_are_omitted() {
        assert_eq!(
            format_value(ParamKind::String, &QueryValue::String(String::new())),
            None
        );
        assert_eq!(format_value(ParamKind::List, &QueryValue::List(vec![])), None);
        assert_eq!(
            format_value(ParamKind::Duration, &QueryValue::Duration(Duration::ZERO)),
            None
        );
    }

    #[test]
    fn insert_overwrites_existing_key_in_place() {
        let mut query = vec![("a".to_string(), "1".to_string())];
        insert(&mut query, "b", "2".to_string());
        insert(&mut query, "a", "3".to_string());
        assert_eq!(
            query,
            vec![
                ("a".to_string(), "3".to_string()),
                ("b".to_string(), "2".to_string())
            ]
        );
    }

    #[test]
    fn to_query_string_escapes_values() {
        let pairs = vec![("q".to_string(), "user:kimchy AND age>3".to_string())];
        assert_eq!(
            to_query_string(&pairs).unwrap(),
            "q=user%3Akimchy+AND+age%3E3"
        );
    }
}
