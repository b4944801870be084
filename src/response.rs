//! Response model handed to the inspector by the host engine.
//!
//! Every field is optional: hosts may hand over partial or malformed
//! exchanges, and those must still be inspected rather than rejected.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(default, deserialize_with = "lenient_status")]
    pub status_code: Option<u16>,
    #[serde(default, deserialize_with = "lenient_body")]
    pub body: Option<String>,
    #[serde(default, deserialize_with = "lenient_headers")]
    pub headers: BTreeMap<String, String>,
}

impl Response {
    pub fn new(status_code: u16) -> Self {
        Response {
            status_code: Some(status_code),
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Absent, or present with zero length.
    pub fn body_is_empty(&self) -> bool {
        self.body.as_deref().is_none_or(str::is_empty)
    }

    /// A missing status code never counts as >= 400.
    pub fn is_failure(&self) -> bool {
        self.status_code.is_some_and(|code| code >= 400) || self.body_is_empty()
    }

    /// Buffer a live reqwest response into the model.
    pub async fn from_reqwest(response: reqwest::Response) -> Result<Self, reqwest::Error> {
        let status_code = Some(response.status().as_u16());
        let headers = headers_from_map(response.headers());
        let body = Some(response.text().await?);
        Ok(Response {
            status_code,
            body,
            headers,
        })
    }
}

/// Header names are lowercased by `HeaderMap`; repeated headers are joined with `, `.
pub fn headers_from_map(map: &reqwest::header::HeaderMap) -> BTreeMap<String, String> {
    let mut headers: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in map {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        headers
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    headers
}

fn value_to_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn lenient_status<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_body<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Null => None,
        other => Some(value_to_text(other)),
    }))
}

fn lenient_headers<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Object(map)) => map
            .into_iter()
            .map(|(name, value)| (name, value_to_text(value)))
            .collect(),
        _ => BTreeMap::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::btreemap;
    use reqwest::header::{HeaderMap, HeaderValue};

    #[test]
    fn parses_complete_response() {
        let response: Response = serde_json::from_str(
            r#"{"statusCode": 500, "body": "server error", "headers": {"x-id": "1"}}"#,
        )
        .unwrap();
        assert_eq!(response.status_code, Some(500));
        assert_eq!(response.body.as_deref(), Some("server error"));
        assert_eq!(response.headers, btreemap! { "x-id".to_string() => "1".to_string() });
    }

    #[test]
    fn missing_fields_become_absent() {
        let response: Response = serde_json::from_str("{}").unwrap();
        assert_eq!(response, Response::default());
        assert!(response.is_failure());
    }

    #[test]
    fn wrong_typed_fields_do_not_abort() {
        let response: Response = serde_json::from_str(
            r#"{"statusCode": "abc", "body": null, "headers": ["not", "a", "map"]}"#,
        )
        .unwrap();
        assert_eq!(response.status_code, None);
        assert_eq!(response.body, None);
        assert!(response.headers.is_empty());
    }

    #[test]
    fn numeric_body_is_not_empty() {
        let response: Response =
            serde_json::from_str(r#"{"statusCode": 200, "body": 0}"#).unwrap();
        assert_eq!(response.body.as_deref(), Some("0"));
        assert!(!response.is_failure());
    }

    #[test]
    fn non_string_header_values_are_kept_as_json() {
        let response: Response =
            serde_json::from_str(r#"{"headers": {"retry-after": 5, "x-flag": true}}"#).unwrap();
        assert_eq!(response.headers["retry-after"], "5");
        assert_eq!(response.headers["x-flag"], "true");
    }

    #[test]
    fn classification() {
        assert!(!Response::new(200).with_body("ok").is_failure());
        assert!(!Response::new(399).with_body("ok").is_failure());
        assert!(Response::new(400).with_body("bad").is_failure());
        assert!(Response::new(200).with_body("").is_failure());
        assert!(Response::new(200).is_failure());
        assert!(!Response::default().with_body("ok").is_failure());
    }

    #[test]
    fn header_map_conversion_joins_repeats() {
        let mut map = HeaderMap::new();
        map.append("Set-Cookie", HeaderValue::from_static("a=1"));
        map.append("Set-Cookie", HeaderValue::from_static("b=2"));
        map.insert("X-Id", HeaderValue::from_static("1"));
        map.insert("X-Raw", HeaderValue::from_bytes(b"caf\xe9").unwrap());

        let headers = headers_from_map(&map);
        assert_eq!(headers["set-cookie"], "a=1, b=2");
        assert_eq!(headers["x-id"], "1");
        assert_eq!(headers["x-raw"], "caf\u{fffd}");
    }
}
