//! Raw task parameters and the typed accessors the resolver builds on.
//!
//! Task runners hand over a flat JSON object. Values are usually strings,
//! but numbers and booleans are accepted and stringified (a port often
//! arrives as `443` rather than `"443"`). `null` is treated as absent.

use serde_json::{Map, Value};

use crate::error::CoreError;

/// Parameter names understood by the resolver.
pub mod keys {
    pub const DEVICE_NAME: &str = "device_name";
    pub const DEVICE_PORT: &str = "device_port";
    pub const API_USER: &str = "api_user";
    pub const API_PASSWORD: &str = "api_password";
    pub const DEVICE_GROUP: &str = "device_group";
    pub const NODE_NAME: &str = "node_name";
    pub const NODE_STATE: &str = "node_state";
    pub const POOL_NAME: &str = "pool_name";
    pub const PARTITION_NAME: &str = "partition_name";
    pub const MEMBER_NAME: &str = "member_name";
    pub const MEMBER_STATE: &str = "member_state";
    pub const TARGET_USER: &str = "target_user";
    pub const TARGET_PASSWORD_HASH: &str = "target_password_hash";
    pub const FILE_PATH: &str = "file_path";
    pub const FILE_NAME: &str = "file_name";
}

/// A key→value mapping of task parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(Map<String, Value>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already-parsed JSON value; anything but an object is rejected.
    pub fn from_value(value: Value) -> Result<Self, CoreError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(CoreError::InvalidParameters {
                found: json_type_name(&other).into(),
            }),
        }
    }

    /// Parse a JSON document (e.g. a task's stdin).
    pub fn from_json(input: &str) -> Result<Self, CoreError> {
        let value: Value =
            serde_json::from_str(input).map_err(|e| CoreError::InvalidParameters {
                found: format!("malformed JSON ({e})"),
            })?;
        Self::from_value(value)
    }

    /// Set a parameter, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style [`insert`](Self::insert) that skips `None`.
    pub fn with(mut self, key: &str, value: Option<impl Into<Value>>) -> Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// The parameter as a string, or `None` if absent or `null`.
    ///
    /// Arrays and objects are not valid parameter values and read as
    /// their compact JSON text.
    pub fn get(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// A required identifier. Absent, `null`, and blank all fail.
    pub fn required(&self, key: &'static str) -> Result<String, CoreError> {
        match self.get(key) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(CoreError::MissingParameter { name: key }),
        }
    }

    /// An optional value with a default. Present values are kept as-is,
    /// including empty strings.
    pub fn or_default(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_owned())
    }

    /// An optional identifier with a default. Present-but-blank fails,
    /// since it would leave an empty segment in the resource path.
    pub fn identifier_or(&self, key: &'static str, default: &str) -> Result<String, CoreError> {
        match self.get(key) {
            None => Ok(default.to_owned()),
            Some(value) if value.trim().is_empty() => Err(CoreError::InvalidParameter {
                name: key,
                reason: "must not be blank".into(),
            }),
            Some(value) => Ok(value),
        }
    }

    /// A required identifier that becomes one resource path segment.
    pub fn segment(&self, key: &'static str) -> Result<String, CoreError> {
        let value = self.required(key)?;
        check_segment(key, &value)?;
        Ok(value)
    }

    /// A defaulted identifier that becomes one resource path segment.
    pub fn segment_or(&self, key: &'static str, default: &str) -> Result<String, CoreError> {
        let value = self.identifier_or(key, default)?;
        check_segment(key, &value)?;
        Ok(value)
    }

    /// A TCP port, accepted as a JSON number or a numeric string.
    pub fn port(&self, key: &'static str, default: u16) -> Result<u16, CoreError> {
        let Some(raw) = self.get(key) else {
            return Ok(default);
        };
        match raw.trim().parse::<u16>() {
            Ok(0) => Err(CoreError::InvalidParameter {
                name: key,
                reason: "port must be between 1 and 65535".into(),
            }),
            Ok(port) => Ok(port),
            Err(_) => Err(CoreError::InvalidParameter {
                name: key,
                reason: format!("expected a port number, got {raw:?}"),
            }),
        }
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Rejects values the URL parser would not pass through unchanged: path
/// and query delimiters, whitespace, control characters, and dot segments
/// (including their `%2e` spellings). Nothing is ever encoded.
fn check_segment(key: &'static str, value: &str) -> Result<(), CoreError> {
    let invalid = |reason: String| CoreError::InvalidParameter { name: key, reason };

    if let Some(c) = value
        .chars()
        .find(|c| matches!(c, '/' | '\\' | '?' | '#') || c.is_whitespace() || c.is_control())
    {
        return Err(invalid(format!("{c:?} is not allowed in a resource name")));
    }

    let unescaped = value.to_ascii_lowercase().replace("%2e", ".");
    if unescaped == "." || unescaped == ".." {
        return Err(invalid(format!("{value:?} is not a resource name")));
    }
    Ok(())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn params(value: Value) -> Params {
        Params::from_value(value).unwrap()
    }

    #[test]
    fn rejects_non_object() {
        let err = Params::from_value(json!(["device_name"])).unwrap_err();
        assert!(matches!(err, CoreError::InvalidParameters { .. }));
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = Params::from_json("{\"device_name\":").unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn null_reads_as_absent() {
        let p = params(json!({ "api_user": null }));
        assert_eq!(p.get("api_user"), None);
        assert_eq!(p.or_default("api_user", "admin"), "admin");
    }

    #[test]
    fn numbers_are_stringified() {
        let p = params(json!({ "node_name": 10 }));
        assert_eq!(p.get("node_name").as_deref(), Some("10"));
    }

    #[test]
    fn required_rejects_blank() {
        let p = params(json!({ "node_name": "   " }));
        let err = p.required(keys::NODE_NAME).unwrap_err();
        assert!(matches!(err, CoreError::MissingParameter { name: "node_name" }));
    }

    #[test]
    fn or_default_keeps_empty_strings() {
        let p = params(json!({ "api_password": "" }));
        assert_eq!(p.or_default(keys::API_PASSWORD, "admin"), "");
    }

    #[test]
    fn identifier_or_rejects_blank() {
        let p = params(json!({ "partition_name": "" }));
        assert!(p.identifier_or(keys::PARTITION_NAME, "Common").is_err());
        assert_eq!(
            Params::new()
                .identifier_or(keys::PARTITION_NAME, "Common")
                .unwrap(),
            "Common"
        );
    }

    #[test]
    fn segment_keeps_member_and_route_domain_syntax() {
        let p = params(json!({
            "member_name": "10.0.0.5%1:80",
            "node_name": "app-01.example.com",
        }));
        assert_eq!(p.segment(keys::MEMBER_NAME).unwrap(), "10.0.0.5%1:80");
        assert_eq!(p.segment(keys::NODE_NAME).unwrap(), "app-01.example.com");
    }

    #[test]
    fn segment_rejects_values_that_escape_their_path() {
        for bad in [
            "../../ltm/node/node1",
            "node one",
            "n?x=1#frag",
            "a#b",
            "a\\b",
            "tab\there",
            "nul\u{0}",
            ".",
            "..",
            "%2e%2E",
            ".%2e",
        ] {
            let p = params(json!({ "node_name": bad }));
            let err = p.segment(keys::NODE_NAME).unwrap_err();
            assert!(
                matches!(err, CoreError::InvalidParameter { name: "node_name", .. }),
                "{bad:?} -> {err:?}"
            );
        }
    }

    #[test]
    fn segment_still_reports_missing_as_missing() {
        let err = params(json!({})).segment(keys::POOL_NAME).unwrap_err();
        assert!(matches!(err, CoreError::MissingParameter { name: "pool_name" }));
    }

    #[test]
    fn segment_or_checks_supplied_values_only() {
        assert_eq!(
            params(json!({})).segment_or(keys::PARTITION_NAME, "Common").unwrap(),
            "Common"
        );
        let p = params(json!({ "partition_name": "Common/../x" }));
        assert!(p.segment_or(keys::PARTITION_NAME, "Common").is_err());
    }

    #[test]
    fn port_accepts_string_or_number() {
        assert_eq!(params(json!({})).port(keys::DEVICE_PORT, 443).unwrap(), 443);
        assert_eq!(
            params(json!({ "device_port": "8443" }))
                .port(keys::DEVICE_PORT, 443)
                .unwrap(),
            8443
        );
        assert_eq!(
            params(json!({ "device_port": 10443 }))
                .port(keys::DEVICE_PORT, 443)
                .unwrap(),
            10443
        );
    }

    #[test]
    fn port_rejects_garbage() {
        for bad in [json!("https"), json!(70000), json!(0), json!(-1), json!(44.3)] {
            let p = params(json!({ "device_port": bad }));
            assert!(p.port(keys::DEVICE_PORT, 443).is_err(), "{bad}");
        }
    }
}
