//! Command model for the vendor command queue.
//!
//! A command is an ordered tuple `[name, ...args]`. The vendor loader replays
//! commands in append order once it has loaded, so a `Command` serializes to a
//! plain JSON array rather than an object.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Parameter mapping attached to `config` and `event` commands.
pub type EventParams = serde_json::Map<String, Value>;

/// Command names understood by the vendor loader.
pub mod command_names {
    /// Timestamp bootstrap command.
    pub const JS: &str = "js";
    /// Property configuration command.
    pub const CONFIG: &str = "config";
    /// Event command.
    pub const EVENT: &str = "event";
}

/// Recommended event names.
pub mod event_names {
    pub const PAGE_VIEW: &str = "page_view";
    pub const LOGIN: &str = "login";
}

/// One entry of the command queue.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    /// Command name (`js`, `config`, `event`, or anything custom).
    pub name: String,
    /// Positional arguments following the name.
    pub args: Vec<Value>,
}

impl Command {
    pub fn new(name: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Timestamp bootstrap: `["js", <at>]`.
    ///
    /// The time travels as an RFC 3339 string; browser queues turn it back
    /// into a `Date` before handing it to the loader.
    pub fn js(at: DateTime<Utc>) -> Self {
        Self::new(
            command_names::JS,
            vec![Value::String(
                at.to_rfc3339_opts(SecondsFormat::Millis, true),
            )],
        )
    }

    /// Property configuration: `["config", <measurement id>, <options>]`.
    pub fn config(measurement_id: impl Into<String>, options: EventParams) -> Self {
        Self::new(
            command_names::CONFIG,
            vec![Value::String(measurement_id.into()), Value::Object(options)],
        )
    }

    /// Event: `["event", <name>, <params>]`.
    pub fn event(name: impl Into<String>, params: EventParams) -> Self {
        Self::new(
            command_names::EVENT,
            vec![Value::String(name.into()), Value::Object(params)],
        )
    }

    /// The first argument when it is a string: the event name for `event`
    /// commands, the measurement ID for `config`.
    pub fn target(&self) -> Option<&str> {
        self.args.first().and_then(Value::as_str)
    }

    /// Event name, if this is an `event` command.
    pub fn event_name(&self) -> Option<&str> {
        if self.name == command_names::EVENT {
            self.target()
        } else {
            None
        }
    }

    /// The trailing parameter mapping, if the last argument is an object.
    pub fn params(&self) -> Option<&EventParams> {
        self.args.last().and_then(Value::as_object)
    }

    /// The command as a JSON array `[name, ...args]`.
    pub fn to_value(&self) -> Value {
        let mut items = Vec::with_capacity(self.args.len() + 1);
        items.push(Value::String(self.name.clone()));
        items.extend(self.args.iter().cloned());
        Value::Array(items)
    }
}

impl Serialize for Command {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.args.len() + 1))?;
        seq.serialize_element(&self.name)?;
        for arg in &self.args {
            seq.serialize_element(arg)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn params(value: Value) -> EventParams {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_event_serializes_as_array() {
        let cmd = Command::event("login", params(json!({"method": "google"})));
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json, json!(["event", "login", {"method": "google"}]));
        assert_eq!(json, cmd.to_value());
    }

    #[test]
    fn test_js_timestamp_format() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let cmd = Command::js(at);
        assert_eq!(cmd.name, command_names::JS);
        assert_eq!(cmd.args, vec![json!("2024-03-01T12:30:00.000Z")]);
        assert_eq!(cmd.params(), None);
    }

    #[test]
    fn test_accessors() {
        let cmd = Command::config("G-ABC123", params(json!({"send_page_view": false})));
        assert_eq!(cmd.target(), Some("G-ABC123"));
        assert_eq!(cmd.event_name(), None);
        assert_eq!(cmd.params().unwrap()["send_page_view"], json!(false));

        let event = Command::event("page_view", EventParams::new());
        assert_eq!(event.event_name(), Some("page_view"));
    }

    #[test]
    fn test_custom_command_without_args() {
        let cmd = Command::new("consent", vec![]);
        assert_eq!(serde_json::to_string(&cmd).unwrap(), r#"["consent"]"#);
        assert_eq!(cmd.target(), None);
    }
}
