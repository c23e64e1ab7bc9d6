//! Argument marshalling for the `gtag` call.
//!
//! Kept free of browser bindings so the mapping is testable natively.

use keiko_events::{command_names, Command};
use serde_json::Value;

/// One positional `gtag` argument, before conversion to a JS value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum GtagArg<'a> {
    /// A plain string, passed as a JS string.
    Text(&'a str),
    /// An RFC 3339 timestamp, passed as a JS `Date`.
    Date(&'a str),
    /// Any other JSON value, passed as the equivalent JS value.
    Json(&'a Value),
}

/// The positional arguments of `gtag(name, ...args)` for `command`.
///
/// The `js` command carries its timestamp as a string; the loader expects
/// a `Date` there.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) fn gtag_args(command: &Command) -> Vec<GtagArg<'_>> {
    let mut args = Vec::with_capacity(command.args.len() + 1);
    args.push(GtagArg::Text(&command.name));
    for arg in &command.args {
        args.push(match (command.name.as_str(), arg) {
            (command_names::JS, Value::String(at)) => GtagArg::Date(at),
            (_, Value::String(text)) => GtagArg::Text(text),
            (_, value) => GtagArg::Json(value),
        });
    }
    args
}
