//! Vendor script element description.

use serde::Serialize;

/// Loader endpoint; the measurement ID is appended as the `id` query value.
pub const GTAG_ENDPOINT: &str = "https://www.googletagmanager.com/gtag/js";

/// MIME type set on the injected element.
pub const SCRIPT_TYPE: &str = "text/javascript";

/// A `<script>` element to insert into the host document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptTag {
    pub src: String,
    #[serde(rename = "type")]
    pub script_type: String,
    #[serde(rename = "async")]
    pub async_load: bool,
    pub defer: bool,
}

impl ScriptTag {
    /// Asynchronous, deferred loader tag for a measurement ID.
    pub fn gtag(measurement_id: &str) -> Self {
        Self {
            src: format!("{GTAG_ENDPOINT}?id={measurement_id}"),
            script_type: SCRIPT_TYPE.to_string(),
            async_load: true,
            defer: true,
        }
    }
}
