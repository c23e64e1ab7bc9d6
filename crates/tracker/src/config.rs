//! Tracker configuration.

use crate::error::{Result, TrackerError};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Rewrites the detected page URL before it is reported.
pub type UrlTransformer = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Immutable tracker configuration.
///
/// Deserializes from the same camelCase keys the provider props use
/// (`measurementId`, `disableTracking`, ...). The URL transformer is code-only.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackerConfig {
    /// GA4 measurement ID (`G-XXXXXXXXXX`).
    pub measurement_id: String,

    /// Skip the bootstrap commands and the loader script.
    pub disable_tracking: bool,

    #[serde(skip)]
    pub url_transformer: Option<UrlTransformer>,

    /// Accepted for parity with the provider props; no behavior is attached.
    pub disable_link_tracking: bool,

    /// Emit the tracker's diagnostic log lines.
    pub verbose: bool,

    /// Forwarded to the vendor as `debug_mode`.
    pub debug: bool,
}

impl TrackerConfig {
    pub fn new(measurement_id: impl Into<String>) -> Self {
        Self {
            measurement_id: measurement_id.into(),
            ..Self::default()
        }
    }

    pub fn with_tracking_disabled(mut self, disabled: bool) -> Self {
        self.disable_tracking = disabled;
        self
    }

    pub fn with_url_transformer<F>(mut self, transformer: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.url_transformer = Some(Arc::new(transformer));
        self
    }

    pub fn with_link_tracking_disabled(mut self, disabled: bool) -> Self {
        self.disable_link_tracking = disabled;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| TrackerError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Apply the configured transformer, if any.
    pub fn transform_url(&self, url: &str) -> String {
        match &self.url_transformer {
            Some(transformer) => transformer(url),
            None => url.to_string(),
        }
    }
}

impl fmt::Debug for TrackerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackerConfig")
            .field("measurement_id", &self.measurement_id)
            .field("disable_tracking", &self.disable_tracking)
            .field("url_transformer", &self.url_transformer.is_some())
            .field("disable_link_tracking", &self.disable_link_tracking)
            .field("verbose", &self.verbose)
            .field("debug", &self.debug)
            .finish()
    }
}

/// Whether `id` has the GA4 shape: `G-` followed by ASCII alphanumerics.
pub fn is_ga4_measurement_id(id: &str) -> bool {
    match id.strip_prefix("G-") {
        Some(rest) => !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "measurementId": "G-ABC123",
            "disableTracking": true,
            "disableLinkTracking": true,
            "verbose": true,
            "debug": true
        }"#;
        let config = TrackerConfig::from_json_str(json).unwrap();
        assert_eq!(config.measurement_id, "G-ABC123");
        assert!(config.disable_tracking);
        assert!(config.disable_link_tracking);
        assert!(config.verbose);
        assert!(config.debug);
        assert!(config.url_transformer.is_none());
    }

    #[test]
    fn test_deserialize_defaults() {
        let config = TrackerConfig::from_json_str(r#"{"measurementId": "G-1"}"#).unwrap();
        assert!(!config.disable_tracking);
        assert!(!config.verbose);
        assert!(!config.debug);
    }

    #[test]
    fn test_missing_id_still_parses() {
        // Rejected at tracker construction, not while loading.
        let config = TrackerConfig::from_json_str("{}").unwrap();
        assert!(config.measurement_id.is_empty());
    }

    #[test]
    fn test_invalid_json() {
        let err = TrackerConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, TrackerError::InvalidConfig(_)));
    }

    #[test]
    fn test_transform_url() {
        let plain = TrackerConfig::new("G-1");
        assert_eq!(plain.transform_url("https://x.test/"), "https://x.test/");

        let config =
            TrackerConfig::new("G-1").with_url_transformer(|url| format!("{url}?tracked=1"));
        assert_eq!(config.transform_url("https://x.test/"), "https://x.test/?tracked=1");
    }

    #[test]
    fn test_debug_hides_transformer() {
        let config = TrackerConfig::new("G-1").with_url_transformer(str::to_uppercase);
        let debug = format!("{config:?}");
        assert!(debug.contains("url_transformer: true"));
    }

    #[test]
    fn test_ga4_id_shape() {
        assert!(is_ga4_measurement_id("G-XXXXXXXXXX"));
        assert!(is_ga4_measurement_id("G-1A2B3C"));
        assert!(!is_ga4_measurement_id("UA-12345-1"));
        assert!(!is_ga4_measurement_id("G-"));
        assert!(!is_ga4_measurement_id("G-abc def"));
    }
}
