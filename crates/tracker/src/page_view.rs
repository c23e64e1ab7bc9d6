//! Page view parameters.

use keiko_events::EventParams;
use serde::Deserialize;
use serde_json::Value;

const PAGE_LOCATION: &str = "page_location";
const PAGE_TITLE: &str = "page_title";

/// Parameters for a `page_view` event.
///
/// `page_location` and `page_title` are detected from the host when absent;
/// everything else is forwarded as-is. Deserializes from a raw mapping the
/// same way [`From<EventParams>`] lifts it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "EventParams")]
pub struct PageViewParams {
    pub page_location: Option<String>,

    pub page_title: Option<String>,

    /// Additional event parameters.
    pub extra: EventParams,
}

impl PageViewParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.page_location = Some(location.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.page_title = Some(title.into());
        self
    }

    /// Set one parameter. String values under `page_location` and
    /// `page_title` land in the typed fields.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        match value.into() {
            Value::String(location) if key == PAGE_LOCATION => {
                self.page_location = Some(location);
            }
            Value::String(title) if key == PAGE_TITLE => {
                self.page_title = Some(title);
            }
            value => {
                self.extra.insert(key, value);
            }
        }
        self
    }

    /// Explicit location, ignoring empty strings.
    pub(crate) fn explicit_location(&self) -> Option<&str> {
        self.page_location.as_deref().filter(|s| !s.is_empty())
    }

    /// Explicit title, ignoring empty strings.
    pub(crate) fn explicit_title(&self) -> Option<&str> {
        self.page_title.as_deref().filter(|s| !s.is_empty())
    }
}

impl From<EventParams> for PageViewParams {
    /// Lifts string `page_location`/`page_title` entries out of a raw
    /// mapping; everything else (including non-string values under those
    /// keys) stays in `extra`.
    fn from(mut params: EventParams) -> Self {
        let page_location = take_string(&mut params, PAGE_LOCATION);
        let page_title = take_string(&mut params, PAGE_TITLE);
        Self {
            page_location,
            page_title,
            extra: params,
        }
    }
}

fn take_string(params: &mut EventParams, key: &str) -> Option<String> {
    if !params.get(key).is_some_and(Value::is_string) {
        return None;
    }
    match params.remove(key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_event_params() {
        let raw = json!({
            "page_location": "https://x.test/custom",
            "page_title": 42,
            "section": "docs"
        });
        let params = PageViewParams::from(raw.as_object().cloned().unwrap());
        assert_eq!(params.page_location.as_deref(), Some("https://x.test/custom"));
        assert_eq!(params.page_title, None);
        assert_eq!(params.extra["page_title"], json!(42));
        assert_eq!(params.extra["section"], json!("docs"));
    }

    #[test]
    fn test_empty_values_are_not_explicit() {
        let params = PageViewParams::new().with_location("").with_title("");
        assert_eq!(params.explicit_location(), None);
        assert_eq!(params.explicit_title(), None);
    }

    #[test]
    fn test_deserialize_flattens_extra() {
        let params: PageViewParams =
            serde_json::from_str(r#"{"page_title": "Docs", "lang": "en"}"#).unwrap();
        assert_eq!(params.page_title.as_deref(), Some("Docs"));
        assert_eq!(params.extra.get("lang"), Some(&json!("en")));
    }

    #[test]
    fn test_deserialize_matches_from_event_params() {
        let json = r#"{"page_location": "https://x.test/a", "page_title": 42}"#;
        let parsed: PageViewParams = serde_json::from_str(json).unwrap();
        let lifted = PageViewParams::from(serde_json::from_str::<EventParams>(json).unwrap());
        assert_eq!(parsed, lifted);
        assert_eq!(parsed.extra["page_title"], json!(42));
    }

    #[test]
    fn test_with_param_routes_location_and_title() {
        let params = PageViewParams::new()
            .with_param("page_location", "https://x.test/custom")
            .with_param("page_title", "Custom")
            .with_param("section", "docs");
        assert_eq!(params.explicit_location(), Some("https://x.test/custom"));
        assert_eq!(params.explicit_title(), Some("Custom"));
        assert_eq!(params.extra.len(), 1);
    }

    #[test]
    fn test_with_param_keeps_non_string_title_in_extra() {
        let params = PageViewParams::new().with_param("page_title", 7);
        assert_eq!(params.page_title, None);
        assert_eq!(params.extra["page_title"], json!(7));
    }
}
