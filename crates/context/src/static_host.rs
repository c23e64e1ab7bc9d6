//! In-memory host page.

use crate::provider::HostContext;
use crate::script::ScriptTag;
use std::sync::Mutex;

/// A fake page with a fixed location and title that records every script
/// insertion.
///
/// Used by tests and headless runs. URL and title can be changed afterwards
/// to simulate client-side navigation.
pub struct StaticHost {
    url: Mutex<String>,
    title: Mutex<String>,
    referrer: String,
    has_script_anchor: bool,
    injected: Mutex<Vec<ScriptTag>>,
}

impl StaticHost {
    /// A page at `url` titled `title`, with one existing script element to
    /// insert before.
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: Mutex::new(url.into()),
            title: Mutex::new(title.into()),
            referrer: String::new(),
            has_script_anchor: true,
            injected: Mutex::new(Vec::new()),
        }
    }

    pub fn with_referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = referrer.into();
        self
    }

    /// Page without any script element, so insertion has no anchor.
    pub fn without_scripts(mut self) -> Self {
        self.has_script_anchor = false;
        self
    }

    pub fn set_url(&self, url: impl Into<String>) {
        *self.url.lock().expect("host mutex poisoned") = url.into();
    }

    pub fn set_title(&self, title: impl Into<String>) {
        *self.title.lock().expect("host mutex poisoned") = title.into();
    }

    /// Script tags inserted so far, in insertion order.
    pub fn injected_scripts(&self) -> Vec<ScriptTag> {
        self.injected.lock().expect("host mutex poisoned").clone()
    }
}

impl HostContext for StaticHost {
    fn has_host_context(&self) -> bool {
        true
    }

    fn current_url(&self) -> Option<String> {
        Some(self.url.lock().expect("host mutex poisoned").clone())
    }

    fn current_title(&self) -> Option<String> {
        Some(self.title.lock().expect("host mutex poisoned").clone())
    }

    fn referrer(&self) -> Option<String> {
        Some(self.referrer.clone())
    }

    fn insert_script_tag(&self, tag: &ScriptTag) -> bool {
        if !self.has_script_anchor {
            return false;
        }
        self.injected
            .lock()
            .expect("host mutex poisoned")
            .push(tag.clone());
        true
    }
}
