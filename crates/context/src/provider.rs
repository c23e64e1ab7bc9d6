//! Host capability trait.
//!
//! Abstracts the document/window the tracker runs in, allowing the tracker
//! logic to stay pure and testable outside a browser.

use crate::script::ScriptTag;

/// Capabilities the tracker needs from the page hosting it.
pub trait HostContext: Send + Sync {
    /// Whether a document/window is available at all.
    fn has_host_context(&self) -> bool;

    /// Current page URL (`location.href`).
    fn current_url(&self) -> Option<String>;

    /// Current document title.
    fn current_title(&self) -> Option<String>;

    /// Referrer of the current document.
    fn referrer(&self) -> Option<String>;

    /// Insert a script element before the first script element of the
    /// document. Returns `false` when there is no insertion point.
    fn insert_script_tag(&self, tag: &ScriptTag) -> bool;
}

/// Host for non-interactive environments: no document, nothing to insert
/// into.
pub struct NullHost;

impl HostContext for NullHost {
    fn has_host_context(&self) -> bool {
        false
    }

    fn current_url(&self) -> Option<String> {
        None
    }

    fn current_title(&self) -> Option<String> {
        None
    }

    fn referrer(&self) -> Option<String> {
        None
    }

    fn insert_script_tag(&self, _tag: &ScriptTag) -> bool {
        false
    }
}
