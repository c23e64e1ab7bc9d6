//! The analytics tracker.
//!
//! Construction validates the configuration and runs the launch sequence
//! once. Emission methods push shaped commands onto the shared queue and
//! return the tracker for chaining.

use crate::config::{is_ga4_measurement_id, TrackerConfig};
use crate::error::{Result, TrackerError};
use crate::page_view::PageViewParams;
use chrono::Utc;
use keiko_context::platform::{PlatformHost, PlatformQueue};
use keiko_context::{HostContextRef, ScriptTag};
use keiko_events::{event_names, Command, CommandQueueRef, EventParams};
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;

/// Google Analytics 4 tracker writing to a command queue.
pub struct Tracker {
    config: Arc<TrackerConfig>,
    host: HostContextRef,
    queue: CommandQueueRef,
}

impl Tracker {
    /// Validate `config` and launch.
    ///
    /// Fails with [`TrackerError::MissingMeasurementId`] before touching the
    /// host or the queue when no measurement ID is configured.
    pub fn new(
        config: impl Into<Arc<TrackerConfig>>,
        host: HostContextRef,
        queue: CommandQueueRef,
    ) -> Result<Self> {
        let config = config.into();
        let measurement_id = config.measurement_id.trim();
        if measurement_id.is_empty() {
            return Err(TrackerError::MissingMeasurementId);
        }
        if !is_ga4_measurement_id(measurement_id) {
            tracing::warn!(
                measurement_id,
                "measurement ID does not look like 'G-XXXXXXXXXX'"
            );
        }

        let tracker = Self {
            config,
            host,
            queue,
        };
        tracker.log(format_args!("Initializing Google Analytics tracker..."));
        tracker.launch();
        Ok(tracker)
    }

    /// Tracker bound to the current platform: the page `dataLayer` on
    /// `wasm32`, an inert host elsewhere.
    pub fn for_platform(config: impl Into<Arc<TrackerConfig>>) -> Result<Self> {
        Self::new(
            config,
            Arc::new(PlatformHost {}),
            Arc::new(PlatformQueue {}),
        )
    }

    pub fn config(&self) -> &Arc<TrackerConfig> {
        &self.config
    }

    pub fn measurement_id(&self) -> &str {
        self.config.measurement_id.trim()
    }

    /// Append `[name, ...args]` to the queue.
    ///
    /// No-op without a host document.
    pub fn add_custom_instruction(&self, name: &str, args: Vec<Value>) -> &Self {
        self.enqueue(Command::new(name, args))
    }

    /// Emit a `page_view` event.
    ///
    /// Location and title fall back to the host page when not given; the
    /// detected location goes through the configured URL transformer. A
    /// `config` update carrying the referrer and location is queued first.
    pub fn track_page_view(&self, params: PageViewParams) -> &Self {
        let url = match params.explicit_location() {
            Some(location) => location.to_string(),
            None => self.page_url(),
        };
        let title = match params.explicit_title() {
            Some(title) => title.to_string(),
            None => self.page_title(),
        };

        self.log(format_args!(
            "Tracking page view for URL: {url}, with title: {title} and additional params: {}",
            AsJson(&params.extra)
        ));

        let mut update = EventParams::new();
        update.insert("send_page_view".into(), json!(false));
        update.insert(
            "page_referrer".into(),
            json!(self.host.referrer().unwrap_or_default()),
        );
        update.insert("page_location".into(), json!(url));
        update.insert("debug_mode".into(), json!(self.config.debug));
        update.insert("update".into(), json!(true));
        self.enqueue(Command::config(self.measurement_id(), update));

        let mut event = params.extra;
        event.insert("page_location".into(), json!(url));
        event.insert("page_title".into(), json!(title));
        self.enqueue(Command::event(event_names::PAGE_VIEW, event))
    }

    /// Emit a `login` event for the given authentication method.
    pub fn track_login(&self, method: &str) -> &Self {
        self.log(format_args!("Tracking login event with method: {method}"));
        let mut params = EventParams::new();
        params.insert("method".into(), json!(method));
        self.enqueue(Command::event(event_names::LOGIN, params))
    }

    /// Emit an arbitrary event with its parameters unmodified.
    pub fn track_event(&self, name: &str, params: EventParams) -> &Self {
        self.log(format_args!(
            "Tracking generic event with name: {name} and params: {}",
            AsJson(&params)
        ));
        self.enqueue(Command::event(name, params))
    }

    fn enqueue(&self, command: Command) -> &Self {
        if !self.host.has_host_context() {
            self.log(format_args!(
                "No host document. Skipping instruction: {}",
                command.name
            ));
            return self;
        }
        self.log(format_args!(
            "Adding custom instruction: {}, with args: {}",
            command.name,
            AsJson(&command.args)
        ));
        self.queue.push(command);
        self
    }

    fn launch(&self) {
        if !self.host.has_host_context() {
            tracing::warn!(
                measurement_id = self.measurement_id(),
                "Google Analytics will not work without a host document"
            );
            return;
        }

        self.queue.ensure_exists();

        if !self.queue.is_empty() {
            self.log(format_args!(
                "The command queue already has entries. Skipping initialization."
            ));
            return;
        }

        if self.config.disable_tracking {
            self.log(format_args!("Tracking is disabled. Skipping initialization."));
            return;
        }

        let now = Utc::now();
        self.log(format_args!(
            "Launching Google Analytics tracker at {} with measurement ID: {}",
            now.to_rfc3339(),
            self.measurement_id()
        ));

        let mut options = EventParams::new();
        options.insert("send_page_view".into(), json!(false));
        options.insert("debug_mode".into(), json!(self.config.debug));

        self.enqueue(Command::js(now));
        self.enqueue(Command::config(self.measurement_id(), options));
        self.inject_loader();
    }

    fn inject_loader(&self) {
        let tag = ScriptTag::gtag(self.measurement_id());
        self.log(format_args!("Script URL: {}", tag.src));
        if self.host.insert_script_tag(&tag) {
            self.log(format_args!("Added Google Analytics loader to the document"));
        } else {
            self.log(format_args!(
                "No script element to insert before. Loader not injected."
            ));
        }
    }

    fn page_url(&self) -> String {
        let url = self.host.current_url().unwrap_or_default();
        if self.config.url_transformer.is_some() {
            self.log(format_args!("Using the URL transformer function."));
        }
        self.config.transform_url(&url)
    }

    fn page_title(&self) -> String {
        self.host.current_title().unwrap_or_default()
    }

    fn log(&self, message: fmt::Arguments<'_>) {
        if self.config.verbose {
            tracing::debug!(measurement_id = self.measurement_id(), "{message}");
        }
    }
}

/// Renders a value as compact JSON when formatted.
///
/// Serialization only happens if the log line is actually written.
struct AsJson<'a, T: ?Sized>(&'a T);

impl<T: Serialize + ?Sized> fmt::Display for AsJson<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self.0).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl fmt::Debug for Tracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracker")
            .field("config", &self.config)
            .field("queue_len", &self.queue.len())
            .finish()
    }
}
