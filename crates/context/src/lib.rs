//! Host page context for keiko analytics.
//!
//! This crate abstracts the page the tracker runs in:
//! - Document access (location, title, referrer)
//! - Script injection for the vendor loader
//! - The page-wide command queue (browser builds only)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Domain Layer                             │
//! │  provider.rs    - HostContext trait, NullHost               │
//! │  script.rs      - ScriptTag description                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Infrastructure Layer                        │
//! │  platform/browser.rs - web-sys implementation (wasm32)      │
//! │  static_host.rs      - in-memory page for tests/headless    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use keiko_context::platform::{PlatformHost, PlatformQueue};
//! use std::sync::Arc;
//!
//! let host = Arc::new(PlatformHost {});
//! let queue = Arc::new(PlatformQueue {});
//! ```

mod provider;
mod script;
mod static_host;

pub mod platform;

pub use provider::{HostContext, NullHost};
pub use script::{ScriptTag, GTAG_ENDPOINT, SCRIPT_TYPE};
pub use static_host::StaticHost;

/// Type alias for shared host reference.
pub type HostContextRef = std::sync::Arc<dyn HostContext>;
