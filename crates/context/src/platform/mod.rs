//! Platform-specific implementations.

mod marshal;

#[cfg(target_arch = "wasm32")]
mod browser;

#[cfg(target_arch = "wasm32")]
pub use browser::{BrowserHost, DataLayer};

// Re-export the appropriate host and queue for the current platform
#[cfg(target_arch = "wasm32")]
pub type PlatformHost = BrowserHost;

#[cfg(target_arch = "wasm32")]
pub type PlatformQueue = DataLayer;

#[cfg(not(target_arch = "wasm32"))]
pub type PlatformHost = crate::provider::NullHost;

#[cfg(not(target_arch = "wasm32"))]
pub type PlatformQueue = keiko_events::NullQueue;
