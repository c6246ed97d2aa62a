pub mod app;
pub mod capture;

pub use app::{ScopeApp, ScopeView, StartupConfig};
pub use capture::RecordingManager;

#[cfg(feature = "kittest")]
pub mod kittest;
