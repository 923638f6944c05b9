//! Observer trait for submission lifecycle events.
//!
//! Inject an [`Arc<dyn SubmissionObserver>`] via
//! [`crate::config::ClientConfigBuilder::observer`] to hear about each
//! submission as it starts and settles. The start hook receives the form state
//! already in its `Submitting` phase, so a host can render the disabled
//! control and its label straight from it. For every state change, use
//! [`crate::form::ConversionForm::subscribe`] instead.
//!
//! # Example
//!
//! ```rust
//! use convertify::{ClientConfig, SubmissionObserver};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingObserver {
//!     completed: AtomicUsize,
//! }
//!
//! impl SubmissionObserver for CountingObserver {
//!     fn on_submit_complete(&self, filename: &str, bytes: usize) {
//!         self.completed.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("saved {filename} ({bytes} bytes)");
//!     }
//! }
//!
//! let observer = Arc::new(CountingObserver { completed: AtomicUsize::new(0) });
//! let config = ClientConfig::builder()
//!     .observer(observer as Arc<dyn SubmissionObserver>)
//!     .build()
//!     .unwrap();
//! ```

use crate::form::FormState;
use std::sync::Arc;

/// Called by the form controller around each submission.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait SubmissionObserver: Send + Sync {
    /// Called once the request is about to be sent. `state` is already in
    /// the `Submitting` phase.
    fn on_submit_start(&self, state: &FormState) {
        let _ = state;
    }

    /// Called after the converted payload has been saved.
    fn on_submit_complete(&self, filename: &str, bytes: usize) {
        let _ = (filename, bytes);
    }

    /// Called when the submission failed, with the user-facing message.
    fn on_submit_error(&self, message: &str) {
        let _ = message;
    }
}

/// A no-op implementation for callers that don't need events.
pub struct NoopObserver;

impl SubmissionObserver for NoopObserver {}

/// Convenience alias matching the type stored in [`crate::config::ClientConfig`].
pub type ObserverRef = Arc<dyn SubmissionObserver>;
