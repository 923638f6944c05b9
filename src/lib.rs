//! # convertify
//!
//! Send a local file to a remote conversion service and save what comes back.
//!
//! The service does the real work (PDF → PNG, DOCX → TXT, OCR). This crate is
//! the client side: a small form controller that tracks which file and mode
//! are selected, whether a request is in flight and which error to show, plus
//! the HTTP and file-system plumbing behind it.
//!
//! ## Flow
//!
//! ```text
//! select file ─▶ select mode ─▶ submit
//!                                  │
//!                                  ├─ POST multipart {file, conversionType}
//!                                  ├─ 2xx  → save body as new-archive.bin
//!                                  └─ else → one generic error message
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use convertify::{ClientConfig, ConversionForm, ConversionMode, SelectedFile};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut form = ConversionForm::from_config(ClientConfig::default())?;
//!     form.select_file(Some(SelectedFile::from_path("report.pdf").await?));
//!     form.select_conversion_mode(ConversionMode::PdfToPng);
//!
//!     match form.submit().await {
//!         Ok(report) => println!("saved {}", report.saved_to.display()),
//!         Err(_) => eprintln!("{}", form.state().error_message().unwrap_or_default()),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `convertify` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod download;
pub mod error;
pub mod form;
pub mod input;
pub mod mode;
pub mod progress;
pub mod service;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ClientConfig, ClientConfigBuilder, OutputNaming};
pub use download::{DownloadSink, FileDownloadSink};
pub use error::{ConvertifyError, ErrorKind};
pub use form::{ConversionForm, FormState, SubmissionPhase, SubmissionReport};
pub use input::SelectedFile;
pub use mode::{ConversionMode, ConversionOption, CONVERSION_OPTIONS};
pub use progress::{NoopObserver, ObserverRef, SubmissionObserver};
pub use service::{ConversionService, HttpConversionService};
