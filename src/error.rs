//! Error types for the convertify library.
//!
//! Every failure the library can report is a variant of [`ConvertifyError`].
//! The variants fall into the classes the conversion form distinguishes:
//!
//! * **Validation**: nothing was selected, so no request was made
//!   ([`ConvertifyError::NoFileSelected`]).
//! * **Transport**: the round trip to the conversion service or the final
//!   save failed ([`ConvertifyError::Transport`],
//!   [`ConvertifyError::ServiceStatus`], [`ConvertifyError::DownloadFailed`]).
//! * **Timeout** and **Cancelled**: the request was abandoned before the
//!   service answered.
//!
//! The `Display` text of each variant carries the technical detail used for
//! logs. What the user sees is [`ConvertifyError::user_message`], which hides
//! that detail behind one message per class.

use std::path::PathBuf;
use thiserror::Error;

/// Shown when submit is pressed with no file selected.
pub const MSG_NO_FILE: &str = "Por favor, selecione um arquivo primeiro.";

/// Shown for any transport-class failure.
pub const MSG_CONVERSION_FAILED: &str =
    "Ocorreu um erro ao converter o arquivo. O servidor está rodando?";

/// Shown when the service did not answer within the configured timeout.
pub const MSG_TIMEOUT: &str = "O servidor demorou demais para responder.";

/// Shown when the user aborted an in-flight submission.
pub const MSG_CANCELLED: &str = "A conversão foi cancelada.";

/// All errors returned by the convertify library.
#[derive(Debug, Error)]
pub enum ConvertifyError {
    // ── Validation ────────────────────────────────────────────────────────
    /// Submit was requested before any file was selected.
    #[error("No file selected")]
    NoFileSelected,

    // ── Transport ─────────────────────────────────────────────────────────
    /// The request could not be sent or the response body could not be read.
    #[error("Request to '{endpoint}' failed: {reason}")]
    Transport { endpoint: String, reason: String },

    /// The service answered with a non-success status.
    #[error("Conversion service returned HTTP {status}")]
    ServiceStatus { status: u16 },

    /// The converted payload could not be saved.
    #[error("Failed to save converted file '{path}': {source}")]
    DownloadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Abandoned requests ────────────────────────────────────────────────
    /// The service did not answer within the configured timeout.
    #[error("Conversion request timed out after {secs}s")]
    Timeout { secs: u64 },

    /// The submission was aborted through its abort handle.
    #[error("Conversion request was cancelled")]
    Cancelled,

    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("File not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists but reading it failed.
    #[error("Failed to read '{path}': {source}")]
    FileReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A conversion identifier outside the fixed option list.
    #[error("Unknown conversion mode '{value}' (expected one of: {expected})")]
    UnknownConversionMode { value: String, expected: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification used by the form to pick a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Transport,
    Timeout,
    Cancelled,
    Input,
    Config,
}

impl ConvertifyError {
    /// The class this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertifyError::NoFileSelected => ErrorKind::Validation,
            ConvertifyError::Transport { .. }
            | ConvertifyError::ServiceStatus { .. }
            | ConvertifyError::DownloadFailed { .. }
            | ConvertifyError::Internal(_) => ErrorKind::Transport,
            ConvertifyError::Timeout { .. } => ErrorKind::Timeout,
            ConvertifyError::Cancelled => ErrorKind::Cancelled,
            ConvertifyError::FileNotFound { .. }
            | ConvertifyError::PermissionDenied { .. }
            | ConvertifyError::FileReadFailed { .. }
            | ConvertifyError::UnknownConversionMode { .. } => ErrorKind::Input,
            ConvertifyError::InvalidConfig(_) => ErrorKind::Config,
        }
    }

    /// The single-line message the form displays for this error.
    ///
    /// Transport-class errors all collapse to one generic message; the
    /// underlying detail only goes to the log. Input and config errors
    /// never reach the form, so they show their own `Display` text.
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::Validation => MSG_NO_FILE.to_string(),
            ErrorKind::Transport => MSG_CONVERSION_FAILED.to_string(),
            ErrorKind::Timeout => MSG_TIMEOUT.to_string(),
            ErrorKind::Cancelled => MSG_CANCELLED.to_string(),
            ErrorKind::Input | ErrorKind::Config => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_file_maps_to_validation_message() {
        let e = ConvertifyError::NoFileSelected;
        assert_eq!(e.kind(), ErrorKind::Validation);
        assert_eq!(e.user_message(), "Por favor, selecione um arquivo primeiro.");
    }

    #[test]
    fn transport_class_shares_generic_message() {
        let errors = [
            ConvertifyError::Transport {
                endpoint: "http://localhost:5000/api/convert".into(),
                reason: "connection refused".into(),
            },
            ConvertifyError::ServiceStatus { status: 500 },
            ConvertifyError::DownloadFailed {
                path: PathBuf::from("/tmp/out.bin"),
                source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
            },
        ];
        for e in &errors {
            assert_eq!(e.kind(), ErrorKind::Transport, "{e}");
            assert_eq!(e.user_message(), MSG_CONVERSION_FAILED);
        }
    }

    #[test]
    fn transport_display_keeps_detail_for_logs() {
        let e = ConvertifyError::Transport {
            endpoint: "http://localhost:5000/api/convert".into(),
            reason: "connection refused".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("localhost:5000"), "got: {msg}");
        assert!(msg.contains("connection refused"), "got: {msg}");
        assert!(!e.user_message().contains("refused"));
    }

    #[test]
    fn timeout_is_distinct_from_transport() {
        let e = ConvertifyError::Timeout { secs: 30 };
        assert_eq!(e.kind(), ErrorKind::Timeout);
        assert_eq!(e.user_message(), MSG_TIMEOUT);
        assert!(e.to_string().contains("30s"));
    }

    #[test]
    fn service_status_display() {
        let e = ConvertifyError::ServiceStatus { status: 503 };
        assert!(e.to_string().contains("503"));
    }

    #[test]
    fn unknown_mode_lists_expected_values() {
        let e = ConvertifyError::UnknownConversionMode {
            value: "mp3-to-wav".into(),
            expected: "pdf-to-png, docx-to-txt, img-to-text".into(),
        };
        assert_eq!(e.kind(), ErrorKind::Input);
        assert!(e.user_message().contains("mp3-to-wav"));
        assert!(e.user_message().contains("docx-to-txt"));
    }
}
