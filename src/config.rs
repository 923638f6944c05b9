//! Configuration for talking to the conversion service and saving results.
//!
//! All behaviour is controlled through [`ClientConfig`], built via its
//! [`ClientConfigBuilder`]. Callers set only what they care about and rely on
//! the documented defaults for the rest.

use crate::error::ConvertifyError;
use crate::mode::ConversionMode;
use crate::progress::ObserverRef;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/api/convert";

/// Filename every download is saved under unless configured otherwise.
pub const DEFAULT_OUTPUT_FILENAME: &str = "new-archive.bin";

/// Configuration for a conversion client.
///
/// # Example
/// ```rust
/// use convertify::{ClientConfig, OutputNaming};
///
/// let config = ClientConfig::builder()
///     .endpoint("http://converter.internal:5000/api/convert")
///     .timeout_secs(30)
///     .output_naming(OutputNaming::FromInput)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    /// Full URL of the conversion endpoint. Default: [`DEFAULT_ENDPOINT`].
    pub endpoint: String,

    /// Upper bound on one request, in seconds. Default: 120. `None` waits
    /// for as long as the service keeps the connection open.
    pub timeout_secs: Option<u64>,

    /// Directory converted files are saved into. Default: current directory.
    pub output_dir: PathBuf,

    /// How the saved file is named. Default: `Fixed("new-archive.bin")`.
    pub output_naming: OutputNaming,

    /// Receives submit start/complete/error events.
    pub observer: Option<ObserverRef>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: Some(120),
            output_dir: PathBuf::from("."),
            output_naming: OutputNaming::default(),
            observer: None,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .field("output_dir", &self.output_dir)
            .field("output_naming", &self.output_naming)
            .field(
                "observer",
                &self.observer.as_ref().map(|_| "<dyn SubmissionObserver>"),
            )
            .finish()
    }
}

impl ClientConfig {
    /// Create a new builder for `ClientConfig`.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint = url.into();
        self
    }

    /// Request timeout in seconds; `0` disables the timeout.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = (secs > 0).then_some(secs);
        self
    }

    pub fn no_timeout(mut self) -> Self {
        self.config.timeout_secs = None;
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn output_naming(mut self, naming: OutputNaming) -> Self {
        self.config.output_naming = naming;
        self
    }

    pub fn observer(mut self, observer: ObserverRef) -> Self {
        self.config.observer = Some(observer);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ClientConfig, ConvertifyError> {
        let c = &self.config;
        if !(c.endpoint.starts_with("http://") || c.endpoint.starts_with("https://")) {
            return Err(ConvertifyError::InvalidConfig(format!(
                "endpoint must be an HTTP/HTTPS URL, got '{}'",
                c.endpoint
            )));
        }
        if let OutputNaming::Fixed(ref name) = c.output_naming {
            if !is_plain_filename(name) {
                return Err(ConvertifyError::InvalidConfig(format!(
                    "output filename must be a bare file name, got '{name}'"
                )));
            }
        }
        Ok(self.config)
    }
}

fn is_plain_filename(name: &str) -> bool {
    let p = Path::new(name);
    !name.is_empty() && p.file_name().map(|f| f == p.as_os_str()).unwrap_or(false)
}

// ── Enums ────────────────────────────────────────────────────────────────

/// How the saved file is named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputNaming {
    /// Always the same name, whatever the input or mode.
    Fixed(String),
    /// Input file stem plus the extension the mode produces,
    /// e.g. `report.pdf` + `pdf-to-png` → `report.png`.
    FromInput,
}

impl Default for OutputNaming {
    fn default() -> Self {
        OutputNaming::Fixed(DEFAULT_OUTPUT_FILENAME.to_string())
    }
}

impl OutputNaming {
    /// Resolve the filename for a given input name and mode.
    pub fn filename_for(&self, input_name: &str, mode: ConversionMode) -> String {
        match self {
            OutputNaming::Fixed(name) => name.clone(),
            OutputNaming::FromInput => {
                let stem = Path::new(input_name)
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| "converted".to_string());
                format!("{stem}.{}", mode.output_extension())
            }
        }
    }
}
