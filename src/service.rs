//! The remote conversion service.
//!
//! The form only needs one thing from the service: "here is a file and a
//! mode, give me back the converted bytes". [`ConversionService`] captures
//! that seam so the controller can be driven by the real HTTP client or by a
//! test double. [`HttpConversionService`] is the real thing.
//!
//! ## Wire format
//!
//! ```text
//! POST {endpoint}
//! Content-Type: multipart/form-data
//!
//!   file            raw file content (original name, guessed MIME type)
//!   conversionType  pdf-to-png | docx-to-txt | img-to-text
//! ```
//!
//! Any 2xx answer is a success and its body is the converted artefact. Any
//! other status is a failure and the body is not read.

use crate::config::ClientConfig;
use crate::error::ConvertifyError;
use crate::input::SelectedFile;
use crate::mode::ConversionMode;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::debug;

/// Multipart field carrying the file content.
pub const FILE_FIELD: &str = "file";

/// Multipart field carrying the mode identifier.
pub const MODE_FIELD: &str = "conversionType";

/// Something that can convert a file remotely.
#[async_trait]
pub trait ConversionService: Send + Sync {
    /// Send `file` for conversion with `mode` and return the converted bytes.
    async fn convert(
        &self,
        file: &SelectedFile,
        mode: ConversionMode,
    ) -> Result<Vec<u8>, ConvertifyError>;
}

/// [`ConversionService`] over HTTP multipart.
#[derive(Debug, Clone)]
pub struct HttpConversionService {
    client: reqwest::Client,
    endpoint: String,
    timeout_secs: Option<u64>,
}

impl HttpConversionService {
    /// A client with no request timeout.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ConvertifyError> {
        Self::with_timeout(endpoint, None)
    }

    /// A client whose requests give up after `timeout_secs` (`None` waits
    /// forever).
    pub fn with_timeout(
        endpoint: impl Into<String>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, ConvertifyError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ConvertifyError::Internal(format!("HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout_secs,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ConvertifyError> {
        Self::with_timeout(config.endpoint.clone(), config.timeout_secs)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout_secs(&self) -> Option<u64> {
        self.timeout_secs
    }

    fn transport_error(&self, e: reqwest::Error) -> ConvertifyError {
        if e.is_timeout() {
            if let Some(secs) = self.timeout_secs {
                return ConvertifyError::Timeout { secs };
            }
        }
        ConvertifyError::Transport {
            endpoint: self.endpoint.clone(),
            reason: e.to_string(),
        }
    }
}

/// Build the two-field multipart body.
pub fn build_form(file: &SelectedFile, mode: ConversionMode) -> Result<Form, ConvertifyError> {
    let part = Part::bytes(file.bytes().to_vec())
        .file_name(file.name().to_string())
        .mime_str(&file.mime_type())
        .map_err(|e| ConvertifyError::Internal(format!("invalid MIME type: {e}")))?;

    Ok(Form::new()
        .part(FILE_FIELD, part)
        .text(MODE_FIELD, mode.as_str()))
}

#[async_trait]
impl ConversionService for HttpConversionService {
    async fn convert(
        &self,
        file: &SelectedFile,
        mode: ConversionMode,
    ) -> Result<Vec<u8>, ConvertifyError> {
        let form = build_form(file, mode)?;
        debug!(
            "POST {} ({} bytes, {}={})",
            self.endpoint,
            file.len(),
            MODE_FIELD,
            mode
        );

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConvertifyError::ServiceStatus {
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;
        debug!("Received {} bytes ({})", bytes.len(), status);

        Ok(bytes.to_vec())
    }
}
