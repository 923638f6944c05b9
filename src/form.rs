//! The conversion form controller.
//!
//! [`ConversionForm`] owns the four pieces of form state (selected file,
//! selected mode, loading flag, error message) and performs submissions
//! against a [`ConversionService`], handing the result to a [`DownloadSink`].
//!
//! ## Submission state machine
//!
//! ```text
//!            submit (file present)
//!   Idle ─────────────────────────▶ Submitting ──┬──▶ Succeeded
//!    ▲                                 ▲         └──▶ Failed
//!    │                                 │                │
//!    └── (initial)      submit again ──┴────────────────┘
//! ```
//!
//! `Succeeded` and `Failed` record the last outcome but otherwise behave like
//! `Idle`: the loading flag is down and a new submission is accepted. Submit
//! with no file never leaves the current phase; it only sets the validation
//! message.
//!
//! `submit` takes `&mut self`, so one controller can never run two
//! submissions at once. Every state change is published on a
//! [`tokio::sync::watch`] channel ([`ConversionForm::subscribe`]) and the
//! observer receives the live state when a request starts, so a UI can grey
//! out its button through [`FormState::submit_enabled`] while the request is
//! pending.

use crate::config::ClientConfig;
use crate::download::{DownloadSink, FileDownloadSink};
use crate::error::{ConvertifyError, ErrorKind};
use crate::input::SelectedFile;
use crate::mode::{ConversionMode, ConversionOption, CONVERSION_OPTIONS};
use crate::service::{ConversionService, HttpConversionService};
use futures::future::{AbortRegistration, Abortable};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tracing::{error, info};

/// Form title.
pub const FORM_TITLE: &str = "Convertify";

/// Submit button label while idle.
pub const LABEL_SUBMIT: &str = "Converter";

/// Submit button label while a request is in flight.
pub const LABEL_SUBMITTING: &str = "Convertendo...";

/// Where the form is in its submission lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// A request is in flight.
    Submitting,
    /// The last submission was saved to `saved_to`.
    Succeeded { saved_to: PathBuf, bytes: usize },
    /// The last submission failed.
    Failed { kind: ErrorKind },
}

/// Everything the form displays.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    selected_file: Option<Arc<SelectedFile>>,
    selected_mode: ConversionMode,
    phase: SubmissionPhase,
    error_message: Option<String>,
}

impl FormState {
    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_deref()
    }

    pub fn selected_mode(&self) -> ConversionMode {
        self.selected_mode
    }

    pub fn phase(&self) -> &SubmissionPhase {
        &self.phase
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmissionPhase::Submitting
    }

    /// Whether the submit control accepts a press.
    pub fn submit_enabled(&self) -> bool {
        !self.is_submitting()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() {
            LABEL_SUBMITTING
        } else {
            LABEL_SUBMIT
        }
    }
}

/// Record of one successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReport {
    pub input_name: String,
    pub mode: ConversionMode,
    pub saved_to: PathBuf,
    pub bytes: usize,
    pub duration_ms: u64,
}

/// The form controller. See the module docs for the state machine.
pub struct ConversionForm<S, D> {
    service: S,
    sink: D,
    config: ClientConfig,
    state: FormState,
    updates: watch::Sender<FormState>,
}

impl ConversionForm<HttpConversionService, FileDownloadSink> {
    /// A form that talks HTTP to `config.endpoint` and saves into
    /// `config.output_dir`.
    pub fn from_config(config: ClientConfig) -> Result<Self, ConvertifyError> {
        let service = HttpConversionService::from_config(&config)?;
        let sink = FileDownloadSink::new(config.output_dir.clone());
        Ok(Self::new(service, sink, config))
    }
}

impl<S, D> ConversionForm<S, D>
where
    S: ConversionService,
    D: DownloadSink,
{
    pub fn new(service: S, sink: D, config: ClientConfig) -> Self {
        let (updates, _) = watch::channel(FormState::default());
        Self {
            service,
            sink,
            config,
            state: FormState::default(),
            updates,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// A receiver that sees every state change, including the `Submitting`
    /// phase while a request is in flight.
    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        self.updates.subscribe()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }

    /// Entries for the mode selector.
    pub fn options(&self) -> &'static [ConversionOption] {
        &CONVERSION_OPTIONS
    }

    fn publish(&self) {
        self.updates.send_replace(self.state.clone());
    }

    /// Pick a file. `None` means the picker was dismissed: the previous
    /// selection stays. The error message is cleared either way.
    pub fn select_file(&mut self, file: Option<SelectedFile>) {
        self.state.error_message = None;
        if let Some(file) = file {
            info!("Selected file: {} ({} bytes)", file.name(), file.len());
            self.state.selected_file = Some(Arc::new(file));
        }
        self.publish();
    }

    pub fn select_conversion_mode(&mut self, mode: ConversionMode) {
        self.state.selected_mode = mode;
        self.publish();
    }

    /// Select a mode by wire identifier. Unknown identifiers leave the
    /// current selection untouched.
    pub fn select_conversion_mode_str(&mut self, value: &str) -> Result<(), ConvertifyError> {
        self.select_conversion_mode(value.parse()?);
        Ok(())
    }

    /// Convert the selected file and save the result.
    pub async fn submit(&mut self) -> Result<SubmissionReport, ConvertifyError> {
        self.run(None).await
    }

    /// Like [`submit`](Self::submit), but the request can be abandoned by
    /// calling `abort()` on the [`futures::future::AbortHandle`] paired with
    /// `registration`.
    pub async fn submit_cancellable(
        &mut self,
        registration: AbortRegistration,
    ) -> Result<SubmissionReport, ConvertifyError> {
        self.run(Some(registration)).await
    }

    async fn run(
        &mut self,
        registration: Option<AbortRegistration>,
    ) -> Result<SubmissionReport, ConvertifyError> {
        let Some(file) = self.state.selected_file.clone() else {
            let err = ConvertifyError::NoFileSelected;
            self.state.error_message = Some(err.user_message());
            self.publish();
            return Err(err);
        };
        let mode = self.state.selected_mode;

        self.state.phase = SubmissionPhase::Submitting;
        self.state.error_message = None;
        self.publish();
        info!("Submitting {} as {}", file.name(), mode);
        if let Some(ref obs) = self.config.observer {
            obs.on_submit_start(&self.state);
        }

        let request = exchange(&self.service, &self.sink, &self.config, &file, mode);
        let outcome = match registration {
            Some(reg) => Abortable::new(request, reg)
                .await
                .unwrap_or(Err(ConvertifyError::Cancelled)),
            None => request.await,
        };

        match outcome {
            Ok(report) => {
                info!(
                    "Saved {} ({} bytes) in {}ms",
                    report.saved_to.display(),
                    report.bytes,
                    report.duration_ms
                );
                self.state.phase = SubmissionPhase::Succeeded {
                    saved_to: report.saved_to.clone(),
                    bytes: report.bytes,
                };
                self.publish();
                if let Some(ref obs) = self.config.observer {
                    obs.on_submit_complete(&report.saved_to.display().to_string(), report.bytes);
                }
                Ok(report)
            }
            Err(e) => {
                let message = e.user_message();
                self.state.phase = SubmissionPhase::Failed { kind: e.kind() };
                self.state.error_message = Some(message.clone());
                self.publish();
                // Observers drawing over the terminal get to clear first.
                if let Some(ref obs) = self.config.observer {
                    obs.on_submit_error(&message);
                }
                error!("Conversion failed: {}", e);
                Err(e)
            }
        }
    }
}

/// One round trip: convert remotely, then save.
async fn exchange<S, D>(
    service: &S,
    sink: &D,
    config: &ClientConfig,
    file: &SelectedFile,
    mode: ConversionMode,
) -> Result<SubmissionReport, ConvertifyError>
where
    S: ConversionService,
    D: DownloadSink,
{
    let start = Instant::now();

    let bytes = match config.timeout_secs {
        Some(secs) => tokio::time::timeout(Duration::from_secs(secs), service.convert(file, mode))
            .await
            .unwrap_or(Err(ConvertifyError::Timeout { secs }))?,
        None => service.convert(file, mode).await?,
    };

    let filename = config.output_naming.filename_for(file.name(), mode);
    let saved_to = sink.save(&filename, &bytes).await?;

    Ok(SubmissionReport {
        input_name: file.name().to_string(),
        mode,
        saved_to,
        bytes: bytes.len(),
        duration_ms: start.elapsed().as_millis() as u64,
    })
}
