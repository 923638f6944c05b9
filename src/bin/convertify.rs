//! CLI binary for convertify.
//!
//! A thin shim over the library crate: the positional argument is the file
//! picker, `--mode` is the selector, and running the command presses
//! "Converter".

use anyhow::{Context, Result};
use clap::Parser;
use convertify::form::{FormState, FORM_TITLE};
use convertify::{
    ClientConfig, ConversionForm, ConversionMode, OutputNaming, SelectedFile, SubmissionObserver,
    CONVERSION_OPTIONS,
};
use futures::future::AbortHandle;
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── Spinner observer using indicatif ─────────────────────────────────────────

/// Renders the loading flag as a spinner labelled like the disabled button.
struct CliObserver {
    bar: ProgressBar,
}

impl CliObserver {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);
        Arc::new(Self { bar })
    }
}

impl SubmissionObserver for CliObserver {
    fn on_submit_start(&self, state: &FormState) {
        let input_name = state.selected_file().map(|f| f.name()).unwrap_or_default();
        self.bar.set_prefix(state.submit_label());
        self.bar
            .set_message(format!("{input_name} → {}", state.selected_mode().label()));
        self.bar.enable_steady_tick(Duration::from_millis(80));
    }

    fn on_submit_complete(&self, filename: &str, bytes: usize) {
        self.bar.finish_and_clear();
        eprintln!(
            "{} {}  {}",
            green("✔"),
            bold(filename),
            dim(&format!("{bytes} bytes"))
        );
    }

    fn on_submit_error(&self, _message: &str) {
        // The message itself is reported once, by main's error path.
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert a PDF to PNG (default mode), saved as ./new-archive.bin
  convertify report.pdf

  # Extract text from a DOCX into ./out/letter.txt
  convertify --mode docx-to-txt --name-from-input -o out letter.docx

  # OCR an image against a remote service
  convertify --endpoint http://converter:5000/api/convert -m img-to-text scan.jpg

  # Show the available modes
  convertify --list-modes

ENVIRONMENT VARIABLES:
  CONVERTIFY_ENDPOINT     Conversion endpoint URL
  CONVERTIFY_OUTPUT_DIR   Directory converted files are saved into
  CONVERTIFY_TIMEOUT      Request timeout in seconds (0 disables)
  RUST_LOG                Override the log filter
"#;

/// Send a file to a conversion service and save the result.
#[derive(Parser, Debug)]
#[command(
    name = "convertify",
    version,
    about = "Send a file to a conversion service and save the result",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// File to convert.
    #[arg(required_unless_present = "list_modes")]
    input: Option<PathBuf>,

    /// Conversion mode.
    #[arg(short, long, env = "CONVERTIFY_MODE", value_enum, default_value = "pdf-to-png")]
    mode: ModeArg,

    /// Conversion endpoint URL.
    #[arg(long, env = "CONVERTIFY_ENDPOINT", default_value = convertify::config::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Directory the converted file is saved into.
    #[arg(short, long, env = "CONVERTIFY_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Name of the saved file.
    #[arg(long, env = "CONVERTIFY_OUTPUT_NAME", default_value = convertify::config::DEFAULT_OUTPUT_FILENAME,
          conflicts_with = "name_from_input")]
    output_name: String,

    /// Name the saved file after the input, with the mode's extension.
    #[arg(long)]
    name_from_input: bool,

    /// Request timeout in seconds (0 disables).
    #[arg(long, env = "CONVERTIFY_TIMEOUT", default_value_t = 120)]
    timeout: u64,

    /// Print the available conversion modes and exit.
    #[arg(long)]
    list_modes: bool,

    /// Print a JSON report instead of the summary line.
    #[arg(long)]
    json: bool,

    /// Disable the spinner.
    #[arg(long, env = "CONVERTIFY_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "CONVERTIFY_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "CONVERTIFY_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    PdfToPng,
    DocxToTxt,
    ImgToText,
}

impl From<ModeArg> for ConversionMode {
    fn from(v: ModeArg) -> Self {
        match v {
            ModeArg::PdfToPng => ConversionMode::PdfToPng,
            ModeArg::DocxToTxt => ConversionMode::DocxToTxt,
            ModeArg::ImgToText => ConversionMode::ImgToText,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── List-modes mode ──────────────────────────────────────────────────
    if cli.list_modes {
        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&CONVERSION_OPTIONS)
                    .context("Failed to serialise options")?
            );
        } else {
            for (i, option) in CONVERSION_OPTIONS.iter().enumerate() {
                let marker = if i == 0 { " (default)" } else { "" };
                println!("{:<12} {}{}", option.value, option.label, dim(marker));
            }
        }
        return Ok(());
    }

    let input = cli
        .input
        .clone()
        .context("No input file given")?;

    // ── Build form ───────────────────────────────────────────────────────
    let config = build_config(&cli, show_progress)?;
    let mut form = ConversionForm::from_config(config).context("Failed to set up client")?;

    if !cli.quiet && !cli.json {
        eprintln!("{}", bold(FORM_TITLE));
    }

    let file = SelectedFile::from_path(&input)
        .await
        .with_context(|| format!("Failed to read input file {}", input.display()))?;
    if !cli.quiet && !cli.json {
        eprintln!("Arquivo selecionado: {}", file.name());
    }
    form.select_file(Some(file));
    form.select_conversion_mode(cli.mode.into());

    // ── Submit (Ctrl-C aborts the request) ───────────────────────────────
    let (abort, registration) = AbortHandle::new_pair();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            abort.abort();
        }
    });

    match form.submit_cancellable(registration).await {
        Ok(report) => {
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report).context("Failed to serialise report")?
                );
            } else if !cli.quiet && !show_progress {
                eprintln!(
                    "{}  {}  {} bytes  {}ms",
                    green("✔"),
                    bold(&report.saved_to.display().to_string()),
                    report.bytes,
                    report.duration_ms
                );
            }
            Ok(())
        }
        Err(_) => {
            let message = form
                .state()
                .error_message()
                .unwrap_or(convertify::error::MSG_CONVERSION_FAILED)
                .to_string();
            anyhow::bail!(red(&message))
        }
    }
}

/// Map CLI args to `ClientConfig`.
fn build_config(cli: &Cli, show_progress: bool) -> Result<ClientConfig> {
    let naming = if cli.name_from_input {
        OutputNaming::FromInput
    } else {
        OutputNaming::Fixed(cli.output_name.clone())
    };

    let mut builder = ClientConfig::builder()
        .endpoint(cli.endpoint.clone())
        .timeout_secs(cli.timeout)
        .output_dir(cli.output_dir.clone())
        .output_naming(naming);

    if show_progress {
        builder = builder.observer(CliObserver::new());
    }

    builder.build().context("Invalid configuration")
}
