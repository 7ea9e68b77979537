//! `folio render` command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use folio_config::{CliSettings, Config};
use folio_renderer::{Disposition, NodeReport, PortableTextRenderer, RenderResult, RendererRegistry};
use serde_json::Value;

use super::render_options;
use crate::error::CliError;
use crate::output::Output;

/// Fields of a document object that may hold the node array.
const CONTENT_FIELDS: &[&str] = &["body", "content"];

/// Output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    /// Rendered HTML only.
    Html,
    /// JSON object with `html` and per-node `reports`.
    Json,
}

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Path to the JSON document (a node array, or an object with `body` or `content`).
    input: PathBuf,

    /// Write output to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Alt text for images without their own (overrides config).
    #[arg(long)]
    fallback_alt: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, input or output fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            fallback_alt: self.fallback_alt.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }
        let options = render_options(&config)?;

        let text = std::fs::read_to_string(&self.input)?;
        let document: Value = serde_json::from_str(&text)?;
        let nodes = content_nodes(&document)?;
        tracing::info!(path = %self.input.display(), nodes = nodes.len(), "Rendering document");

        let renderer = PortableTextRenderer::new(RendererRegistry::new(), options);
        let result = renderer.render(nodes);

        let body = match self.format {
            Format::Html => result.html.clone(),
            Format::Json => serde_json::to_string_pretty(&result)?,
        };
        write_output(self.output.as_deref(), &body)?;
        if let Some(path) = &self.output {
            output.done(format_args!("Wrote {}", path.display()));
        }

        print_summary(&output, &result);
        Ok(())
    }
}

/// Locate the node array in a decoded document.
fn content_nodes(document: &Value) -> Result<&[Value], CliError> {
    match document {
        Value::Array(nodes) => Ok(nodes),
        Value::Object(_) => CONTENT_FIELDS
            .iter()
            .find_map(|field| document.get(field).and_then(Value::as_array))
            .map(Vec::as_slice)
            .ok_or_else(|| {
                CliError::Validation(
                    "document object needs a `body` or `content` array".to_owned(),
                )
            }),
        _ => Err(CliError::Validation(
            "document must be a JSON array of content nodes".to_owned(),
        )),
    }
}

fn write_output(path: Option<&Path>, content: &str) -> Result<(), CliError> {
    if let Some(path) = path {
        std::fs::write(path, content)?;
    } else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(content.as_bytes())?;
        stdout.write_all(b"\n")?;
    }
    Ok(())
}

fn print_summary(output: &Output, result: &RenderResult) {
    let suppressed = result.count(Disposition::Suppressed);
    let passthrough = result.count(Disposition::Passthrough);
    output.note(format_args!(
        "Rendered {} of {} node(s)",
        result.count(Disposition::Rendered),
        result.reports.len()
    ));

    if suppressed > 0 {
        output.warn(format_args!("Suppressed ({suppressed}):"));
        for report in filter(result, Disposition::Suppressed) {
            output.report(report);
        }
    }
    if passthrough > 0 {
        output.note(format_args!("No renderer ({passthrough}):"));
        for report in filter(result, Disposition::Passthrough) {
            output.report(report);
        }
    }
}

fn filter(result: &RenderResult, disposition: Disposition) -> impl Iterator<Item = &NodeReport> {
    result
        .reports
        .iter()
        .filter(move |report| report.disposition == disposition)
}
