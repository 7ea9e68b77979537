//! `folio check` command implementation.

use std::path::PathBuf;

use clap::Args;
use folio_config::Config;
use folio_renderer::{VideoHosts, is_external_href, is_safe_href};

use super::render_options;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// URLs to classify.
    #[arg(required = true)]
    urls: Vec<String>,

    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// How the renderer treats one URL.
#[derive(Debug, PartialEq, Eq)]
struct UrlCheck {
    safe: bool,
    external: bool,
    embed: Option<String>,
}

impl UrlCheck {
    fn new(url: &str, hosts: &VideoHosts) -> Self {
        let safe = is_safe_href(url);
        Self {
            safe,
            external: is_external_href(url),
            embed: safe.then(|| hosts.embeddable_url(url)).flatten(),
        }
    }
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;
        let options = render_options(&config)?;

        for url in &self.urls {
            let check = UrlCheck::new(url, &options.video_hosts);
            output.heading(url);
            if check.safe {
                output.field("safe", "yes");
            } else {
                output.flag("safe", "no (links keep their text only)");
            }
            output.field("external", if check.external { "yes" } else { "no" });
            output.field("embed", check.embed.as_deref().unwrap_or("-"));
        }
        Ok(())
    }
}
