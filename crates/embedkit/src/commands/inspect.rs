//! `embedkit inspect` command implementation.

use std::collections::BTreeMap;

use clap::Args;
use embedkit_media::{EmbedError, MediaReference, RendererRegistry};
use serde::Serialize;

use super::CONTEXTS;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the inspect command.
#[derive(Args)]
pub(crate) struct InspectArgs {
    /// Media URL.
    url: String,

    /// View context whose style is shown.
    #[arg(long, value_parser = CONTEXTS, default_value = "view")]
    context: String,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

/// What the pipeline derives from a URL, short of fetching it.
#[derive(Serialize)]
struct Inspection {
    provider: &'static str,
    media_type: Option<&'static str>,
    media_id: String,
    discovery_url: String,
    native_url: String,
    meta: BTreeMap<String, String>,
    style: String,
}

impl InspectArgs {
    /// Execute the inspect command. No network request is made.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is unsupported or malformed.
    pub(crate) fn execute(
        self,
        registry: &RendererRegistry,
        output: &Output,
    ) -> Result<(), CliError> {
        let unsupported = || EmbedError::Unsupported(self.url.clone());
        let renderer = registry.find(&self.url).ok_or_else(unsupported)?;
        let media_id = renderer.media_id(&self.url)?.ok_or_else(unsupported)?;

        let inspection = Inspection {
            provider: renderer.name(),
            media_type: renderer.media_type(&self.url),
            discovery_url: renderer.oembed_url(&media_id),
            native_url: renderer.native_url(&MediaReference::new(media_id.as_str())),
            meta: renderer.meta(&self.url),
            style: renderer.style(&self.context).to_css(),
            media_id,
        };

        if self.json {
            output.print(&serde_json::to_string_pretty(&inspection)?);
            return Ok(());
        }

        output.highlight(&self.url);
        output.field("provider", inspection.provider);
        output.field("type", inspection.media_type.unwrap_or("-"));
        output.field("id", &inspection.media_id);
        output.field("discovery", &inspection.discovery_url);
        output.field("native", &inspection.native_url);
        for (key, value) in &inspection.meta {
            output.field("meta", &format!("{key}={value}"));
        }
        output.field("style", &inspection.style);
        Ok(())
    }
}
