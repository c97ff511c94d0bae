//! `embedkit thumbnail` command implementation.

use clap::Args;
use embedkit_media::{EmbedError, RendererRegistry};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the thumbnail command.
#[derive(Args)]
pub(crate) struct ThumbnailArgs {
    /// Media URL.
    url: String,
}

impl ThumbnailArgs {
    /// Execute the thumbnail command.
    ///
    /// A missing thumbnail is reported as a warning, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is unsupported or malformed.
    pub(crate) fn execute(
        self,
        registry: &RendererRegistry,
        output: &Output,
    ) -> Result<(), CliError> {
        let renderer = registry
            .find(&self.url)
            .ok_or_else(|| EmbedError::Unsupported(self.url.clone()))?;

        let thumbnail = renderer.thumbnail(&self.url)?;
        if thumbnail.is_empty() {
            output.warning(&format!("No thumbnail available for {}", self.url));
        } else {
            output.print(&thumbnail);
        }
        Ok(())
    }
}
