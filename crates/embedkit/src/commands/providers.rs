//! `embedkit providers` command implementation.

use clap::Args;
use embedkit_media::{ProviderCapabilities, RendererRegistry};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the providers command.
#[derive(Args)]
pub(crate) struct ProvidersArgs {
    /// Print capabilities as JSON.
    #[arg(long)]
    json: bool,
}

impl ProvidersArgs {
    /// Execute the providers command.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub(crate) fn execute(
        self,
        registry: &RendererRegistry,
        output: &Output,
    ) -> Result<(), CliError> {
        let capabilities: Vec<ProviderCapabilities> = registry
            .renderers()
            .iter()
            .map(|r| r.capabilities())
            .collect();

        if self.json {
            output.print(&serde_json::to_string_pretty(&capabilities)?);
            return Ok(());
        }

        if capabilities.is_empty() {
            output.warning("No providers enabled");
        }
        for caps in &capabilities {
            output.highlight(caps.type_name);
            output.field("renderer", caps.display_name);
            output.field("icon", caps.icon);
        }
        Ok(())
    }
}
