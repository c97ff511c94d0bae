//! `embedkit render` command implementation.

use clap::Args;
use embedkit_media::{DeferredMount, HtmlFragment, Rendering, RendererRegistry};
use serde::Serialize;

use super::CONTEXTS;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Media URLs to render.
    #[arg(required = true)]
    urls: Vec<String>,

    /// View context used to size client-mounted players.
    #[arg(long, value_parser = CONTEXTS)]
    context: Option<String>,

    /// Print one JSON document per URL instead of HTML.
    #[arg(long)]
    json: bool,
}

/// JSON form of one rendered URL.
#[derive(Serialize)]
struct RenderedEntry<'a> {
    url: &'a str,
    html: HtmlFragment,
    placeholder: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    mount: Option<&'a DeferredMount>,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// URLs are rendered in parallel. Every URL that renders is printed even
    /// when others fail.
    ///
    /// # Errors
    ///
    /// Returns an error if any URL is unsupported or malformed.
    pub(crate) fn execute(
        self,
        registry: &RendererRegistry,
        output: &Output,
    ) -> Result<(), CliError> {
        let batch = registry.render_all(&self.urls, self.context.as_deref());

        for item in &batch.rendered {
            if item.rendering.is_placeholder() {
                output.warning(&format!("Could not retrieve metadata for {}", item.url));
            }

            if self.json {
                let mount = match &item.rendering {
                    Rendering::Deferred(mount) => Some(mount),
                    _ => None,
                };
                let entry = RenderedEntry {
                    url: &item.url,
                    html: item.rendering.to_fragment(),
                    placeholder: item.rendering.is_placeholder(),
                    mount,
                };
                output.print(&serde_json::to_string(&entry)?);
            } else {
                output.print(item.rendering.to_fragment().as_str());
            }
        }

        for err in &batch.errors {
            output.error(&err.to_string());
        }

        if batch.errors.is_empty() {
            Ok(())
        } else {
            Err(CliError::Render {
                failed: batch.errors.len(),
                total: self.urls.len(),
            })
        }
    }
}
