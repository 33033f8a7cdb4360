//! Ask the external text generator for ability ideas.

use anyhow::{Result, anyhow};
use clap::Args;
use console::style;
use shadow_runtime::HandlerResponse;

use crate::app::App;

/// Draft techniques, forms, and corpse abilities from the current document
#[derive(Args, Debug)]
pub struct Generate {
    /// Extra notes or theme for the generator
    #[arg(default_value = "")]
    pub notes: String,

    /// Print the request body instead of sending it
    #[arg(long)]
    pub dry_run: bool,
}

impl Generate {
    pub async fn execute(self, app: &mut App) -> Result<()> {
        let request = app.session.generation_request(&self.notes);

        if self.dry_run {
            println!("{}", serde_json::to_string_pretty(&request)?);
            println!();
            println!("{}", request.prompt());
            return Ok(());
        }

        let handler = app.generator();
        let body = serde_json::to_value(&request)?;
        tracing::info!(
            "Requesting generation: {} shadow(s), {} buff(s) selected",
            request.shadows.len(),
            request.selected_buff_ids.len()
        );

        println!("{}", style("Generating shadow abilities…").dim());
        let response: HandlerResponse = handler.handle("POST", Some(body)).await;

        match response.text() {
            Some(text) if response.is_success() => {
                println!("{}", text);
                Ok(())
            }
            _ => Err(anyhow!(
                "Generation failed ({}): {}",
                response.status,
                response.body
            )),
        }
    }
}

