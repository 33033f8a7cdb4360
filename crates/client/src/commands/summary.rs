//! Read-only projections: per-target summaries and the power pool.

use anyhow::Result;
use clap::Args;

use super::missing;
use crate::app::App;
use crate::render;

/// Print the summary card of every target (or one)
#[derive(Args, Debug)]
pub struct Summary {
    /// Only this target id
    #[arg(long)]
    pub target: Option<String>,
}

impl Summary {
    pub fn execute(self, app: &mut App) -> Result<()> {
        let session = &mut app.session;
        let rebound = session.apply(|fruit| fruit.rebind_orphan_cards())?;
        if rebound > 0 {
            tracing::info!("Rebound {} orphaned ability card(s)", rebound);
        }

        let summaries = session.view(|fruit| fruit.summaries());
        let state = session.state();
        let mut shown = 0;
        for (target, summary) in state.targets.iter().zip(&summaries) {
            if self.target.as_deref().is_some_and(|id| target.id != id) {
                continue;
            }
            render::summary(summary);
            println!();
            shown += 1;
        }

        match &self.target {
            Some(id) if shown == 0 => Err(missing("Target", id)),
            _ => Ok(()),
        }
    }
}

/// Show total, spent, and available shadow power
#[derive(Args, Debug)]
pub struct Pool {}

impl Pool {
    pub fn execute(self, app: &mut App) -> Result<()> {
        render::pool(&app.session.view(|fruit| fruit.power_pool()));
        Ok(())
    }
}
