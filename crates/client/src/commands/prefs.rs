//! Interface preferences kept in the document.

use anyhow::Result;
use clap::Subcommand;
use shadow_core::BuffToolsView;
use shadow_core::state::PANEL_COUNT;

use super::done;
use crate::app::App;

fn parse_view(value: &str) -> Result<BuffToolsView, String> {
    value
        .parse()
        .map_err(|_| format!("expected hide, custom, dc or both, got '{}'", value))
}

#[derive(Subcommand, Debug)]
pub enum PrefsCommand {
    /// Which helper panels show under the buff list
    Tools {
        #[arg(value_parser = parse_view)]
        view: BuffToolsView,
    },

    /// Collapse or expand a panel (1-6)
    Panel {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=PANEL_COUNT as i64))]
        panel: u8,
    },

    /// Show stored preferences
    Show,
}

impl PrefsCommand {
    pub fn execute(self, app: &mut App) -> Result<()> {
        let session = &mut app.session;
        match self {
            Self::Tools { view } => {
                session.apply(|fruit| fruit.set_buff_tools_view(view))?;
                done(format!("Buff tools: {}", view));
            }
            Self::Panel { panel } => {
                let collapsed = session.apply(|fruit| fruit.toggle_panel(panel))?;
                done(format!(
                    "Panel {} {}",
                    panel,
                    if collapsed { "collapsed" } else { "expanded" }
                ));
            }
            Self::Show => {
                let ui = &session.state().ui;
                println!("Current target: {}", ui.current_target);
                println!("Buff tools:     {}", ui.buff_tools_view);
                println!(
                    "Last DC:        {}",
                    ui.shadow_dc()
                        .map_or_else(|| "not computed".to_string(), |dc| dc.to_string())
                );
                let collapsed: Vec<String> = (1..=PANEL_COUNT)
                    .filter(|panel| ui.is_collapsed(*panel))
                    .map(|panel| panel.to_string())
                    .collect();
                println!(
                    "Collapsed:      {}",
                    if collapsed.is_empty() {
                        "none".to_string()
                    } else {
                        collapsed.join(", ")
                    }
                );
            }
        }
        Ok(())
    }
}
