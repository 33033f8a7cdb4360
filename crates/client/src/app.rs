//! Composition root: configuration, document session, generator.

use std::path::PathBuf;

use anyhow::{Context, Result};
use shadow_content::{CatalogLoader, ConfigLoader};
use shadow_core::{CalculatorConfig, CatalogMerge};
use shadow_runtime::{FileDocumentRepository, GenerationHandler, RuntimeConfig, Session};

/// Options shared by every command.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Calculator settings (TOML)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Extra buff definitions to merge into the catalog (RON)
    #[arg(long, global = true, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Also log to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log session name (default: timestamp)
    #[arg(long, global = true)]
    pub session: Option<String>,
}

pub struct App {
    pub session: Session<FileDocumentRepository>,
    pub runtime: RuntimeConfig,
}

impl App {
    pub fn open(opts: &GlobalOpts) -> Result<Self> {
        let runtime = RuntimeConfig::from_env();

        let mut calculator = match &opts.config {
            Some(path) => ConfigLoader::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => CalculatorConfig::default(),
        };
        if runtime.enforce_spend_cap {
            calculator.enforce_spend_cap = true;
        }

        let repo = FileDocumentRepository::new(&runtime.data_dir, &runtime.storage_key)
            .with_context(|| {
                format!("Failed to open data directory {}", runtime.data_dir.display())
            })?;
        tracing::info!("Document: {}", repo.path().display());

        let mut session = Session::open(repo, calculator);

        if let Some(path) = &opts.catalog {
            let definitions = CatalogLoader::load(path)
                .with_context(|| format!("Failed to load catalog {}", path.display()))?;
            let merged = session
                .apply_if(|fruit| fruit.merge_catalog(definitions), CatalogMerge::changed)?;
            for id in &merged.skipped {
                tracing::warn!("Skipped {}: built-in buffs cannot be redefined", id.as_str());
            }
            if merged.changed() {
                tracing::info!(
                    "Merged buff definitions from {}: {} added, {} replaced",
                    path.display(),
                    merged.added,
                    merged.replaced
                );
            }
        }

        Ok(Self { session, runtime })
    }

    pub fn generator(&self) -> GenerationHandler {
        GenerationHandler::from_config(&self.runtime.generation)
    }
}
