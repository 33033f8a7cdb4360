//! A loaded document plus the repository it came from.

use shadow_core::{CalculatorConfig, ShadowFruit, SystemState};

use crate::document::load_with_defaults;
use crate::error::{Result, RuntimeError};
use crate::generation::GenerationRequest;
use crate::repository::DocumentRepository;

/// Applies one operation at a time and rewrites the document after each.
pub struct Session<R: DocumentRepository> {
    repo: R,
    config: CalculatorConfig,
    state: SystemState,
}

impl<R: DocumentRepository> Session<R> {
    /// Load the saved document (or defaults) from `repo`.
    pub fn open(repo: R, config: CalculatorConfig) -> Self {
        let state = load_with_defaults(&repo, &config);
        tracing::debug!(
            shadows = state.shadows.len(),
            targets = state.targets.len(),
            "Session opened"
        );
        Self {
            repo,
            config,
            state,
        }
    }

    pub fn state(&self) -> &SystemState {
        &self.state
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Read-only access through the controller, without saving.
    pub fn view<T>(&mut self, op: impl FnOnce(&ShadowFruit<'_>) -> T) -> T {
        let fruit = ShadowFruit::new(&mut self.state, &self.config);
        op(&fruit)
    }

    /// Run `op` against the document, then save it.
    pub fn apply<T>(&mut self, op: impl FnOnce(&mut ShadowFruit<'_>) -> T) -> Result<T> {
        let output = {
            let mut fruit = ShadowFruit::new(&mut self.state, &self.config);
            op(&mut fruit)
        };
        self.save()?;
        Ok(output)
    }

    /// Like [`Self::apply`], but saves only when `changed` holds for the output.
    pub fn apply_if<T>(
        &mut self,
        op: impl FnOnce(&mut ShadowFruit<'_>) -> T,
        changed: impl FnOnce(&T) -> bool,
    ) -> Result<T> {
        let output = {
            let mut fruit = ShadowFruit::new(&mut self.state, &self.config);
            op(&mut fruit)
        };
        if changed(&output) {
            self.save()?;
        }
        Ok(output)
    }

    /// Like [`Self::apply`], but a rejected operation is not saved.
    pub fn try_apply<T, E>(
        &mut self,
        op: impl FnOnce(&mut ShadowFruit<'_>) -> std::result::Result<T, E>,
    ) -> Result<T>
    where
        RuntimeError: From<E>,
    {
        let output = {
            let mut fruit = ShadowFruit::new(&mut self.state, &self.config);
            op(&mut fruit)?
        };
        self.save()?;
        Ok(output)
    }

    pub fn save(&self) -> Result<()> {
        self.repo.save(&self.state).inspect_err(|err| {
            tracing::error!("Failed to save document: {}", err);
        })?;
        Ok(())
    }

    /// Delete the stored document and start over from defaults.
    pub fn reset(&mut self) -> Result<()> {
        self.repo.clear()?;
        self.state = SystemState::new(&self.config);
        tracing::info!("Document reset to defaults");
        Ok(())
    }

    /// Snapshot for the text generator.
    pub fn generation_request(&self, notes: &str) -> GenerationRequest {
        GenerationRequest::from_state(&self.state, notes)
    }
}
