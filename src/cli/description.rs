//! Description command: AI-generated pull request description.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use crate::ai::{DetailLevel, OpenAiBackend};
use crate::git::GitRepository;
use crate::output::{format_description, NO_CHANGES_MESSAGE};
use crate::pipeline::{DescriptionPipeline, Outcome, PipelineOptions};
use crate::utils::{CompletionSettings, Settings};

/// Description command options.
#[derive(Parser)]
pub struct DescriptionCommand {
    /// How detailed the description should be.
    #[arg(long, value_enum, default_value_t = DetailLevel::Medium)]
    pub detail: DetailLevel,

    /// Base branch to diff against (defaults to master, then main).
    #[arg(long, value_name = "BRANCH")]
    pub base: Option<String>,

    /// Model to use (overrides OPENAI_MODEL).
    #[arg(long)]
    pub model: Option<String>,

    /// Path to the git repository.
    #[arg(long, value_name = "PATH", default_value = ".")]
    pub repo: PathBuf,
}

impl DescriptionCommand {
    /// Executes the description command.
    pub async fn execute(self) -> Result<()> {
        let config = self.completion_settings(&Settings::get_settings_path()?)?;
        debug!(model = %config.model, base_url = %config.base_url, "Resolved completion settings");

        let repo = GitRepository::open_at(&self.repo)?;
        let backend = OpenAiBackend::new(config.base_url.clone())?;

        let options = PipelineOptions {
            base_branch: self.base,
            detail: self.detail,
            model: config.model,
        };
        let outcome = DescriptionPipeline::new(&repo, &backend)
            .run(&options, &config.api_key)
            .await
            .context("Failed to generate PR description")?;

        match outcome {
            Outcome::NoChanges => println!("{NO_CHANGES_MESSAGE}"),
            Outcome::Description(text) => println!("{}", format_description(&text)),
        }

        Ok(())
    }

    /// Resolves backend configuration from the environment and the settings file.
    fn completion_settings(&self, settings_path: &Path) -> Result<CompletionSettings> {
        let settings = Settings::load_from_path(settings_path).context("Failed to load settings")?;
        Ok(CompletionSettings::resolve(&settings, self.model.clone()))
    }
}
