//! Runtime settings for the intake server.
//!
//! Values come from the process environment (plus an optional `.env` file)
//! under the `AID_INTAKE` prefix, with `__` descending into sections:
//! `AID_INTAKE__DOCUMENTS__TEMPLATE_PATH=forms/intake.docx`.
//!
//! ```no_run
//! use aid_intake::config::AppConfig;
//!
//! let config = AppConfig::load().expect("environment readable");
//! config.validate().expect("settings usable");
//! ```

mod ai;
mod documents;
mod error;
mod questionnaire;
mod server;

pub use ai::AiConfig;
pub use documents::DocumentsConfig;
pub use error::{ConfigError, ValidationError};
pub use questionnaire::QuestionnaireConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// All sections default independently; `validate` only insists on an API key.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// Judge model
    #[serde(default)]
    pub ai: AiConfig,

    #[serde(default)]
    pub questionnaire: QuestionnaireConfig,

    /// Template, answer record and generated output
    #[serde(default)]
    pub documents: DocumentsConfig,
}

impl AppConfig {
    /// Reads `.env` when present, then the `AID_INTAKE__*` variables.
    ///
    /// # Errors
    ///
    /// `ConfigError::LoadError` when a variable cannot be parsed into its field.
    pub fn load() -> Result<Self, ConfigError> {
        // absent .env is normal outside development
        let _ = dotenvy::dotenv();

        let source = config::Environment::default()
            .prefix("AID_INTAKE")
            .separator("__");

        Ok(config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?)
    }

    /// Checks each section in turn and stops at the first problem.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.questionnaire.validate()?;
        self.documents.validate()
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
