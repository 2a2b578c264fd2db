use crate::cli::Cli;
use crate::core::LanguagePlan;
use std::env;

const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Runtime settings resolved from the command line and the environment.
pub struct Settings {
    pub languages: LanguagePlan,
    pub api_key: Option<String>,
}

impl Settings {
    pub fn load(cli: &Cli) -> Self {
        // A missing .env file is normal.
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!("Ignoring unreadable .env file: {e}"),
        }

        Self {
            languages: LanguagePlan {
                target: cli.language.clone(),
                fallback: cli.fallback_language.clone(),
            },
            api_key: env::var(API_KEY_ENV).ok(),
        }
    }
}
