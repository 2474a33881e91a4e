//! Library settings read from the process environment.
//!
//! Binaries call [`DirectivesConfig::load`] to fill the environment from `.env` and the XDG
//! `config.toml` first; tests and embedders can build the struct directly.

use std::str::FromStr;

/// App name used for `$XDG_CONFIG_HOME/<app>/config.toml`.
pub const APP_NAME: &str = "directive-middleware";

pub const ENV_DUPLICATE_REGISTRATION: &str = "DIRECTIVES_DUPLICATE_REGISTRATION";
pub const ENV_TRACE_DISPATCH: &str = "DIRECTIVES_TRACE_DISPATCH";

/// What [`DirectiveRegistry::register`](crate::DirectiveRegistry::register) does when the
/// name is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Last registration wins.
    #[default]
    Overwrite,
    /// Last registration wins and a warning is logged.
    Warn,
    /// The first registration is kept and registration fails.
    Reject,
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(DuplicatePolicy::Overwrite),
            "warn" => Ok(DuplicatePolicy::Warn),
            "reject" => Ok(DuplicatePolicy::Reject),
            other => Err(format!(
                "unknown duplicate registration policy {other:?} (expected overwrite, warn or reject)"
            )),
        }
    }
}

/// Settings for schema construction and dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectivesConfig {
    pub duplicate_registration: DuplicatePolicy,
    /// When true, dispatch steps are logged at debug instead of trace.
    pub trace_dispatch: bool,
}

impl DirectivesConfig {
    /// Reads `DIRECTIVES_DUPLICATE_REGISTRATION` (`overwrite` | `warn` | `reject`) and
    /// `DIRECTIVES_TRACE_DISPATCH` (bool). Unset or invalid values fall back to the defaults;
    /// invalid ones are logged.
    pub fn from_env() -> Self {
        let duplicate_registration = match std::env::var(ENV_DUPLICATE_REGISTRATION) {
            Ok(raw) => raw.parse().unwrap_or_else(|reason: String| {
                tracing::warn!(%reason, "ignoring {}", ENV_DUPLICATE_REGISTRATION);
                DuplicatePolicy::default()
            }),
            Err(_) => DuplicatePolicy::default(),
        };
        let trace_dispatch = std::env::var(ENV_TRACE_DISPATCH)
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(false);
        Self {
            duplicate_registration,
            trace_dispatch,
        }
    }

    /// Applies `.env` and XDG settings for [`APP_NAME`] to the environment, then [`from_env`](Self::from_env).
    pub fn load() -> Result<Self, env_config::LoadError> {
        let applied = env_config::load_and_apply(APP_NAME, None)?;
        tracing::debug!(?applied, "loaded directive-middleware settings");
        Ok(Self::from_env())
    }

    pub fn with_duplicate_registration(self, duplicate_registration: DuplicatePolicy) -> Self {
        Self {
            duplicate_registration,
            ..self
        }
    }

    pub fn with_trace_dispatch(self, trace_dispatch: bool) -> Self {
        Self {
            trace_dispatch,
            ..self
        }
    }
}
