use crate::error::{CallbackError, Result};
use std::sync::OnceLock;

/// Where listener invocations run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListenerMode {
    /// Tokio blocking pool when called inside a runtime, otherwise a fresh thread.
    #[default]
    Auto,
    /// Always a fresh OS thread.
    Thread,
}

#[derive(Debug, Clone, Default)]
pub struct DispatchConfig {
    pub listener_mode: ListenerMode,
}

static CONFIG: OnceLock<DispatchConfig> = OnceLock::new();

/// Installs the process-wide dispatch configuration. Must happen before the
/// first dispatch; afterwards the defaults are fixed.
pub fn install(cfg: DispatchConfig) -> Result<()> {
    CONFIG
        .set(cfg)
        .map_err(|_| CallbackError::ConfigAlreadyInstalled)
}

pub fn current() -> &'static DispatchConfig {
    CONFIG.get_or_init(DispatchConfig::default)
}
