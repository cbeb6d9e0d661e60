use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Startup configuration
// ---------------------------------------------------------------------------

pub const DATA_ENV: &str = "LAUNCH_DASH_DATA";
pub const PAYLOAD_STEP_ENV: &str = "LAUNCH_DASH_PAYLOAD_STEP";

/// Settings resolved once at startup: defaults, then env vars, then argv.
#[derive(Debug, Clone, PartialEq)]
pub struct DashConfig {
    /// Launch table to open on startup (first CLI argument or `LAUNCH_DASH_DATA`).
    pub data_path: Option<PathBuf>,
    /// Payload slider step in kilograms.
    pub payload_step: f64,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            payload_step: 1000.0,
            window_size: [1200.0, 800.0],
            min_window_size: [600.0, 400.0],
        }
    }
}

impl DashConfig {
    pub fn from_env() -> Self {
        Self::resolve(
            |key| std::env::var(key).ok(),
            std::env::args().skip(1),
        )
    }

    /// Resolve from an env lookup and the CLI arguments (without argv[0]).
    pub fn resolve(
        env: impl Fn(&str) -> Option<String>,
        mut args: impl Iterator<Item = String>,
    ) -> Self {
        let mut config = Self::default();

        if let Some(path) = env(DATA_ENV).filter(|p| !p.is_empty()) {
            config.data_path = Some(PathBuf::from(path));
        }
        if let Some(raw) = env(PAYLOAD_STEP_ENV) {
            match raw.parse::<f64>() {
                Ok(step) if step.is_finite() && step > 0.0 => config.payload_step = step,
                _ => log::warn!("ignoring {PAYLOAD_STEP_ENV}={raw:?}: expected a positive number"),
            }
        }
        if let Some(path) = args.next() {
            config.data_path = Some(PathBuf::from(path));
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_of<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn defaults_without_env_or_args() {
        let config = DashConfig::resolve(env_of(&[]), std::iter::empty());
        assert_eq!(config, DashConfig::default());
        assert_eq!(config.payload_step, 1000.0);
    }

    #[test]
    fn argument_overrides_env_path() {
        let env = [(DATA_ENV, "env.csv"), (PAYLOAD_STEP_ENV, "500")];
        let config = DashConfig::resolve(env_of(&env), vec!["arg.csv".to_string()].into_iter());
        assert_eq!(config.data_path, Some(PathBuf::from("arg.csv")));
        assert_eq!(config.payload_step, 500.0);

        let config = DashConfig::resolve(env_of(&env), std::iter::empty());
        assert_eq!(config.data_path, Some(PathBuf::from("env.csv")));
    }

    #[test]
    fn invalid_step_keeps_default() {
        for raw in ["abc", "-5", "0", "inf"] {
            let env = [(PAYLOAD_STEP_ENV, raw)];
            let config = DashConfig::resolve(env_of(&env), std::iter::empty());
            assert_eq!(config.payload_step, 1000.0, "{raw}");
        }
    }
}
