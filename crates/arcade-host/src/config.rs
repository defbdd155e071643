use serde::Deserialize;

/// Host configuration, loaded from `arcade.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// How often the host wakes to run a frame. The game's own tick rate is
    /// independent of this.
    pub frame_rate_hz: f32,
    pub max_substeps: u32,
    /// Stop after this many seconds. `0` runs until Ctrl-C.
    pub run_seconds: u64,
    /// Press to restart as soon as a run ends.
    pub restart_on_game_over: bool,
    pub autopilot: AutopilotConfig,
    /// Pins the session seed. Unset draws a fresh one.
    pub seed: Option<u64>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            frame_rate_hz: 60.0,
            max_substeps: arcade_core::host::MAX_SUBSTEPS,
            run_seconds: 30,
            restart_on_game_over: true,
            autopilot: AutopilotConfig::default(),
            seed: None,
        }
    }
}

/// Scripted input used when no one is at the keyboard.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AutopilotConfig {
    pub enabled: bool,
    /// How far ahead of the player's center to probe for a gap.
    pub gap_lookahead: f32,
}

impl Default for AutopilotConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            gap_lookahead: 48.0,
        }
    }
}

impl HostConfig {
    /// Every problem with the current values, empty if valid.
    pub fn problems(&self) -> Vec<String> {
        let mut out = Vec::new();
        if !(self.frame_rate_hz.is_finite() && self.frame_rate_hz > 0.0) {
            out.push(format!("frame_rate_hz must be > 0, got {}", self.frame_rate_hz));
        }
        if self.max_substeps == 0 {
            out.push("max_substeps must be > 0".to_string());
        }
        if self.autopilot.gap_lookahead.is_nan() || self.autopilot.gap_lookahead < 0.0 {
            out.push(format!(
                "autopilot.gap_lookahead must be >= 0, got {}",
                self.autopilot.gap_lookahead
            ));
        }
        out
    }

    /// Validate configuration, logging every problem and exiting if any.
    pub fn validate(&self) {
        let problems = self.problems();
        for problem in &problems {
            tracing::error!("{problem}");
        }
        if !problems.is_empty() {
            std::process::exit(1);
        }
        if self.run_seconds == 0 && !self.restart_on_game_over {
            tracing::warn!("run_seconds = 0 without restarts: the host idles after the first game over");
        }
    }

    /// Load config from `arcade.toml` if it exists, then apply env var overrides.
    pub fn load() -> Self {
        let mut config = match std::fs::read_to_string("arcade.toml") {
            Ok(content) => match toml::from_str::<HostConfig>(&content) {
                Ok(cfg) => {
                    tracing::info!("Loaded configuration from arcade.toml");
                    cfg
                },
                Err(e) => {
                    tracing::warn!("Failed to parse arcade.toml: {e}, using defaults");
                    HostConfig::default()
                },
            },
            Err(_) => {
                tracing::info!("No arcade.toml found, using defaults");
                HostConfig::default()
            },
        };
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Apply `ARCADE_*` overrides read through `lookup`.
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("ARCADE_RUN_SECONDS")
            && let Ok(n) = val.parse::<u64>()
        {
            self.run_seconds = n;
        }
        if let Some(val) = lookup("ARCADE_FRAME_RATE")
            && let Ok(n) = val.parse::<f32>()
        {
            self.frame_rate_hz = n;
        }
        if let Some(val) = lookup("ARCADE_MAX_SUBSTEPS")
            && let Ok(n) = val.parse::<u32>()
        {
            self.max_substeps = n;
        }
        if let Some(val) = lookup("ARCADE_SEED")
            && let Ok(n) = val.parse::<u64>()
        {
            self.seed = Some(n);
        }
        if let Some(val) = lookup("ARCADE_AUTOPILOT")
            && let Ok(b) = val.parse::<bool>()
        {
            self.autopilot.enabled = b;
        }
        if let Some(val) = lookup("ARCADE_RESTART")
            && let Ok(b) = val.parse::<bool>()
        {
            self.restart_on_game_over = b;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_config_values() {
        let cfg = HostConfig::default();
        assert_eq!(cfg.frame_rate_hz, 60.0);
        assert_eq!(cfg.max_substeps, 8);
        assert_eq!(cfg.run_seconds, 30);
        assert!(cfg.restart_on_game_over);
        assert!(cfg.autopilot.enabled);
        assert!(cfg.seed.is_none());
        assert!(cfg.problems().is_empty());
    }

    #[test]
    fn parse_partial_toml() {
        let toml_str = r#"
run_seconds = 5
seed = 1234

[autopilot]
enabled = false
"#;
        let cfg: HostConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.run_seconds, 5);
        assert_eq!(cfg.seed, Some(1234));
        assert!(!cfg.autopilot.enabled);
        assert_eq!(cfg.autopilot.gap_lookahead, 48.0);
        assert_eq!(cfg.frame_rate_hz, 60.0);
    }

    #[test]
    fn env_overrides_apply_and_ignore_garbage() {
        let env: HashMap<&str, &str> = [
            ("ARCADE_RUN_SECONDS", "0"),
            ("ARCADE_SEED", "77"),
            ("ARCADE_AUTOPILOT", "false"),
            ("ARCADE_MAX_SUBSTEPS", "lots"),
        ]
        .into_iter()
        .collect();
        let mut cfg = HostConfig::default();
        cfg.apply_env(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(cfg.run_seconds, 0);
        assert_eq!(cfg.seed, Some(77));
        assert!(!cfg.autopilot.enabled);
        assert_eq!(cfg.max_substeps, 8);
    }

    #[test]
    fn problems_lists_every_bad_value() {
        let cfg = HostConfig {
            frame_rate_hz: 0.0,
            max_substeps: 0,
            autopilot: AutopilotConfig {
                enabled: true,
                gap_lookahead: -1.0,
            },
            ..HostConfig::default()
        };
        assert_eq!(cfg.problems().len(), 3);
    }
}
