mod autopilot;
mod config;
mod summary;

use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};
use tracing_subscriber::EnvFilter;

use arcade_core::game_trait::{GameConfig, GameEvent};
use arcade_core::host::GameHost;
use arcade_runner::SpeedRunner;
use arcade_runner::assets::ASSET_MANIFEST;
use arcade_runner::config::RunnerConfig;

use autopilot::Autopilot;
use config::HostConfig;
use summary::SessionSummary;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = HostConfig::load();
    config.validate();
    tracing::info!(
        run_seconds = config.run_seconds,
        autopilot = config.autopilot.enabled,
        "Arcade host starting"
    );

    for asset in ASSET_MANIFEST {
        tracing::debug!(key = asset.key, path = asset.path, "Asset");
    }

    let mut game_config = GameConfig::default();
    if let Some(seed) = config.seed {
        game_config
            .custom
            .insert("seed".to_string(), serde_json::Value::from(seed));
    }
    let game = SpeedRunner::with_config(RunnerConfig::load());
    let mut host = GameHost::mount(game, &game_config).with_max_substeps(config.max_substeps);

    let summary = run(&mut host, &config).await;
    host.unmount();
    summary.log();
}

/// Drive frames until the deadline or Ctrl-C.
async fn run(host: &mut GameHost<SpeedRunner>, config: &HostConfig) -> SessionSummary {
    let pilot = Autopilot::new(config.autopilot.clone());
    let frame = Duration::from_secs_f32(1.0 / config.frame_rate_hz);
    let mut interval = tokio::time::interval(frame);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let deadline = (config.run_seconds > 0)
        .then(|| Instant::now() + Duration::from_secs(config.run_seconds));
    let mut summary = SessionSummary::default();
    let mut last = Instant::now();
    // Dismiss the start overlay on the first frame.
    let mut press = true;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let now = Instant::now();
                let elapsed = now - last;
                last = now;

                let mut input = host
                    .game()
                    .map(|g| pilot.decide(g))
                    .unwrap_or_default();
                input.pointer_pressed = std::mem::take(&mut press);

                for event in host.frame(elapsed, &input) {
                    summary.record(&event);
                    if let GameEvent::GameOver { score } = event {
                        tracing::info!(score, "Run ended");
                        press = config.restart_on_game_over;
                    }
                }

                if deadline.is_some_and(|d| now >= d) {
                    tracing::info!(ticks = host.ticks(), "Run time elapsed");
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!(ticks = host.ticks(), "Interrupted");
                break;
            }
        }
    }
    summary
}
