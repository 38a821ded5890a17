use std::env;

use tokio::time::{Duration, Instant, sleep_until, timeout};
use tracing::info;
use tracing_subscriber::EnvFilter;

use carom_driver::config::CaromConfig;
use carom_driver::session::{SessionCommand, spawn_session};
use carom_driver::{ShotParams, Status};

/// Usage: carom [speed] [angle] [radius] [seconds]
///
/// Arguments are positional and optional; anything missing or
/// unparseable falls back to the default shot and a 10 second budget.
fn parse_arg(args: &[String], index: usize, fallback: f32) -> f32 {
    args.get(index)
        .and_then(|raw| raw.parse::<f32>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(fallback)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    let defaults = ShotParams::default();
    let params = ShotParams {
        speed: parse_arg(&args, 1, defaults.speed),
        angle_deg: parse_arg(&args, 2, defaults.angle_deg),
        radius: parse_arg(&args, 3, defaults.radius),
    };
    let budget = Duration::from_secs_f32(parse_arg(&args, 4, 10.0).clamp(0.0, 86_400.0));

    let config = CaromConfig::load();
    info!(
        table_width = config.table_width,
        table_height = config.table_height,
        frame_rate = config.frame_rate,
        "carom starting"
    );

    let (commands, mut snapshots, session) = spawn_session(&config);
    if commands.send(SessionCommand::Start(params)).is_err() {
        return;
    }

    let deadline = Instant::now() + budget;
    loop {
        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();
                if snapshot.status == Status::Settled {
                    if let Some(ball) = snapshot.ball {
                        info!(x = ball.position.x, y = ball.position.y, "ball settled");
                    }
                    break;
                }
            }
            _ = sleep_until(deadline) => {
                info!(seconds = budget.as_secs_f32(), "time budget spent, pausing");
                let _ = commands.send(SessionCommand::Pause);
                let _ = timeout(Duration::from_millis(250), async {
                    while snapshots.changed().await.is_ok() {
                        if snapshots.borrow_and_update().status == Status::Paused {
                            break;
                        }
                    }
                })
                .await;
                break;
            }
        }
    }

    let last = snapshots.borrow().clone();
    info!(status = %last.status, speed = last.speed, "final state");

    let _ = commands.send(SessionCommand::Stop);
    let _ = session.await;
}
