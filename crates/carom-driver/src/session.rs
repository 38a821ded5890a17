use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant, MissedTickBehavior, interval};
use tracing::info;

use crate::config::CaromConfig;
use crate::scheduler::CountedFrames;
use crate::{Driver, ShotParams, Snapshot};

/// Control messages accepted by a running session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    /// Launch a ball, replacing any live shot. Raw parameters are
    /// sanitized here at the edge.
    Start(ShotParams),
    Pause,
    Reset,
    /// Shut the session down.
    Stop,
}

/// Spawn the session loop on the tokio runtime.
///
/// Returns the command channel, a watch receiver that always holds the
/// latest [`Snapshot`], and the loop's join handle. Dropping the sender
/// also shuts the session down.
pub fn spawn_session(
    config: &CaromConfig,
) -> (
    mpsc::UnboundedSender<SessionCommand>,
    watch::Receiver<Snapshot>,
    JoinHandle<()>,
) {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let driver = Driver::new(CountedFrames::default(), config.table());
    let (snapshot_tx, snapshot_rx) = watch::channel(driver.snapshot());
    let frame_rate = config.frame_rate.max(1);

    let handle = tokio::spawn(run_session(driver, command_rx, snapshot_tx, frame_rate));

    (command_tx, snapshot_rx, handle)
}

async fn run_session(
    mut driver: Driver<CountedFrames>,
    mut commands: mpsc::UnboundedReceiver<SessionCommand>,
    snapshots: watch::Sender<Snapshot>,
    frame_rate: u32,
) {
    let epoch = Instant::now();
    let mut ticker = interval(Duration::from_secs_f64(1.0 / f64::from(frame_rate)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!(frame_rate, "session started");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                // Ticks only matter while the driver has a frame on order.
                if driver.frame_requested() {
                    let now_ms = epoch.elapsed().as_secs_f64() * 1000.0;
                    driver.on_frame(now_ms);
                    let _ = snapshots.send(driver.snapshot());
                }
            }
            command = commands.recv() => {
                match command {
                    Some(SessionCommand::Start(params)) => driver.start(params.sanitized()),
                    Some(SessionCommand::Pause) => driver.pause(),
                    Some(SessionCommand::Reset) => driver.reset(),
                    Some(SessionCommand::Stop) | None => break,
                }
                let _ = snapshots.send(driver.snapshot());
            }
        }
    }

    info!("session stopped");
}
