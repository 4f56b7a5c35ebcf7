//! Carousel driven by a tokio task
//!
//! For hosts with more than one thread: the controller lives on a single task,
//! commands reach it over a channel and state leaves it as snapshots on a
//! `watch` channel. Only the task touches the controller, so cancel-then-arm
//! of the auto-advance timer can never interleave with another caller.

use std::time::{Duration, Instant};

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::carousel::{CarouselController, CarouselSnapshot, CarouselView};
use crate::{Error, Result};

/// Requests accepted by a running carousel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselCommand {
    Next,
    Previous,
    GoTo(usize),
    HoverEnter,
    HoverLeave,
    StartAutoplay(Duration),
    StopAutoplay,
}

/// Task that owns a carousel controller.
///
/// Build the controller with [`crate::clock::TokioClock`] so its timer agrees
/// with the task's sleeps.
pub struct CarouselService<V: CarouselView> {
    controller: CarouselController<V>,
    commands: mpsc::UnboundedReceiver<CarouselCommand>,
    snapshots: watch::Sender<CarouselSnapshot>,
}

/// Caller side of a spawned [`CarouselService`]
#[derive(Debug)]
pub struct CarouselHandle {
    commands: mpsc::UnboundedSender<CarouselCommand>,
    snapshots: watch::Receiver<CarouselSnapshot>,
    task: JoinHandle<()>,
}

impl<V> CarouselService<V>
where
    V: CarouselView + Send + 'static,
{
    /// Start the task. It runs until `shutdown` turns true or is dropped.
    pub fn spawn(
        controller: CarouselController<V>,
        shutdown: watch::Receiver<bool>,
    ) -> CarouselHandle {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (snap_tx, snap_rx) = watch::channel(controller.snapshot());

        let service = Self {
            controller,
            commands: cmd_rx,
            snapshots: snap_tx,
        };
        let task = tokio::spawn(service.run(shutdown));

        CarouselHandle {
            commands: cmd_tx,
            snapshots: snap_rx,
            task,
        }
    }

    async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        info!(
            "Carousel service started: {} slides",
            self.controller.slide_count()
        );

        loop {
            let deadline = self.controller.next_deadline();

            tokio::select! {
                result = shutdown.changed() => {
                    if result.is_err() || *shutdown.borrow() {
                        info!("Carousel service received shutdown signal");
                        break;
                    }
                }

                command = self.commands.recv() => {
                    match command {
                        Some(command) => self.apply(command),
                        None => {
                            debug!("All carousel handles dropped");
                            break;
                        }
                    }
                }

                _ = wait_until(deadline) => {
                    self.controller.on_tick();
                }
            }

            self.publish();
        }
    }

    fn apply(&mut self, command: CarouselCommand) {
        debug!("Carousel command: {:?}", command);
        match command {
            CarouselCommand::Next => self.controller.next(),
            CarouselCommand::Previous => self.controller.previous(),
            CarouselCommand::GoTo(index) => {
                if let Err(e) = self.controller.go_to(index) {
                    warn!("Ignoring carousel command: {}", e);
                }
            }
            CarouselCommand::HoverEnter => self.controller.on_hover_enter(),
            CarouselCommand::HoverLeave => self.controller.on_hover_leave(),
            CarouselCommand::StartAutoplay(interval) => self.controller.start_autoplay(interval),
            CarouselCommand::StopAutoplay => self.controller.stop_autoplay(),
        }
    }

    fn publish(&self) {
        let snapshot = self.controller.snapshot();
        self.snapshots.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}

impl CarouselHandle {
    pub fn send(&self, command: CarouselCommand) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| Error::ServiceClosed)
    }

    /// Latest published state
    pub fn snapshot(&self) -> CarouselSnapshot {
        *self.snapshots.borrow()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<CarouselSnapshot> {
        self.snapshots.clone()
    }

    /// Wait for the task to finish
    pub async fn join(self) -> Result<()> {
        self.task
            .await
            .map_err(|e| Error::Other(format!("carousel task failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::{CarouselOptions, NullView};
    use crate::clock::TokioClock;
    use std::sync::Arc;

    fn spawn(count: usize) -> (CarouselHandle, watch::Sender<bool>) {
        let controller = CarouselController::new(
            count,
            NullView,
            Arc::new(TokioClock),
            CarouselOptions::default(),
        )
        .unwrap();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        (CarouselService::spawn(controller, shutdown_rx), shutdown_tx)
    }

    async fn wait_for(
        handle: &CarouselHandle,
        f: impl FnMut(&CarouselSnapshot) -> bool,
    ) -> CarouselSnapshot {
        let mut rx = handle.subscribe();
        let snapshot = tokio::time::timeout(Duration::from_secs(1), rx.wait_for(f))
            .await
            .expect("timed out waiting for snapshot")
            .expect("service dropped");
        *snapshot
    }

    #[tokio::test(start_paused = true)]
    async fn test_autoplay_on_virtual_time() {
        let (handle, _shutdown) = spawn(4);

        tokio::time::sleep(Duration::from_millis(12_100)).await;
        assert_eq!(handle.snapshot().cursor, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_commands_are_applied() {
        let (handle, _shutdown) = spawn(4);

        handle.send(CarouselCommand::GoTo(2)).unwrap();
        wait_for(&handle, |s| s.cursor == 2).await;

        handle.send(CarouselCommand::Previous).unwrap();
        wait_for(&handle, |s| s.cursor == 1).await;

        // Out-of-range requests are dropped, the task keeps running
        handle.send(CarouselCommand::GoTo(10)).unwrap();
        handle.send(CarouselCommand::Next).unwrap();
        wait_for(&handle, |s| s.cursor == 2).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_autoplay_freezes_cursor() {
        let (handle, _shutdown) = spawn(3);

        handle.send(CarouselCommand::StopAutoplay).unwrap();
        wait_for(&handle, |s| !s.autoplay).await;

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(handle.snapshot().cursor, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hover_pauses_service() {
        let (handle, _shutdown) = spawn(3);

        handle.send(CarouselCommand::HoverEnter).unwrap();
        wait_for(&handle, |s| s.hovered && !s.timer_active).await;
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(handle.snapshot().cursor, 0);

        handle.send(CarouselCommand::HoverLeave).unwrap();
        wait_for(&handle, |s| s.timer_active).await;
        tokio::time::sleep(Duration::from_millis(4_100)).await;
        assert_eq!(handle.snapshot().cursor, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_closes_handle() {
        let (handle, shutdown) = spawn(2);
        shutdown.send(true).unwrap();

        let commands = handle.commands.clone();
        handle.join().await.unwrap();

        assert!(commands.send(CarouselCommand::Next).is_err());
    }
}
