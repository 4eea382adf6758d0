//! Clock service - runs the engine on a single task
//!
//! Ties together:
//! - The engine (all state lives on one task, one command at a time)
//! - The tick source (a tokio interval, polled only while running)
//! - The one-shot device location query
//! - A snapshot feed for presentation layers
//!
//! ```text
//!   ClockHandle ──commands──▶ ┌──────────────┐ ──snapshots──▶ watch::Receiver
//!                             │ ClockService │
//!   interval ────ticks──────▶ │  (engine)    │
//!                             └──────────────┘
//!   LocationProvider ──one fix──▲
//! ```

use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Interval, MissedTickBehavior};
use worldclock_core::{Coordinate, Timestamp};
use worldclock_engine::{ClockEngine, EffectiveTime, EngineSnapshot, RunState};
use worldclock_geo::{CityCatalog, GeoResolver, RandomCityPicker};
use worldclock_ports::{
    Clock, EngineResult, LocationError, LocationProvider, LocationResult,
};

use crate::config::HostConfig;
use crate::error::{HostError, Result};

const COMMAND_CHANNEL_CAPACITY: usize = 64;

/// Requests handled by the service task, applied in arrival order
enum Command {
    AddSlot {
        reply: oneshot::Sender<usize>,
    },
    RemoveSlot {
        reply: oneshot::Sender<usize>,
    },
    SetSlotLocation {
        index: usize,
        location_key: String,
        reply: oneshot::Sender<EngineResult<()>>,
    },
    SetSlotOverride {
        index: usize,
        at: Timestamp,
        reply: oneshot::Sender<EngineResult<()>>,
    },
    ClearSlotOverride {
        index: usize,
        reply: oneshot::Sender<EngineResult<()>>,
    },
    ToggleRunning {
        reply: oneshot::Sender<RunState>,
    },
    ScrubReference {
        at: Timestamp,
        reply: oneshot::Sender<()>,
    },
    SetDisplayFormat {
        use_24_hour: bool,
        reply: oneshot::Sender<()>,
    },
    EffectiveTime {
        index: usize,
        reply: oneshot::Sender<EngineResult<EffectiveTime>>,
    },
    Snapshot {
        reply: oneshot::Sender<EngineSnapshot>,
    },
    /// Outcome of the startup location query
    DeviceLocation(LocationResult<Coordinate>),
}

/// Owns the engine and drives it from ticks and commands
pub struct ClockService {
    engine: ClockEngine,
    clock: Arc<dyn Clock>,
    config: HostConfig,
    command_rx: mpsc::Receiver<Command>,
    snapshot_tx: watch::Sender<EngineSnapshot>,
}

impl ClockService {
    /// Build an engine from `config` and start serving it
    ///
    /// New slots get random catalog cities. `provider` is queried as
    /// given; wrap it with [`HostConfig::cached_location`] to reuse fixes
    /// across sessions. Returns the handle used to talk to the service
    /// and the task running it; the task ends once every handle is dropped.
    pub fn spawn(
        config: HostConfig,
        catalog: Arc<CityCatalog>,
        clock: Arc<dyn Clock>,
        provider: Arc<dyn LocationProvider>,
    ) -> (ClockHandle, JoinHandle<()>) {
        let picker = Box::new(RandomCityPicker::new(&catalog));
        let engine = ClockEngine::new(
            GeoResolver::new(catalog),
            picker,
            clock.now(),
            config.engine_config(),
        );
        Self::spawn_with_engine(engine, config, clock, provider)
    }

    /// Serve an already built engine
    pub fn spawn_with_engine(
        engine: ClockEngine,
        config: HostConfig,
        clock: Arc<dyn Clock>,
        provider: Arc<dyn LocationProvider>,
    ) -> (ClockHandle, JoinHandle<()>) {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let (snapshot_tx, snapshot_rx) = watch::channel(engine.snapshot());

        if config.request_device_location {
            spawn_location_query(provider, config.location_timeout(), &command_tx);
        }

        let service = Self {
            engine,
            clock,
            config,
            command_rx,
            snapshot_tx,
        };
        let task = tokio::spawn(service.run());

        let handle = ClockHandle {
            command_tx,
            snapshot_rx,
        };
        (handle, task)
    }

    async fn run(mut self) {
        log::info!(
            "Clock service started ({}ms ticks, clock: {})",
            self.config.tick_interval_ms,
            self.clock.name()
        );

        let mut ticker = self.new_ticker();

        loop {
            tokio::select! {
                command = self.command_rx.recv() => {
                    match command {
                        Some(command) => self.handle_command(command, &mut ticker),
                        None => {
                            log::info!("All clock handles dropped");
                            break;
                        }
                    }
                }

                // The tick source only runs while the engine does
                _ = ticker.tick(), if self.engine.is_running() => {
                    self.tick();
                }
            }
        }

        log::info!("Clock service stopped");
    }

    fn new_ticker(&self) -> Interval {
        let mut ticker = tokio::time::interval(self.config.tick_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    }

    fn tick(&mut self) {
        if self.engine.advance(self.clock.now()) {
            self.publish();
        }
    }

    fn handle_command(&mut self, command: Command, ticker: &mut Interval) {
        match command {
            Command::AddSlot { reply } => {
                let count = self.engine.add_slot().len();
                let _ = reply.send(count);
            }
            Command::RemoveSlot { reply } => {
                let count = self.engine.remove_slot().len();
                let _ = reply.send(count);
            }
            Command::SetSlotLocation {
                index,
                location_key,
                reply,
            } => {
                let _ = reply.send(self.engine.set_slot_location(index, &location_key));
            }
            Command::SetSlotOverride { index, at, reply } => {
                let _ = reply.send(self.engine.set_slot_override(index, at));
            }
            Command::ClearSlotOverride { index, reply } => {
                let _ = reply.send(self.engine.clear_slot_override(index));
            }
            Command::ToggleRunning { reply } => {
                let state = self.engine.toggle_running();
                if state.is_running() {
                    // Re-anchor now rather than on the next interval
                    self.engine.advance(self.clock.now());
                    ticker.reset();
                }
                let _ = reply.send(state);
            }
            Command::ScrubReference { at, reply } => {
                self.engine.scrub_reference(at);
                let _ = reply.send(());
            }
            Command::SetDisplayFormat { use_24_hour, reply } => {
                self.engine.set_display_format(use_24_hour);
                let _ = reply.send(());
            }
            Command::EffectiveTime { index, reply } => {
                let _ = reply.send(self.engine.effective_time(index));
                return;
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(self.engine.snapshot());
                return;
            }
            Command::DeviceLocation(outcome) => {
                if let Err(e) = self.engine.handle_location_result(outcome) {
                    // A provider handing back garbage counts as unavailable
                    self.engine
                        .deny_device_location(&LocationError::Unavailable(e.to_string()));
                }
            }
        }
        self.publish();
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.engine.snapshot());
    }
}

/// Ask the provider once, delivering the outcome as a command
///
/// Holds only a weak sender so a slow provider never keeps the service
/// alive after its handles are gone.
fn spawn_location_query(
    provider: Arc<dyn LocationProvider>,
    timeout: std::time::Duration,
    command_tx: &mpsc::Sender<Command>,
) {
    let command_tx = command_tx.downgrade();
    tokio::spawn(async move {
        log::debug!("Requesting device location from {}", provider.name());
        let outcome = match tokio::time::timeout(timeout, provider.current_position()).await {
            Ok(outcome) => outcome,
            Err(_) => Err(LocationError::Timeout),
        };

        if let Some(command_tx) = command_tx.upgrade() {
            let _ = command_tx.send(Command::DeviceLocation(outcome)).await;
        }
    });
}

/// Cloneable handle for talking to a running [`ClockService`]
#[derive(Clone)]
pub struct ClockHandle {
    command_tx: mpsc::Sender<Command>,
    snapshot_rx: watch::Receiver<EngineSnapshot>,
}

impl ClockHandle {
    /// Add a slot; returns the new slot count
    pub async fn add_slot(&self) -> Result<usize> {
        self.request(|reply| Command::AddSlot { reply }).await
    }

    /// Remove the last slot; returns the new slot count
    pub async fn remove_slot(&self) -> Result<usize> {
        self.request(|reply| Command::RemoveSlot { reply }).await
    }

    pub async fn set_slot_location(&self, index: usize, location_key: &str) -> Result<()> {
        let location_key = location_key.to_string();
        self.request(|reply| Command::SetSlotLocation {
            index,
            location_key,
            reply,
        })
        .await??;
        Ok(())
    }

    pub async fn set_slot_override(&self, index: usize, at: Timestamp) -> Result<()> {
        self.request(|reply| Command::SetSlotOverride { index, at, reply })
            .await??;
        Ok(())
    }

    pub async fn clear_slot_override(&self, index: usize) -> Result<()> {
        self.request(|reply| Command::ClearSlotOverride { index, reply })
            .await??;
        Ok(())
    }

    pub async fn toggle_running(&self) -> Result<RunState> {
        self.request(|reply| Command::ToggleRunning { reply }).await
    }

    /// Scrub the shared time and pause
    pub async fn scrub_reference(&self, at: Timestamp) -> Result<()> {
        self.request(|reply| Command::ScrubReference { at, reply })
            .await
    }

    pub async fn set_display_format(&self, use_24_hour: bool) -> Result<()> {
        self.request(|reply| Command::SetDisplayFormat { use_24_hour, reply })
            .await
    }

    pub async fn effective_time(&self, index: usize) -> Result<EffectiveTime> {
        let time = self
            .request(|reply| Command::EffectiveTime { index, reply })
            .await??;
        Ok(time)
    }

    /// Current state, read through the service
    pub async fn snapshot(&self) -> Result<EngineSnapshot> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Feed of snapshots published after every change
    pub fn subscribe(&self) -> watch::Receiver<EngineSnapshot> {
        self.snapshot_rx.clone()
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply, response) = oneshot::channel();
        self.command_tx
            .send(build(reply))
            .await
            .map_err(|_| HostError::ServiceStopped)?;
        response.await.map_err(|_| HostError::ServiceStopped)
    }
}
