//! Runtime bridge - connects the sync TUI thread with the async backend
//!
//! The TUI never awaits; it sends commands over an mpsc channel to a worker
//! thread that owns a Tokio runtime, and drains events non-blockingly each
//! tick.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tokio::runtime::Runtime;

use crate::infrastructure::backend::{Backend, Snapshot};
use crate::infrastructure::runtime::worker::run_worker;

/// Commands sent from the TUI to the worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeCommand {
    /// Re-load the snapshot from the backend
    Reload,
    /// Shutdown the worker
    Shutdown,
}

/// Events sent from the worker to the TUI
#[derive(Debug)]
pub enum RuntimeEvent {
    /// Snapshot loaded
    SnapshotReady {
        source: String,
        snapshot: Box<Snapshot>,
    },
    /// Load failed; the previous snapshot (if any) stays on screen
    LoadFailed { message: String },
}

/// Bridge between the sync TUI thread and the worker's Tokio runtime
pub struct RuntimeBridge {
    cmd_tx: Sender<RuntimeCommand>,
    evt_rx: Receiver<RuntimeEvent>,
}

impl RuntimeBridge {
    pub fn new(backend: Box<dyn Backend>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<RuntimeCommand>();
        let (evt_tx, evt_rx) = mpsc::channel::<RuntimeEvent>();

        thread::spawn(move || {
            let rt = match Runtime::new() {
                Ok(rt) => rt,
                Err(err) => {
                    let _ = evt_tx.send(RuntimeEvent::LoadFailed {
                        message: format!("tokio runtime: {err}"),
                    });
                    return;
                }
            };
            rt.block_on(run_worker(backend, cmd_rx, evt_tx));
        });

        Self { cmd_tx, evt_rx }
    }

    /// Send a command to the worker
    pub fn send(&self, cmd: RuntimeCommand) -> anyhow::Result<()> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| anyhow::anyhow!("worker channel closed"))
    }

    /// Poll for events (non-blocking)
    pub fn poll_events(&self) -> Vec<RuntimeEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.evt_rx.try_recv() {
            events.push(evt);
        }
        events
    }
}

impl Drop for RuntimeBridge {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(RuntimeCommand::Shutdown);
    }
}
