//! Worker loop - owns the backend and services reload commands

use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::time::Duration;

use crate::infrastructure::backend::Backend;
use crate::infrastructure::runtime::bridge::{RuntimeCommand, RuntimeEvent};

pub async fn run_worker(
    backend: Box<dyn Backend>,
    cmd_rx: Receiver<RuntimeCommand>,
    evt_tx: Sender<RuntimeEvent>,
) {
    // Initial load before entering the command loop
    load_and_send(backend.as_ref(), &evt_tx).await;

    loop {
        // std channel on a tokio thread: poll with a short sleep so Shutdown
        // is observed promptly without a blocking recv
        match cmd_rx.try_recv() {
            Ok(RuntimeCommand::Reload) => {
                load_and_send(backend.as_ref(), &evt_tx).await;
            }
            Ok(RuntimeCommand::Shutdown) | Err(TryRecvError::Disconnected) => break,
            Err(TryRecvError::Empty) => {
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
        }
    }
}

async fn load_and_send(backend: &dyn Backend, evt_tx: &Sender<RuntimeEvent>) {
    match backend.load().await {
        Ok(snapshot) => {
            let _ = evt_tx.send(RuntimeEvent::SnapshotReady {
                source: backend.describe(),
                snapshot: Box::new(snapshot),
            });
        }
        Err(err) => {
            let _ = evt_tx.send(RuntimeEvent::LoadFailed {
                message: format!("{err:#}"),
            });
        }
    }
}
