use core_types::RequestId;
use std::sync::mpsc::{self, Receiver, Sender};

#[derive(Debug)]
pub enum CoreCommand {
    // UI -> network
    SendMessage {
        request_id: RequestId,
        endpoint: String,
        payload: String,
        headers: Vec<(String, String)>,
    },
    Shutdown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreEvent {
    // Network -> UI
    MessageSent {
        request_id: RequestId,
        status: u16,
    },
    MessageFailed {
        request_id: RequestId,
        error: String,
    },
    MessageDone {
        request_id: RequestId,
    },
}

pub struct Bus {
    pub cmd_tx: Sender<CoreCommand>,
    pub evt_rx: Receiver<CoreEvent>,
    pub evt_tx: Sender<CoreEvent>, // shareable for runtimes
}

impl Bus {
    /// New bus plus the command receiver a runtime consumes.
    pub fn new() -> (Bus, Receiver<CoreCommand>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (evt_tx, evt_rx) = mpsc::channel();
        (
            Bus {
                cmd_tx,
                evt_rx,
                evt_tx,
            },
            cmd_rx,
        )
    }
}
