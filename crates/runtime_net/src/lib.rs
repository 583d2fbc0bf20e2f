use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use bus::{CoreCommand, CoreEvent};
use net::{NetEvent, Transport, send_message};

/// Serve `SendMessage` commands until `Shutdown` or the command channel closes.
pub fn start_net_runtime(
    transport: Arc<dyn Transport>,
    cmd_rx: Receiver<CoreCommand>,
    evt_tx: Sender<CoreEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                CoreCommand::SendMessage {
                    request_id,
                    endpoint,
                    payload,
                    headers,
                } => {
                    let evt_tx = evt_tx.clone();
                    send_message(
                        request_id,
                        Arc::clone(&transport),
                        endpoint,
                        payload,
                        headers,
                        Arc::new(move |e: NetEvent| {
                            let evt = match e {
                                NetEvent::Sent {
                                    request_id,
                                    receipt,
                                } => CoreEvent::MessageSent {
                                    request_id,
                                    status: receipt.status,
                                },
                                NetEvent::Failed { request_id, error } => {
                                    CoreEvent::MessageFailed {
                                        request_id,
                                        error: error.to_string(),
                                    }
                                }
                                NetEvent::Done { request_id } => {
                                    CoreEvent::MessageDone { request_id }
                                }
                            };
                            let _ = evt_tx.send(evt);
                        }),
                    );
                }

                CoreCommand::Shutdown => break,
            }
        }
        log::debug!("net runtime stopped");
    })
}
