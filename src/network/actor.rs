//! Network actor - runs HTTP requests in the Tokio runtime

use std::collections::HashMap;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;

use crate::config::HttpConfig;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::{create_client, execute_request};

/// Network actor that processes HTTP request commands
pub struct NetworkActor {
    client: reqwest::Client,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<u64>,
    cancel_handles: HashMap<u64, oneshot::Sender<()>>,
}

impl NetworkActor {
    pub fn new(config: &HttpConfig, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client: create_client(config),
            response_tx,
            active_requests: JoinSet::new(),
            cancel_handles: HashMap::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Execute { id, request }) => {
                            let (cancel_tx, mut cancel_rx) = oneshot::channel();
                            self.cancel_handles.insert(id, cancel_tx);

                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            self.active_requests.spawn(async move {
                                tracing::info!(id, url = %request.url, method = %request.method, "Executing request");
                                tokio::select! {
                                    biased;

                                    _ = &mut cancel_rx => {
                                        tracing::debug!(id, "Request task cancelled");
                                    }
                                    result = execute_request(&client, request, id) => {
                                        tracing::info!(id, ok = !matches!(result, NetworkResponse::Error { .. }), "Request completed");
                                        let _ = response_tx.send(result);
                                    }
                                }
                                id
                            });
                        }

                        Some(NetworkCommand::Cancel(id)) => {
                            if let Some(cancel_tx) = self.cancel_handles.remove(&id) {
                                tracing::info!(id, "Cancelling request");
                                let _ = cancel_tx.send(());
                                let _ = self.response_tx.send(NetworkResponse::Cancelled { id });
                            }
                        }

                        Some(NetworkCommand::Shutdown) | None => {
                            for (_, cancel_tx) in self.cancel_handles.drain() {
                                let _ = cancel_tx.send(());
                            }
                            break;
                        }
                    }
                }

                Some(finished) = self.active_requests.join_next() => {
                    if let Ok(id) = finished {
                        self.cancel_handles.remove(&id);
                    }
                }
            }
        }

        self.active_requests.shutdown().await;
        tracing::debug!("Network actor stopped");
    }
}
