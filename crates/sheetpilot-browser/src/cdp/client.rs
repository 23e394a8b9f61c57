//! CDP WebSocket client.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, trace, warn};
use url::Url;

use super::error::CdpError;
use super::protocol::{BrowserVersion, CdpMessage, CdpRequest, TargetInfo};
use super::session::PageSession;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;

/// Upper bound on waiting for the reply to a single command.
pub(crate) const COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

type Pending = Mutex<HashMap<u64, oneshot::Sender<Result<Value, CdpError>>>>;

/// The browser WebSocket, shared by the client and its page sessions.
pub(crate) struct Transport {
    ws_tx: tokio::sync::Mutex<WsSink>,
    pending: Arc<Pending>,
    /// Set once the receive loop has stopped; no reply can arrive after that.
    closed: Arc<AtomicBool>,
    request_id: AtomicU64,
}

impl Transport {
    pub(crate) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Send a command and wait up to [`COMMAND_TIMEOUT`] for its reply.
    pub(crate) async fn call(
        &self,
        method: &str,
        params: Option<Value>,
        session_id: Option<&str>,
    ) -> Result<Value, CdpError> {
        self.call_within(method, params, session_id, COMMAND_TIMEOUT)
            .await
    }

    /// Send a command and wait up to `timeout` for its reply.
    ///
    /// A missing reply means the browser stopped answering and fails with
    /// [`CdpError::CommandTimeout`].
    pub(crate) async fn call_within(
        &self,
        method: &str,
        params: Option<Value>,
        session_id: Option<&str>,
        timeout: Duration,
    ) -> Result<Value, CdpError> {
        if self.is_closed() {
            return Err(CdpError::SessionClosed);
        }

        let id = self.request_id.fetch_add(1, Ordering::SeqCst);

        let request = CdpRequest {
            id,
            method,
            params,
            session_id,
        };

        let json = serde_json::to_string(&request)?;
        trace!("CDP send: {}", json);

        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(id, tx);
        // The receive loop may have drained `pending` just before the insert.
        if self.is_closed() {
            self.pending.lock().remove(&id);
            return Err(CdpError::SessionClosed);
        }

        {
            let mut ws = self.ws_tx.lock().await;
            if let Err(e) = ws.send(Message::Text(json.into())).await {
                self.pending.lock().remove(&id);
                return Err(e.into());
            }
        }

        match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(CdpError::SessionClosed),
            Err(_) => {
                self.pending.lock().remove(&id);
                warn!("No reply to {} within {:?}", method, timeout);
                Err(CdpError::CommandTimeout {
                    method: method.to_string(),
                    timeout_ms: timeout.as_millis() as u64,
                })
            }
        }
    }
}

/// CDP client connected to one browser.
pub struct CdpClient {
    /// HTTP endpoint for target creation.
    http_endpoint: String,
    browser: String,
    transport: Arc<Transport>,
    http: reqwest::Client,
    _recv_task: tokio::task::JoinHandle<()>,
}

impl CdpClient {
    /// Connect to Chrome at the given debugging endpoint
    /// (e.g. `"http://127.0.0.1:9222"`).
    pub async fn connect(endpoint: &str) -> Result<Self, CdpError> {
        let http_endpoint = Url::parse(endpoint)?
            .as_str()
            .trim_end_matches('/')
            .to_string();
        let http = reqwest::Client::new();

        let version_url = format!("{}/json/version", http_endpoint);
        debug!("Fetching browser version from {}", version_url);

        let version: BrowserVersion = http
            .get(&version_url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", endpoint, e)))?
            .json()
            .await
            .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", endpoint, e)))?;

        let (ws_stream, _) = tokio_tungstenite::connect_async(&version.web_socket_debugger_url)
            .await
            .map_err(|e| CdpError::ConnectionFailed(format!("WebSocket: {}", e)))?;

        let (ws_sink, ws_source) = ws_stream.split();
        let pending: Arc<Pending> = Arc::new(Mutex::new(HashMap::new()));
        let closed = Arc::new(AtomicBool::new(false));

        let recv_task = {
            let pending = pending.clone();
            let closed = closed.clone();
            tokio::spawn(async move {
                Self::receive_loop(ws_source, pending, closed).await;
            })
        };

        debug!("CDP client connected to {} ({})", http_endpoint, version.browser);

        Ok(Self {
            http_endpoint,
            browser: version.browser,
            transport: Arc::new(Transport {
                ws_tx: tokio::sync::Mutex::new(ws_sink),
                pending,
                closed,
                request_id: AtomicU64::new(1),
            }),
            http,
            _recv_task: recv_task,
        })
    }

    /// Route replies to their waiting callers until the socket closes.
    async fn receive_loop(
        mut ws_source: WsSource,
        pending: Arc<Pending>,
        closed: Arc<AtomicBool>,
    ) {
        while let Some(msg) = ws_source.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    trace!("CDP recv: {}", text);
                    let reply = match serde_json::from_str::<CdpMessage>(&text) {
                        Ok(msg) => msg.into_reply(),
                        Err(e) => {
                            warn!("Failed to parse CDP message: {}", e);
                            continue;
                        }
                    };
                    // Events carry no id; nothing here subscribes to them.
                    let Some((id, outcome)) = reply else { continue };
                    if let Some(tx) = pending.lock().remove(&id) {
                        let _ = tx.send(outcome);
                    }
                }
                Ok(Message::Close(_)) => {
                    debug!("WebSocket closed");
                    break;
                }
                Err(e) => {
                    error!("WebSocket error: {}", e);
                    break;
                }
                _ => {}
            }
        }
        closed.store(true, Ordering::SeqCst);
        // Dropping the senders wakes every caller with SessionClosed.
        pending.lock().clear();
    }

    /// Browser product string, e.g. `Chrome/126.0.6478.126`.
    pub fn browser(&self) -> &str {
        &self.browser
    }

    /// Send a browser-level command.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.transport.call(method, params, None).await
    }

    /// Open a new tab and attach a session to it.
    pub async fn new_page(&self, url: Option<&str>) -> Result<PageSession, CdpError> {
        // Chrome requires PUT for /json/new
        let create_url = match url {
            Some(u) => format!("{}/json/new?{}", self.http_endpoint, u),
            None => format!("{}/json/new", self.http_endpoint),
        };

        let target: TargetInfo = self
            .http
            .put(&create_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!("Created new page: {} - {}", target.id, target.url);

        let result = self
            .call(
                "Target.attachToTarget",
                Some(json!({
                    "targetId": target.id,
                    "flatten": true
                })),
            )
            .await?;

        let session_id = result["sessionId"]
            .as_str()
            .ok_or_else(|| CdpError::InvalidResponse("Missing sessionId".to_string()))?
            .to_string();

        let session = PageSession::new(target.id, session_id, self.transport.clone());
        session.enable_domains().await?;

        Ok(session)
    }

    /// Close a page/target.
    pub async fn close_page(&self, target_id: &str) -> Result<(), CdpError> {
        self.call("Target.closeTarget", Some(json!({"targetId": target_id})))
            .await?;
        Ok(())
    }

    /// Ask the browser process to exit.
    pub async fn close_browser(&self) -> Result<(), CdpError> {
        self.call("Browser.close", None).await?;
        Ok(())
    }
}

impl Drop for CdpClient {
    fn drop(&mut self) {
        self._recv_task.abort();
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
