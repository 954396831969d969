#![allow(dead_code)]
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    response::IntoResponse,
    routing::post,
    Router,
};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    reply: Vec<u8>,
    extra_headers: Vec<(&'static str, &'static str)>,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Plaintext loopback DoH endpoint answering every POST with a fixed reply.
pub struct MockDohServer {
    addr: SocketAddr,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDohServer {
    pub async fn start(status: StatusCode, reply: Vec<u8>) -> Result<Self, std::io::Error> {
        Self::start_with_headers(status, reply, Vec::new()).await
    }

    pub async fn start_with_headers(
        status: StatusCode,
        reply: Vec<u8>,
        extra_headers: Vec<(&'static str, &'static str)>,
    ) -> Result<Self, std::io::Error> {
        let recorded = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            status,
            reply,
            extra_headers,
            recorded: recorded.clone(),
        };

        let app = Router::new()
            .route("/", post(handle))
            .route("/{*path}", post(handle))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        Ok(Self {
            addr,
            recorded,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// `host:port` to use as the DoH host.
    pub fn host(&self) -> String {
        self.addr.to_string()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.recorded.lock().unwrap().clone()
    }
}

impl Drop for MockDohServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn handle(
    State(state): State<MockState>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    state.recorded.lock().unwrap().push(RecordedRequest {
        path: uri.path().to_string(),
        headers,
        body: body.to_vec(),
    });

    let mut response_headers = HeaderMap::new();
    response_headers.insert(
        "content-type",
        "application/dns-message".parse().unwrap(),
    );
    for (name, value) in &state.extra_headers {
        response_headers.insert(*name, value.parse().unwrap());
    }

    (state.status, response_headers, state.reply.clone())
}
