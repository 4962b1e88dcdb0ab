//! Fake published-sheet server for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves `GET /sheet.csv` with whatever body and status the test
//! configured, and records the raw query string of every request so tests can
//! check the cache-busting parameter.
//!
//! # Example
//!
//! ```rust,no_run
//! let sheet = FakeSheet::start(SHEET_MIXED).await.unwrap();
//! let source = SheetSource::from_location(&sheet.url(), &config.source)?;
//! ```

use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

struct SheetState {
    status: StatusCode,
    body: String,
    queries: Vec<Option<String>>,
}

/// Handle to the running fake sheet server.
pub struct FakeSheet {
    addr: SocketAddr,
    state: Arc<Mutex<SheetState>>,
}

impl FakeSheet {
    /// Start serving `body` with `200 OK`. Returns once the server is
    /// listening.
    pub async fn start(body: &str) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(SheetState {
            status: StatusCode::OK,
            body: body.to_string(),
            queries: Vec::new(),
        }));

        let app = Router::new()
            .route("/sheet.csv", get(serve_sheet))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// URL of the published CSV, without any query string.
    pub fn url(&self) -> String {
        format!("http://{}/sheet.csv", self.addr)
    }

    /// Replace the served body (the next load sees the new sheet).
    pub async fn set_body(&self, body: &str) {
        self.state.lock().await.body = body.to_string();
    }

    /// Make every following request fail with `status`.
    pub async fn fail_with(&self, status: StatusCode) {
        self.state.lock().await.status = status;
    }

    /// Raw query strings received so far, in request order.
    pub async fn queries(&self) -> Vec<Option<String>> {
        self.state.lock().await.queries.clone()
    }
}

async fn serve_sheet(
    State(state): State<Arc<Mutex<SheetState>>>,
    RawQuery(query): RawQuery,
) -> impl IntoResponse {
    let mut s = state.lock().await;
    s.queries.push(query);
    if s.status.is_success() {
        (s.status, s.body.clone())
    } else {
        (s.status, "unavailable".to_string())
    }
}
