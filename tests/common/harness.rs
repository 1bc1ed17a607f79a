//! Test server harness.
//!
//! Two servers per test: the chronicle service under test, and a stand-in for
//! the main service that records every result delivery it receives.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::post,
};
use chronicle::config::Config;
use chronicle::dispatch::WorkerPool;
use chronicle::gateway::{HandlerState, create_router_with_state};
use chronicle::processor::JobProcessor;
use chronicle::reporter::HttpReporter;
use chronicle::scoring::{RandomScorer, Scorer};
use parking_lot::Mutex;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU16, Ordering};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{Notify, oneshot};
use tokio::task::JoinHandle;

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;
pub const TEST_API_KEY: &str = "test-key";

#[derive(Clone)]
pub struct TestServerConfig {
    pub main_service_url: String,
    pub api_key: String,
    pub workers: usize,
    pub queue_capacity: usize,
    pub report_timeout: Duration,
    pub scorer: Arc<dyn Scorer>,
}

impl TestServerConfig {
    pub fn reporting_to(main_service_url: impl Into<String>) -> Self {
        Self {
            main_service_url: main_service_url.into(),
            api_key: TEST_API_KEY.to_string(),
            workers: 4,
            queue_capacity: 16,
            report_timeout: Duration::from_secs(5),
            scorer: Arc::new(RandomScorer::instant()),
        }
    }

    pub fn scorer(mut self, scorer: Arc<dyn Scorer>) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn pool(mut self, workers: usize, queue_capacity: usize) -> Self {
        self.workers = workers;
        self.queue_capacity = queue_capacity;
        self
    }

    pub fn report_timeout(mut self, timeout: Duration) -> Self {
        self.report_timeout = timeout;
        self
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub pool: Arc<WorkerPool>,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn wait_for_server_ready(
    addr: SocketAddr,
    timeout: Duration,
    interval: Duration,
) -> Result<(), ServerStartupError> {
    let start = std::time::Instant::now();

    loop {
        if start.elapsed() > timeout {
            return Err(ServerStartupError::Timeout);
        }

        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(_) => {
                tokio::time::sleep(interval).await;
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("Server failed to start within timeout")]
    Timeout,
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Server startup failed: {0}")]
    StartupFailed(String),
}

type Served = (SocketAddr, JoinHandle<()>, oneshot::Sender<()>);

async fn serve(app: Router) -> Result<Served, ServerStartupError> {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let local_addr = listener.local_addr()?;

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    wait_for_server_ready(
        local_addr,
        Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS),
        Duration::from_millis(STARTUP_POLL_INTERVAL_MS),
    )
    .await?;

    Ok((local_addr, server_handle, shutdown_tx))
}

/// Spawns the chronicle service wired exactly like the binary, with the
/// scorer swapped per test.
pub async fn spawn_test_server(config: TestServerConfig) -> Result<TestServer, ServerStartupError> {
    let service_config = Config {
        main_service_url: config.main_service_url,
        api_key: config.api_key,
        workers: config.workers,
        queue_capacity: config.queue_capacity,
        report_timeout: config.report_timeout,
        ..Config::default()
    };
    service_config
        .validate()
        .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;

    let reporter = HttpReporter::new(service_config.reporter_config())
        .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;
    let processor = JobProcessor::new(config.scorer, Arc::new(reporter));
    let pool = WorkerPool::start(service_config.pool_config(), processor)
        .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;
    let pool = Arc::new(pool);

    let app = create_router_with_state(HandlerState::new(pool.clone()));
    let (addr, server_handle, shutdown_tx) = serve(app).await?;

    Ok(TestServer {
        addr,
        pool,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}

/// One result delivery as seen by the main service stand-in.
#[derive(Debug, Clone)]
pub struct CapturedDelivery {
    pub request_id: String,
    pub api_key: Option<String>,
    pub body: Value,
}

#[derive(Default)]
struct StubState {
    deliveries: Mutex<Vec<CapturedDelivery>>,
    respond_with: AtomicU16,
    notify: Notify,
}

pub struct MainServiceStub {
    pub addr: SocketAddr,
    state: Arc<StubState>,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MainServiceStub {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn deliveries(&self) -> Vec<CapturedDelivery> {
        self.state.deliveries.lock().clone()
    }

    pub fn delivery_count(&self) -> usize {
        self.state.deliveries.lock().len()
    }

    /// Waits until at least `count` deliveries arrived or `timeout` elapses.
    pub async fn wait_for_deliveries(&self, count: usize, timeout: Duration) -> bool {
        tokio::time::timeout(timeout, async {
            loop {
                let notified = self.state.notify.notified();
                if self.delivery_count() >= count {
                    return;
                }
                notified.await;
            }
        })
        .await
        .is_ok()
    }
}

impl Drop for MainServiceStub {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn record_delivery(
    State(state): State<Arc<StubState>>,
    Path(request_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StatusCode {
    let api_key = headers
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    state.deliveries.lock().push(CapturedDelivery {
        request_id,
        api_key,
        body,
    });
    state.notify.notify_waiters();

    StatusCode::from_u16(state.respond_with.load(Ordering::SeqCst))
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Spawns a main service stand-in answering every delivery with `status`.
pub async fn spawn_main_service(status: StatusCode) -> Result<MainServiceStub, ServerStartupError> {
    let state = Arc::new(StubState::default());
    state.respond_with.store(status.as_u16(), Ordering::SeqCst);

    let app = Router::new()
        .route(
            "/api/ChronicleRequestList/{request_id}/update-results",
            post(record_delivery),
        )
        .with_state(state.clone());

    let (addr, server_handle, shutdown_tx) = serve(app).await?;

    Ok(MainServiceStub {
        addr,
        state,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}
