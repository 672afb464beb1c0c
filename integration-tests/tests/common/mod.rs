use opc_publisher_service::{db, serve, AppState};
use opcpub::{Client, PublisherClient};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A publisher service running in-process on an ephemeral port
pub struct TestService {
    pub port: u16,
    page_size: usize,
    server: JoinHandle<()>,
    _temp_dir: TempDir,
    db_path: PathBuf,
}

impl TestService {
    pub async fn new() -> Self {
        Self::with_page_size(100).await
    }

    pub async fn with_page_size(page_size: usize) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("publisher.db");
        let (port, server) = start(db_path.clone(), page_size).await;

        Self {
            port,
            page_size,
            server,
            _temp_dir: temp_dir,
            db_path,
        }
    }

    /// Get the service base URL
    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Client with no retries and a short timeout
    pub fn publisher(&self) -> PublisherClient {
        let client = Client::new(&self.url(), None, Duration::from_secs(5), 0)
            .expect("Failed to build client");
        PublisherClient::new(client)
    }

    /// Restart the service (same DB path, new port)
    pub async fn restart(&mut self) -> u16 {
        self.server.abort();
        let _ = (&mut self.server).await;

        let (port, server) = start(self.db_path.clone(), self.page_size).await;
        self.port = port;
        self.server = server;
        port
    }
}

impl Drop for TestService {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn start(db_path: PathBuf, page_size: usize) -> (u16, JoinHandle<()>) {
    let pool = db::init_db(Some(db_path)).expect("Failed to init db");
    let state = Arc::new(AppState {
        db: pool,
        page_size,
    });

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to port 0");
    let port = listener.local_addr().unwrap().port();

    let server = tokio::spawn(async move {
        serve(listener, state).await.expect("Service failed");
    });

    (port, server)
}
