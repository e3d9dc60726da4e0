//! HTTP boundary for the asset service.
//!
//! Exposes the three boundary operations on the routes the browser UI calls:
//!
//! | Route                        | Operation                 |
//! |------------------------------|---------------------------|
//! | `GET  /doom/status`          | `AssetService::status`    |
//! | `POST /doom/download`        | `AssetService::download`  |
//! | `GET  /doom/files/:filename` | `AssetService::open_file` |
//!
//! # Example
//!
//! ```ignore
//! let service = Arc::new(AssetService::from_config(config)?);
//! let server = AssetServer::start("127.0.0.1:8188".parse()?, service).await?;
//! println!("listening on {}", server.url());
//! server.stop().await;
//! ```

mod routes;

pub use routes::{router, SharedService};

use std::io;
use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::fetch::HttpClient;

/// Handle to a running HTTP server.
pub struct AssetServer {
    addr: SocketAddr,
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl AssetServer {
    /// Bind `addr` and start serving in a background task.
    ///
    /// Binding port 0 picks a free port; see [`port`](Self::port).
    pub async fn start<C: HttpClient + 'static>(
        addr: SocketAddr,
        service: SharedService<C>,
    ) -> io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let app = router(service);

        let task = tokio::spawn(async move {
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
            if let Err(e) = result {
                error!(error = %e, "HTTP server stopped with error");
            }
        });

        info!(addr = %addr, "Asset server listening");

        Ok(Self {
            addr,
            shutdown_tx,
            task,
        })
    }

    /// The bound address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// The bound port.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Base URL of the server.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Signal a graceful shutdown and wait for in-flight requests to finish.
    pub async fn stop(self) {
        let Self {
            shutdown_tx, task, ..
        } = self;
        let _ = shutdown_tx.send(());
        if let Err(e) = task.await {
            error!(error = %e, "HTTP server task failed");
        }
        info!("Asset server stopped");
    }
}
