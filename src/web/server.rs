use crate::error::{Error, Result};
use crate::oracle::Oracle;
use crate::web::api;
use log::info;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;

pub struct WebServer {
    oracle: Arc<Oracle>,
}

impl WebServer {
    pub fn new(oracle: Arc<Oracle>) -> Self {
        Self { oracle }
    }

    fn bind_address(host: &str, port: u16) -> Result<SocketAddr> {
        (host, port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| Error::ConfigError(format!("Invalid bind address: {}:{}", host, port)))
    }

    /// Serves the API until Ctrl-C.
    pub async fn start(&self, host: &str, port: u16) -> Result<()> {
        let addr = Self::bind_address(host, port)?;
        info!("Starting web server on {}", addr);

        let (bound, server) = warp::serve(api::routes(self.oracle.clone()))
            .try_bind_with_graceful_shutdown(addr, async {
                tokio::signal::ctrl_c().await.ok();
                info!("Shutdown signal received");
            })
            .map_err(|e| Error::ConfigError(format!("Failed to bind {}: {}", addr, e)))?;

        info!("Listening on http://{}", bound);
        server.await;
        info!("Web server stopped");
        Ok(())
    }
}
