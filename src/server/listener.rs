use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::content::{DiskRepository, ResourceRepository};
use crate::http::connection::Connection;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let repository: Arc<dyn ResourceRepository> =
        Arc::new(DiskRepository::new(&cfg.static_files));

    let listener = TcpListener::bind(&cfg.server.listen_addr).await?;
    info!("Listening on {}", cfg.server.listen_addr);

    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let repo = repository.clone();
        let server_name = cfg.server.name.clone();
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, repo, server_name);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
