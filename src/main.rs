//! Gradebook API server binary.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use gradebook::api;
use gradebook::course::CourseStore;
use gradebook::kv::{KvStore, MemoryKvStore};

/// Course grade tracking service
#[derive(Parser, Debug)]
#[command(name = "gradebook", version, about)]
struct Cli {
    /// Address to bind the HTTP API on
    #[arg(long, env = "GRADEBOOK_BIND", default_value = "0.0.0.0:8080")]
    bind: SocketAddr,

    /// Redis connection URL; omit to use the in-memory store
    #[cfg(feature = "redis")]
    #[arg(long, env = "GRADEBOOK_REDIS_URL")]
    redis_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("gradebook=info,tower_http=info")
            }),
        )
        .init();

    let cli = Cli::parse();

    #[cfg(feature = "redis")]
    if let Some(url) = cli.redis_url.as_deref() {
        info!("using Redis course store");
        let kv = gradebook::kv::RedisKvStore::connect(url).await?;
        return serve(cli.bind, Arc::new(CourseStore::new(kv))).await;
    }

    info!("using in-memory course store");
    serve(cli.bind, Arc::new(CourseStore::new(MemoryKvStore::new()))).await
}

async fn serve<S: KvStore + 'static>(
    bind: SocketAddr,
    store: Arc<CourseStore<S>>,
) -> anyhow::Result<()> {
    let app = api::router(store);
    info!("gradebook API listening on http://{bind}");
    let listener = tokio::net::TcpListener::bind(bind).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
