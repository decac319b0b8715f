use std::error::Error;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vidzy::{api, Config, DocumentStore, InMemoryDocumentStore, JsonFileStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vidzy=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load();

    let store: Arc<dyn DocumentStore> = match &config.data_file {
        Some(path) => {
            info!("using document store file {}", path.display());
            Arc::new(JsonFileStore::open(path)?)
        }
        None => {
            info!("using in-memory document store; data is lost on exit");
            Arc::new(InMemoryDocumentStore::new())
        }
    };

    api::serve(store, &config).await?;
    Ok(())
}
