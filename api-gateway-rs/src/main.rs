// api-gateway-rs/src/main.rs
// Event planner API Gateway
// Port 5002 - HTTP/REST entry point for the planner frontend

use std::sync::Arc;

use api_gateway::{ApiGateway, GatewayOptions};
use config_rs::{AiConfig, GatewayConfig, VectorIndexConfig};
use error_handling::{init_logging, LoggingConfig};
use llm_service::GeminiClient;
use tracing::{info, warn};
use vendor_search::search::DEFAULT_TOP_K;
use vendor_search::{MemoryVendorStore, PineconeIndex, VectorIndex};

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    config_rs::load_dotenv();
    init_logging(Some(LoggingConfig::from_env("api-gateway")))?;

    let ai_config = AiConfig::from_env();
    let ai_configured = ai_config.is_configured();
    let gemini = Arc::new(GeminiClient::new(ai_config)?);

    let (index, top_k) = match VectorIndexConfig::from_env() {
        Some(config) => {
            info!(host = %config.host, "Vector index configured");
            let top_k = config.top_k;
            let index: Arc<dyn VectorIndex> = Arc::new(PineconeIndex::new(config)?);
            (Some(index), top_k)
        }
        None => (None, DEFAULT_TOP_K),
    };

    let gateway_config = GatewayConfig::from_env();
    let gateway = Arc::new(ApiGateway::new(
        gemini.clone(),
        gemini,
        Arc::new(MemoryVendorStore::default()),
        index,
        GatewayOptions {
            max_upload_bytes: gateway_config.max_upload_bytes,
            top_k,
            ai_configured,
        },
    ));

    let app = gateway.create_router();
    let listener = tokio::net::TcpListener::bind(gateway_config.bind_addr).await?;

    info!(addr = %gateway_config.bind_addr, "API Gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
