// api-gateway-rs/src/lib.rs
// HTTP entry point for the event planner: vendor catalog and search,
// contract analysis and the generative planning routes.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use config_rs::DEFAULT_MAX_UPLOAD_BYTES;
use error_handling::FallbackResult;
use llm_service::models::{lenient_f64, lenient_opt_u32, lenient_string, lenient_string_list};
use llm_service::{ContractAnalyzer, Embedder, EventGenerator, PriorityLevel, TextGenerator, Vendor};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Instrument};
use uuid::Uuid;
use vendor_search::search::DEFAULT_TOP_K;
use vendor_search::{VectorIndex, VendorCatalog, VendorSearch, VendorStore};

pub mod rate_limit;
pub mod validation;

#[cfg(test)]
mod tests;

use rate_limit::{contract_error_response, error_response};
use validation::{extract_contract_text, read_contract_upload, validate_query, ApiValidationError};

pub const SERVICE_NAME: &str = "event-planner-api";

/// Set on responses that carry fallback content
pub static DEGRADED_HEADER: HeaderName = HeaderName::from_static("x-degraded");
/// Which layer of vendor search produced the results
pub static SEARCH_STRATEGY_HEADER: HeaderName = HeaderName::from_static("x-search-strategy");

static START_TIME: Lazy<Instant> = Lazy::new(Instant::now);

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(rename = "retryAfter", skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}

impl ErrorResponse {
    pub fn new<S: Into<String>>(error: S) -> Self {
        Self {
            error: error.into(),
            retry_after: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub healthy: bool,
    pub service_name: String,
    pub uptime_seconds: u64,
    pub status: String,
    pub ai_configured: bool,
    pub vector_index_configured: bool,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub event_type: String,
    /// Hours
    #[serde(default, deserialize_with = "lenient_f64")]
    pub duration: f64,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub activities: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ThemeRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRequest {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_budget: f64,
    #[serde(default)]
    pub priorities: BTreeMap<String, Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub event_type: String,
    #[serde(default, deserialize_with = "lenient_opt_u32")]
    pub guest_count: Option<u32>,
}

impl BudgetRequest {
    /// Known priority levels; anything else is dropped with a warning.
    fn priority_levels(&self) -> BTreeMap<String, PriorityLevel> {
        self.priorities
            .iter()
            .filter_map(|(category, level)| {
                match serde_json::from_value::<PriorityLevel>(level.clone()) {
                    Ok(level) => Some((category.clone(), level)),
                    Err(_) => {
                        warn!(category = %category, level = %level, "Ignoring unknown priority level");
                        None
                    }
                }
            })
            .collect()
    }
}

/// Tunables for [`ApiGateway::new`]
#[derive(Debug, Clone)]
pub struct GatewayOptions {
    pub max_upload_bytes: usize,
    pub top_k: usize,
    pub ai_configured: bool,
}

impl Default for GatewayOptions {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            top_k: DEFAULT_TOP_K,
            ai_configured: true,
        }
    }
}

/// Core API Gateway state and functionality
pub struct ApiGateway {
    generator: EventGenerator,
    contracts: ContractAnalyzer,
    search: VendorSearch,
    catalog: VendorCatalog,
    options: GatewayOptions,
    vector_index_configured: bool,
}

impl ApiGateway {
    pub fn new(
        text: Arc<dyn TextGenerator>,
        embedder: Arc<dyn Embedder>,
        store: Arc<dyn VendorStore>,
        index: Option<Arc<dyn VectorIndex>>,
        options: GatewayOptions,
    ) -> Self {
        let generator = EventGenerator::new(text.clone());
        let search = VendorSearch::new(store.clone(), index.clone(), embedder.clone(), generator.clone())
            .with_top_k(options.top_k);

        Self {
            contracts: ContractAnalyzer::new(text),
            catalog: VendorCatalog::new(store, index.clone(), embedder),
            vector_index_configured: index.is_some(),
            generator,
            search,
            options,
        }
    }

    /// Create the Axum router with all routes and middleware
    pub fn create_router(self: Arc<Self>) -> Router {
        let max_upload_bytes = self.options.max_upload_bytes;

        let api = Router::new()
            .route("/vendors", get(Self::list_vendors_handler).post(Self::create_vendor_handler))
            .route("/vendors/search", post(Self::search_vendors_handler))
            .route("/vendors/seed", post(Self::seed_vendors_handler))
            .route("/db-debug", get(Self::db_debug_handler))
            .route("/pinecone-debug", get(Self::index_debug_handler))
            .route("/contracts/analyze", post(Self::analyze_contract_handler))
            .route("/schedule/generate", post(Self::schedule_handler))
            .route("/theme/generate", post(Self::theme_handler))
            .route("/budget/allocate", post(Self::budget_handler));

        Router::new()
            .route("/", get(Self::root_handler))
            .route("/health", get(Self::health_handler))
            .nest("/api", api)
            .layer(DefaultBodyLimit::max(max_upload_bytes))
            .layer(RequestBodyLimitLayer::new(max_upload_bytes))
            .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
            .layer(TraceLayer::new_for_http())
            .with_state(self)
    }

    async fn root_handler() -> impl IntoResponse {
        Json(serde_json::json!({
            "service": SERVICE_NAME,
            "version": env!("CARGO_PKG_VERSION"),
            "endpoints": [
                "GET /health",
                "GET /api/vendors",
                "POST /api/vendors",
                "POST /api/vendors/search",
                "POST /api/vendors/seed",
                "GET /api/db-debug",
                "GET /api/pinecone-debug",
                "POST /api/contracts/analyze",
                "POST /api/schedule/generate",
                "POST /api/theme/generate",
                "POST /api/budget/allocate"
            ]
        }))
    }

    async fn health_handler(State(state): State<Arc<Self>>) -> impl IntoResponse {
        let ai_configured = state.options.ai_configured;
        let vector_index_configured = state.vector_index_configured;

        // Without either collaborator we still answer, just from fallbacks
        let status = if ai_configured && vector_index_configured {
            "SERVING"
        } else {
            "DEGRADED"
        };

        Json(HealthResponse {
            healthy: true,
            service_name: SERVICE_NAME.to_string(),
            uptime_seconds: START_TIME.elapsed().as_secs(),
            status: status.to_string(),
            ai_configured,
            vector_index_configured,
        })
    }

    async fn list_vendors_handler(State(state): State<Arc<Self>>) -> Response {
        match state.catalog.list().await {
            Ok(vendors) => Json(vendors).into_response(),
            Err(err) => error_response(&err),
        }
    }

    async fn create_vendor_handler(
        State(state): State<Arc<Self>>,
        Json(vendor): Json<Vendor>,
    ) -> Response {
        match state.catalog.create(vendor).await {
            Ok(stored) => Json(stored).into_response(),
            Err(err) => error_response(&err),
        }
    }

    async fn search_vendors_handler(
        State(state): State<Arc<Self>>,
        Json(request): Json<SearchRequest>,
    ) -> Response {
        let query = match validate_query(request.query.as_deref()) {
            Ok(query) => query,
            Err(err) => return err.into_response(),
        };

        info!(query = %query, "Vendor search");
        match state.search.search(query).await {
            Ok(outcome) => {
                let mut response = Json(outcome.vendors).into_response();
                let headers = response.headers_mut();
                headers.insert(
                    SEARCH_STRATEGY_HEADER.clone(),
                    HeaderValue::from_static(outcome.strategy.as_str()),
                );
                if outcome.degraded {
                    headers.insert(DEGRADED_HEADER.clone(), HeaderValue::from_static("true"));
                }
                response
            }
            Err(err) => error_response(&err),
        }
    }

    async fn seed_vendors_handler(State(state): State<Arc<Self>>) -> Response {
        match state.catalog.seed().await {
            Ok(report) => Json(report).into_response(),
            Err(err) => error_response(&err),
        }
    }

    async fn db_debug_handler(State(state): State<Arc<Self>>) -> Response {
        match state.catalog.store_stats().await {
            Ok(stats) => Json(stats).into_response(),
            Err(err) => error_response(&err),
        }
    }

    async fn index_debug_handler(State(state): State<Arc<Self>>) -> Response {
        match state.catalog.index_debug().await {
            Ok(debug) => Json(debug).into_response(),
            Err(err) => error_response(&err),
        }
    }

    async fn analyze_contract_handler(
        State(state): State<Arc<Self>>,
        mut multipart: Multipart,
    ) -> Response {
        let span = tracing::info_span!("contract_analysis", request_id = %Uuid::new_v4());

        async move {
            let upload = match read_contract_upload(&mut multipart).await {
                Ok(upload) => upload,
                Err(err) => return ApiValidationError::from(err).into_response(),
            };
            let text = match extract_contract_text(upload).await {
                Ok(text) => text,
                Err(err) => return ApiValidationError::from(err).into_response(),
            };

            match state.contracts.analyze(&text).await {
                Ok(analysis) => {
                    info!(degraded = analysis.is_fallback(), "Analysis complete");
                    fallback_json(analysis)
                }
                Err(err) => contract_error_response(&err),
            }
        }
        .instrument(span)
        .await
    }

    async fn schedule_handler(
        State(state): State<Arc<Self>>,
        Json(request): Json<ScheduleRequest>,
    ) -> Response {
        let schedule = state
            .generator
            .schedule(&request.event_type, request.duration, &request.activities)
            .await;
        fallback_json(schedule)
    }

    async fn theme_handler(
        State(state): State<Arc<Self>>,
        Json(request): Json<ThemeRequest>,
    ) -> Response {
        fallback_json(state.generator.theme(&request.description).await)
    }

    async fn budget_handler(
        State(state): State<Arc<Self>>,
        Json(request): Json<BudgetRequest>,
    ) -> Response {
        let priorities = request.priority_levels();
        let budget = state
            .generator
            .budget(
                Some(request.total_budget),
                priorities,
                &request.event_type,
                request.guest_count.unwrap_or(0),
            )
            .await;
        fallback_json(budget)
    }
}

/// JSON body of a generated value, flagged with `X-Degraded` when it came
/// from a fallback.
fn fallback_json<T: Serialize>(result: FallbackResult<T>) -> Response {
    let degraded = result.is_fallback();
    let mut response = (StatusCode::OK, Json(result.into_inner())).into_response();
    if degraded {
        response
            .headers_mut()
            .insert(DEGRADED_HEADER.clone(), HeaderValue::from_static("true"));
    }
    response
}
