use axum::{
    Router,
    extract::{
        DefaultBodyLimit, Multipart, Query, Request, State,
        multipart::MultipartRejection,
        rejection::{JsonRejection, QueryRejection},
    },
    http::HeaderValue,
    middleware::{Next, from_fn},
    response::{Json, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{Instrument, info};
use uuid::Uuid;

use crate::{
    config::Config,
    error::{Result, ServiceError},
    extract::{ensure_pdf, extract_text_blocking},
    form::FormData,
    gateway::{AiGateway, GeminiClient},
    models::{
        AnalyticsResponse, AskRequest, AskResponse, ClaimCheckRequest, ClaimCheckResponse,
        FindHospitalsResponse, HospitalQuery, PolicyRecommendationRequest,
        RecommendPolicyResponse, UploadDocResponse,
    },
    parse::{parse_ai_json, parse_hospitals},
    prompts,
};

type ApiResult<T> = std::result::Result<Json<T>, ServiceError>;

pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn AiGateway>,
}

pub fn create_app(config: &Config) -> Result<Router> {
    let gateway = GeminiClient::new(config)?;
    let app_state = AppState {
        gateway: Arc::new(gateway),
    };
    Ok(build_router(app_state, config.max_upload_bytes))
}

pub fn build_router(app_state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/ask", post(ask_question))
        .route("/upload-doc", post(upload_doc))
        .route("/check-claim", post(check_claim))
        .route("/recommend-policy", post(recommend_policy))
        .route("/find-hospitals", get(find_hospitals))
        .route("/analytics", get(get_analytics))
        .layer(
            ServiceBuilder::new()
                .layer(from_fn(correlation_id_middleware))
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .with_state(app_state)
}

/// Tags each request with a fresh correlation id and runs it inside a span carrying it.
async fn correlation_id_middleware(mut request: Request, next: Next) -> Response {
    let correlation_id = Uuid::new_v4().to_string();

    if let Ok(value) = HeaderValue::from_str(&correlation_id) {
        request.headers_mut().insert(CORRELATION_ID_HEADER, value.clone());
        let span = tracing::info_span!("http_request", correlation_id = %correlation_id);
        let mut response = next.run(request).instrument(span).await;
        response.headers_mut().insert(CORRELATION_ID_HEADER, value);
        return response;
    }

    next.run(request).await
}

async fn root() -> Json<Value> {
    Json(json!({
        "service": "HealthInsure AI Backend",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "API to support the Health Insurance Assistant Portal.",
        "endpoints": {
            "POST /ask": "Answer a health insurance question, optionally grounded in a policy",
            "POST /upload-doc": "Extract and summarize a PDF policy document",
            "POST /check-claim": "Evaluate claim eligibility against a policy",
            "POST /recommend-policy": "Suggest policies for a user profile",
            "GET /find-hospitals": "List cashless network hospitals near a location",
            "GET /analytics": "Dashboard analytics data",
            "GET /health": "Health check"
        }
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn ask_question(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AskRequest>, JsonRejection>,
) -> ApiResult<AskResponse> {
    let Json(request) = payload?;
    info!(
        question_length = %request.question.len(),
        has_context = %request.document_context.is_some(),
        "Answering question"
    );

    let prompt = prompts::ask_prompt(&request.question, request.document_context.as_deref());
    let answer = state.gateway.generate(&prompt, false).await?;

    Ok(Json(AskResponse { answer }))
}

async fn upload_doc(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> ApiResult<UploadDocResponse> {
    let mut form = FormData::read(multipart).await?;
    let file = form
        .take_file("file")
        .ok_or_else(|| ServiceError::InvalidRequest("missing file field `file`".to_string()))?;

    let filename = file.filename.unwrap_or_default();
    info!(filename = %filename, size = %file.bytes.len(), "Processing uploaded document");

    ensure_pdf(file.content_type.as_deref())?;
    let full_text = extract_text_blocking(file.bytes.to_vec()).await?;

    let summary = state
        .gateway
        .generate(&prompts::summary_prompt(&full_text), false)
        .await?;

    Ok(Json(UploadDocResponse {
        status: "success".to_string(),
        filename,
        summary,
        full_text,
    }))
}

async fn check_claim(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> ApiResult<ClaimCheckResponse> {
    let mut form = FormData::read(multipart).await?;
    // Only the presence of a bill is reported; its contents are not analysed.
    let bill = form.take_file("bill");
    let request = ClaimCheckRequest {
        claim_type: form.require("claim_type")?,
        document_context: form.require("document_context")?,
        bill_attached: bill.is_some(),
    };

    info!(
        claim_type = %request.claim_type,
        bill_attached = %request.bill_attached,
        bill_size = %bill.as_ref().map(|b| b.bytes.len()).unwrap_or(0),
        "Checking claim eligibility"
    );

    let response_text = state
        .gateway
        .generate(&prompts::claim_check_prompt(&request), true)
        .await?;

    Ok(Json(parse_ai_json(&response_text)?))
}

async fn recommend_policy(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> ApiResult<RecommendPolicyResponse> {
    let form = FormData::read(multipart).await?;
    let request = PolicyRecommendationRequest {
        age: form.require("user_age")?,
        gender: form.require("user_gender")?,
        health_conditions: form.require("health_conditions")?,
        coverage: form.require("coverage")?,
        budget: form.require("budget")?,
    };

    info!(coverage = %request.coverage, budget = %request.budget, "Recommending policies");

    let response_text = state
        .gateway
        .generate(&prompts::recommend_policy_prompt(&request), true)
        .await?;

    Ok(Json(parse_ai_json(&response_text)?))
}

async fn find_hospitals(
    State(state): State<AppState>,
    query: std::result::Result<Query<HospitalQuery>, QueryRejection>,
) -> ApiResult<FindHospitalsResponse> {
    let Query(query) = query?;
    info!(location = %query.location, "Finding network hospitals");

    let response_text = state
        .gateway
        .generate(&prompts::find_hospitals_prompt(&query.location), true)
        .await?;

    Ok(Json(parse_hospitals(&response_text)?))
}

async fn get_analytics(State(state): State<AppState>) -> ApiResult<AnalyticsResponse> {
    info!("Generating analytics data");

    let response_text = state
        .gateway
        .generate(prompts::analytics_prompt(), true)
        .await?;

    Ok(Json(parse_ai_json(&response_text)?))
}
