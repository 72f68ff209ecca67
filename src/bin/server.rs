//! REST API server for card form validation.
//!
//! # Usage
//!
//! ```bash
//! # Start server
//! cardvault-server
//!
//! # With custom port
//! cardvault-server --port 8080
//!
//! # With an explicit config file (a malformed file aborts startup)
//! cardvault-server --config card_vault.toml
//! ```
//!
//! # Swagger UI
//!
//! Visit http://localhost:3000/swagger-ui/ for interactive API documentation.

use axum::{
    extract::Query,
    http::{header, Method, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::{IntoParams, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use card_vault::clock::{Clock, SystemClock};
use card_vault::config::VaultConfig;
use card_vault::mask::CardPreview;
use card_vault::{classify_issuer, validate_record, CardField, CardRecord};

// ============================================================================
// OpenAPI Documentation
// ============================================================================

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Card Vault API",
        version = "0.1.0",
        description = "Payment card form normalization and validation. Length-only card number check, no Luhn. No auth or rate limiting.",
        license(name = "MIT"),
        contact(name = "API Support")
    ),
    tags(
        (name = "Formatting", description = "Keystroke normalization"),
        (name = "Validation", description = "Whole-form validation"),
        (name = "Detection", description = "Issuer classification from the number prefix"),
        (name = "System", description = "Health and status endpoints")
    ),
    paths(
        normalize_field,
        validate_card,
        preview_card,
        classify_handler,
        health,
    ),
    components(schemas(
        NormalizeRequest,
        NormalizeResponse,
        CardRequest,
        ValidateResponse,
        PreviewResponse,
        ClassifyQuery,
        ClassifyResponse,
        HealthResponse,
    ))
)]
struct ApiDoc;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({"field": "card_number", "value": "41111111"}))]
struct NormalizeRequest {
    /// Field to normalize: card_number, card_holder, expiry_date or cvv
    field: String,
    /// Raw input as typed
    value: String,
}

#[derive(Serialize, ToSchema)]
struct NormalizeResponse {
    /// Canonical value, e.g. "4111 1111"
    value: String,
}

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({
    "card_number": "4111 1111 1111 1111",
    "card_holder": "Jane Doe",
    "expiry_date": "12/30",
    "cvv": "123"
}))]
struct CardRequest {
    /// Card number; separators are allowed and normalized away
    #[serde(default)]
    card_number: String,
    /// Card holder name
    #[serde(default)]
    card_holder: String,
    /// Expiry date, MM/YY or MMYY
    #[serde(default)]
    expiry_date: String,
    /// Card verification code
    #[serde(default)]
    cvv: String,
    /// Email destination; validated only when present
    #[serde(default)]
    email: Option<String>,
}

impl CardRequest {
    fn to_record(&self) -> CardRecord {
        CardRecord::from_raw(&self.card_number, &self.card_holder, &self.expiry_date, &self.cvv)
    }
}

#[derive(Serialize, ToSchema)]
#[schema(example = json!({
    "valid": false,
    "issuer": "Visa",
    "masked": "•••• •••• •••• 1111",
    "errors": {"cvv": "CVV must be at least 3 digits"}
}))]
struct ValidateResponse {
    /// True when no field produced an error
    valid: bool,
    /// Issuer detected from the number prefix
    issuer: String,
    /// Number masked to the last four digits
    masked: String,
    /// Error message per failing field (cardNumber, cardHolder, expiryDate, cvv, email)
    errors: BTreeMap<String, String>,
}

#[derive(Serialize, ToSchema)]
struct PreviewResponse {
    /// Card number or placeholder
    card_number: String,
    /// Upper-cased holder name or placeholder
    card_holder: String,
    /// Expiry or placeholder
    expiry_date: String,
}

#[derive(Deserialize, ToSchema, IntoParams)]
struct ClassifyQuery {
    /// Card number or prefix
    card: String,
}

#[derive(Serialize, ToSchema)]
struct ClassifyResponse {
    /// Issuer name: Visa, MasterCard, American Express, Discover or Unknown
    issuer: String,
}

#[derive(Serialize, ToSchema)]
struct HealthResponse {
    /// Service status
    status: String,
    /// API version
    version: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Normalize one field as the form does while typing
#[utoipa::path(
    post,
    path = "/normalize",
    request_body = NormalizeRequest,
    responses(
        (status = 200, description = "Canonical value", body = NormalizeResponse),
        (status = 400, description = "Unknown field")
    ),
    tag = "Formatting"
)]
async fn normalize_field(
    Json(req): Json<NormalizeRequest>,
) -> Result<Json<NormalizeResponse>, (StatusCode, String)> {
    let field = parse_field(&req.field)
        .ok_or_else(|| (StatusCode::BAD_REQUEST, format!("Unknown field: {}", req.field)))?;

    Ok(Json(NormalizeResponse {
        value: field.normalize(&req.value),
    }))
}

/// Validate a whole card
#[utoipa::path(
    post,
    path = "/validate",
    request_body = CardRequest,
    responses(
        (status = 200, description = "Validation result", body = ValidateResponse)
    ),
    tag = "Validation"
)]
async fn validate_card(Json(req): Json<CardRequest>) -> Json<ValidateResponse> {
    let record = req.to_record();
    let report = validate_record(&record, req.email.as_deref(), &SystemClock.today());

    tracing::debug!(card = %record.masked_number(), valid = report.is_valid(), "validated card");

    Json(ValidateResponse {
        valid: report.is_valid(),
        issuer: classify_issuer(&record.card_number).to_string(),
        masked: record.masked_number(),
        errors: report
            .messages()
            .map(|(field, message)| (field.key().to_string(), message))
            .collect(),
    })
}

/// Render the card preview
#[utoipa::path(
    post,
    path = "/preview",
    request_body = CardRequest,
    responses(
        (status = 200, description = "Preview text", body = PreviewResponse)
    ),
    tag = "Formatting"
)]
async fn preview_card(Json(req): Json<CardRequest>) -> Json<PreviewResponse> {
    let preview = CardPreview::of(&req.to_record());
    Json(PreviewResponse {
        card_number: preview.card_number,
        card_holder: preview.card_holder,
        expiry_date: preview.expiry_date,
    })
}

/// Classify the issuer from a card number prefix
#[utoipa::path(
    get,
    path = "/classify",
    params(ClassifyQuery),
    responses(
        (status = 200, description = "Issuer name", body = ClassifyResponse)
    ),
    tag = "Detection"
)]
async fn classify_handler(Query(query): Query<ClassifyQuery>) -> Json<ClassifyResponse> {
    Json(ClassifyResponse {
        issuer: classify_issuer(&query.card).to_string(),
    })
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "System"
)]
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Helpers
// ============================================================================

fn arg_value(flag: &str) -> Option<String> {
    std::env::args().skip_while(|a| a != flag).nth(1)
}

fn parse_field(s: &str) -> Option<CardField> {
    match s.to_lowercase().as_str() {
        "card_number" | "cardnumber" | "number" => Some(CardField::CardNumber),
        "card_holder" | "cardholder" | "holder" => Some(CardField::CardHolder),
        "expiry_date" | "expirydate" | "expiry" => Some(CardField::ExpiryDate),
        "cvv" => Some(CardField::Cvv),
        _ => None,
    }
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    let config_path = arg_value("--config").map(PathBuf::from);
    let config = match VaultConfig::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},tower_http=debug", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse args
    let port: u16 = arg_value("--port")
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(Any);

    // Build router with Swagger UI
    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/normalize", post(normalize_field))
        .route("/validate", post(validate_card))
        .route("/preview", post(preview_card))
        .route("/classify", get(classify_handler))
        .route("/health", get(health))
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}:{}/swagger-ui/", "localhost", port);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
