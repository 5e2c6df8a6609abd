//! Invocation routes
//!
//! Four endpoints over the same router. `/v1/invoke` is self-contained and
//! reports every failure itself; the `/v1/invoke/{primary,fallback,degraded}`
//! trio serves the chained topology, where an external orchestrator catches a
//! tier's failure status and calls the next tier down.

use crate::config::GatewayRole;
use crate::core::types::{InboundEvent, InvokeRequest, Tier};
use crate::server::state::AppState;
use crate::utils::error::GatewayError;
use actix_web::{HttpResponse, web};
use tracing::info;

/// Register the invocation routes served by this instance's role
pub fn configure_routes(cfg: &mut web::ServiceConfig, role: GatewayRole) {
    let scope = web::scope("/v1");

    let scope = match role {
        GatewayRole::All => scope
            .route("/invoke", web::post().to(invoke))
            .route("/invoke/primary", web::post().to(invoke_primary))
            .route("/invoke/fallback", web::post().to(invoke_fallback))
            .route("/invoke/degraded", web::post().to(invoke_degraded)),
        GatewayRole::Primary => scope.route("/invoke/primary", web::post().to(invoke_primary)),
        GatewayRole::Fallback => scope.route("/invoke/fallback", web::post().to(invoke_fallback)),
        GatewayRole::Degraded => scope.route("/invoke/degraded", web::post().to(invoke_degraded)),
    };

    cfg.service(scope);
}

/// Self-contained invocation endpoint
///
/// The body is parsed by hand so the error statuses stay distinct: a missing
/// body and a missing prompt are client errors, a body that is not JSON is
/// reported as an internal error.
pub async fn invoke(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, GatewayError> {
    if body.is_empty() {
        return Err(GatewayError::validation("Request body is required"));
    }

    let request: InvokeRequest =
        serde_json::from_slice(&body).map_err(|e| GatewayError::internal(e.to_string()))?;

    if request.prompt.is_empty() {
        return Err(GatewayError::validation("Prompt is required"));
    }

    info!("Invoke request for use case: {}", request.use_case);

    let reply = state.router.complete(&request).await?;
    Ok(HttpResponse::Ok().json(reply))
}

/// Primary tier endpoint (chained topology)
///
/// Accepts both the gateway envelope and the direct shape. Everything except
/// prompt validation surfaces as a primary-tier failure for the orchestrator.
pub async fn invoke_primary(
    state: web::Data<AppState>,
    event: web::Json<InboundEvent>,
) -> Result<HttpResponse, GatewayError> {
    let request = event
        .into_inner()
        .into_request()
        .map_err(|e| GatewayError::tier_failed(Tier::Primary, &e))?;

    if request.prompt.is_empty() {
        return Err(GatewayError::validation("Prompt is required"));
    }

    info!("Primary invoke for use case: {}", request.use_case);

    let reply = state.router.primary(&request).await?;
    Ok(HttpResponse::Ok().json(reply))
}

/// Fallback tier endpoint (chained topology)
///
/// No prompt validation: this tier answers whatever the orchestrator
/// forwards, an empty prompt included.
pub async fn invoke_fallback(
    state: web::Data<AppState>,
    request: web::Json<InvokeRequest>,
) -> Result<HttpResponse, GatewayError> {
    let request = request.into_inner();

    info!("Fallback invoke for use case: {}", request.use_case);

    let reply = state.router.fallback(&request).await?;
    Ok(HttpResponse::Ok().json(reply))
}

/// Degraded tier endpoint (chained topology), cannot fail
pub async fn invoke_degraded(
    state: web::Data<AppState>,
    request: web::Json<InvokeRequest>,
) -> HttpResponse {
    let reply = state.router.degraded(&request);
    HttpResponse::Ok().json(reply)
}
