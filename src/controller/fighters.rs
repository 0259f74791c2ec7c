use actix_web::http::StatusCode;
use actix_web::web::{self, Data};
use actix_web::HttpResponse;
use serde_json::json;
use tracing::error;

use crate::args::CleanArgs;
use crate::controller::upstream::{FighterApi, UpstreamError};

/// `GET /fighters`: the upstream listing, relayed as-is.
pub async fn list_fighters(api: Data<dyn FighterApi>, args: Data<CleanArgs>) -> HttpResponse {
    match api.fighters().await {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(e) => {
            error!("GET /fighters: {e}");
            upstream_failure(&e, args.forward_upstream_errors, "Failed to fetch fighters")
        }
    }
}

/// `GET /fighters/{id}`: one upstream fighter, relayed as-is.
pub async fn get_fighter(
    path: web::Path<String>,
    api: Data<dyn FighterApi>,
    args: Data<CleanArgs>,
) -> HttpResponse {
    let fighter_id = path.into_inner();
    match api.fighter(&fighter_id).await {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(e) => {
            error!("GET /fighters/{fighter_id}: {e}");
            upstream_failure(&e, args.forward_upstream_errors, "Failed to fetch fighter data")
        }
    }
}

/// Non-2xx answers are either relayed with their own status or folded into a
/// 500. Transport and decoding failures are always a 500.
#[must_use]
pub fn upstream_failure(err: &UpstreamError, forward: bool, summary: &str) -> HttpResponse {
    match err {
        UpstreamError::Status {
            status,
            status_text,
            body,
        } if forward => {
            let code = StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY);
            HttpResponse::build(code).json(json!({
                "error": "sportsdata_failed",
                "status": status,
                "statusText": status_text,
                "body": body,
            }))
        }
        UpstreamError::Status { .. } => HttpResponse::InternalServerError()
            .json(json!({"error": summary, "details": err.to_string()})),
        UpstreamError::Network(_) | UpstreamError::Timeout(_) | UpstreamError::Parse(_) => {
            HttpResponse::InternalServerError()
                .json(json!({"error": "server_failed", "detail": err.to_string()}))
        }
    }
}
