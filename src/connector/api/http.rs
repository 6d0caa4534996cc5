use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::DomainError;

use super::Container;

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    stage: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct HealthBody {
    status: &'static str,
    provider: String,
    catalog_loaded: bool,
}

pub fn http_router(container: Arc<Container>) -> axum::Router {
    axum::Router::new()
        .route("/health", get(health))
        .route("/api/quotes", post(create_quote))
        .with_state(container)
}

/// Serve the HTTP API until the process is stopped.
pub async fn serve(container: Arc<Container>, port: u16, public: bool) -> Result<()> {
    let ip = if public { [0, 0, 0, 0] } else { [127, 0, 0, 1] };
    let addr = SocketAddr::from((ip, port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Listening on http://{addr}");
    axum::serve(listener, http_router(container)).await?;
    Ok(())
}

async fn health(State(container): State<Arc<Container>>) -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok",
        provider: container.generation_client().provider_name().to_string(),
        catalog_loaded: container.catalog_store().is_loaded(),
    })
}

async fn create_quote(
    State(container): State<Arc<Container>>,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("Rejected quote request body: {rejection}");
            return json_error(StatusCode::BAD_REQUEST, rejection.body_text(), None);
        }
    };

    let query = request.query.trim();
    if query.is_empty() {
        return json_error(StatusCode::BAD_REQUEST, "query must not be empty", None);
    }

    match container.assemble_use_case().execute(query).await {
        Ok(rendered) => (
            [(header::CONTENT_TYPE, container.renderer().content_type())],
            rendered.document,
        )
            .into_response(),
        Err(e) => {
            warn!("Quote request failed: {e}");
            error_response(&e)
        }
    }
}

fn error_response(err: &DomainError) -> Response {
    let status = match err.root() {
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        root if root.is_upstream() => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    json_error(status, err.to_string(), err.stage().map(|s| s.as_str()))
}

fn json_error(status: StatusCode, message: impl Into<String>, stage: Option<&'static str>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
            stage,
        }),
    )
        .into_response()
}
