//! HTTP front end.
//!
//! | Route | Handler |
//! |---|---|
//! | `GET /` | [`health`] |
//! | `POST /optimize` | [`optimize`] |
//!
//! Every request runs on its own [`RunConfig`] built from the server
//! defaults and the request body; the search itself runs on the blocking
//! pool.

pub mod error;
pub mod request;
pub mod response;

pub use error::ApiError;
pub use request::OptimizeRequest;
pub use response::{ErrorBody, HealthBody, OptimizeBody, SolutionBody};

use crate::config::ServerConfig;
use crate::steel::{self, ConvergenceCheck, RunConfig};
use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Read-only state shared by the handlers.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub convergence: ConvergenceCheck,
    pub run_defaults: RunConfig,
}

impl From<&ServerConfig> for AppState {
    fn from(config: &ServerConfig) -> Self {
        Self {
            convergence: config.convergence,
            run_defaults: config.run_defaults.clone(),
        }
    }
}

/// Builds the application router. Cross-origin requests are allowed from
/// any origin.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(health))
        .route("/optimize", post(optimize))
        .layer(cors)
        .with_state(state)
}

pub async fn health() -> Json<HealthBody> {
    Json(HealthBody::online())
}

pub async fn optimize(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<OptimizeBody>, ApiError> {
    let request = OptimizeRequest::from_body(&body)?;
    let config = request.apply(&state.run_defaults);
    info!(
        min_strength = config.min_strength,
        max_cost = config.max_cost,
        population = config.population_size,
        generations = config.generation_count,
        "optimize request"
    );

    let report = tokio::task::spawn_blocking(move || steel::optimize(&config))
        .await
        .map_err(|e| ApiError::Internal(format!("optimization task failed: {e}")))??;

    if !state.convergence.accepts(&report.solutions) {
        return Err(ApiError::NoConvergence);
    }
    Ok(Json(OptimizeBody::success(&report.solutions)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use serde_json::Value;

    async fn json_of(response: Response) -> (StatusCode, Value) {
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn send(state: AppState, body: &'static str) -> (StatusCode, Value) {
        let response = optimize(State(state), Bytes::from_static(body.as_bytes()))
            .await
            .into_response();
        json_of(response).await
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = json_of(health().await.into_response()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "online");
        assert_eq!(body["message"], "Steel AI Solver Active");
    }

    #[tokio::test]
    async fn test_default_request_succeeds() {
        let (status, body) = send(
            AppState::default(),
            r#"{"min_strength": 600, "max_cost": 400}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["status"], "success");

        let solutions = body["solutions"].as_array().unwrap();
        assert!(!solutions.is_empty());
        for s in solutions {
            assert_eq!(s["composition"].as_array().unwrap().len(), 6);
            assert_eq!(s["objectives"].as_array().unwrap().len(), 2);
            let strength = s["metrics"]["strength"].as_f64().unwrap();
            assert!(strength >= 600.0 - 1e-9, "strength {strength}");
            assert!(s.get("violations").is_none());
        }
    }

    #[tokio::test]
    async fn test_empty_body_uses_defaults() {
        let (status, body) = send(AppState::default(), "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
    }

    #[tokio::test]
    async fn test_string_fields_are_coerced() {
        let (status, body) = send(AppState::default(), r#"{"min_strength": "650"}"#).await;
        assert_eq!(status, StatusCode::OK);
        for s in body["solutions"].as_array().unwrap() {
            assert!(s["metrics"]["strength"].as_f64().unwrap() >= 650.0 - 1e-9);
        }
    }

    #[tokio::test]
    async fn test_unreachable_strength_fails_to_converge() {
        let (status, body) = send(AppState::default(), r#"{"min_strength": 5000}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "Optimization failed to converge");
    }

    #[tokio::test]
    async fn test_non_empty_check_returns_infeasible_front() {
        let state = AppState {
            convergence: ConvergenceCheck::NonEmpty,
            ..AppState::default()
        };
        let (status, body) = send(state, r#"{"min_strength": 5000}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body["solutions"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bad_input_is_rejected() {
        for raw in [r#"{"min_strength": "abc"}"#, "{broken", "[600]"] {
            let (status, body) = send(AppState::default(), raw).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{raw}");
            assert_eq!(body["status"], "error");
            assert!(body["message"].is_string());
        }
    }

    #[tokio::test]
    async fn test_invalid_engine_config_is_internal_error() {
        let state = AppState {
            run_defaults: RunConfig::default().with_population_size(1),
            ..AppState::default()
        };
        let (status, body) = send(state, "{}").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], "error");
    }

    #[test]
    fn test_state_from_server_config() {
        let config = ServerConfig {
            convergence: ConvergenceCheck::NonEmpty,
            run_defaults: RunConfig::default().with_seed(3),
            ..ServerConfig::default()
        };
        let state = AppState::from(&config);
        assert_eq!(state.convergence, ConvergenceCheck::NonEmpty);
        assert_eq!(state.run_defaults.seed, 3);
    }

    #[test]
    fn test_router_builds() {
        let _router: Router = router(AppState::default());
    }
}
