use anyhow::Result;
use axum::{
    body::{Body, Bytes},
    http::{Response as HttpResponse, StatusCode},
    response::Response,
    routing::{get, post},
    Router,
};
use remedy_catalog::{CatalogConfig, CatalogId, CatalogStore};
use remedy_engine::RecommendationEngine;
use remedy_protocol::{InvokeRequest, InvokeResponse};
use serde::Serialize;
use std::sync::Arc;

struct HttpState {
    engine: RecommendationEngine,
}

#[derive(Serialize)]
struct HealthReport {
    status: &'static str,
    catalogs: CatalogHealth,
}

#[derive(Serialize)]
struct CatalogHealth {
    cvr: &'static str,
    common: &'static str,
}

pub async fn run(bind: &str, config: CatalogConfig) -> Result<()> {
    let engine = RecommendationEngine::new(CatalogStore::new(config.fetcher()?));
    let state = Arc::new(HttpState { engine });
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    println!("Serving invocation API on http://{bind}/invocations");
    axum::serve(listener, app).await?;
    Ok(())
}

fn router(state: Arc<HttpState>) -> Router {
    Router::new()
        .route(
            "/invocations",
            post({
                let state = state.clone();
                move |body| invoke_handler(body, state.clone())
            }),
        )
        .route(
            "/health",
            get({
                let state = state.clone();
                move || health_handler(state.clone())
            }),
        )
}

async fn invoke_handler(body: Bytes, state: Arc<HttpState>) -> Result<Response, StatusCode> {
    let request: InvokeRequest =
        serde_json::from_slice(&body).map_err(|_| StatusCode::BAD_REQUEST)?;
    let result = state.engine.lookup(request.prompt()).await;
    let response = InvokeResponse::new(result, request.session_id);
    json_response(&response)
}

async fn health_handler(state: Arc<HttpState>) -> Result<Response, StatusCode> {
    let report = HealthReport {
        status: "ok",
        catalogs: CatalogHealth {
            cvr: residency(&state, CatalogId::Cvr),
            common: residency(&state, CatalogId::Common),
        },
    };
    json_response(&report)
}

fn residency(state: &HttpState, id: CatalogId) -> &'static str {
    if state.engine.store().loaded(id) {
        "loaded"
    } else {
        "cold"
    }
}

fn json_response<T: Serialize>(value: &T) -> Result<Response, StatusCode> {
    let bytes = serde_json::to_vec(value).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(HttpResponse::builder()
        .status(StatusCode::OK)
        .header("content-type", "application/json")
        .body(Body::from(bytes))
        .expect("valid HTTP response"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use remedy_catalog::{CatalogKeys, DirFetcher};

    fn state_with_catalogs() -> (Arc<HttpState>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("cvr.csv"),
            "ERROR_MESSAGE_TEXT,RECOMMENDATIONS1\n\
             Employee number does not match,Check HR_ID mapping\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("common.csv"), "ERROR_MESSAGE,RECOMMENDATIONS\n").unwrap();

        let keys = CatalogKeys {
            cvr: "cvr.csv".to_string(),
            common: "common.csv".to_string(),
        };
        let fetcher = Arc::new(DirFetcher::new(dir.path().to_path_buf(), keys));
        let engine = RecommendationEngine::new(CatalogStore::new(fetcher));
        (Arc::new(HttpState { engine }), dir)
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn invocation_echoes_session_and_returns_result() {
        let (state, _dir) = state_with_catalogs();
        let body = Bytes::from(
            r#"{"input":{"prompt":"employee number does not match"},"session_id":"s-9"}"#,
        );
        let response = invoke_handler(body, state).await.unwrap();
        assert_eq!(
            response.headers()["content-type"],
            "application/json"
        );
        let value = body_json(response).await;
        assert_eq!(value["session_id"], "s-9");
        let result = value["result"].as_str().unwrap();
        assert!(result.contains("Check HR_ID mapping"), "{result}");
    }

    #[tokio::test]
    async fn legacy_top_level_prompt_is_accepted() {
        let (state, _dir) = state_with_catalogs();
        let body = Bytes::from(r#"{"prompt":"employee number does not match"}"#);
        let response = invoke_handler(body, state).await.unwrap();
        let value = body_json(response).await;
        assert!(
            value["result"]
                .as_str()
                .unwrap()
                .contains("Check HR_ID mapping"),
            "{value}"
        );
        assert_eq!(value["session_id"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn missing_prompt_yields_no_input_notice() {
        let (state, _dir) = state_with_catalogs();
        let response = invoke_handler(Bytes::from("{}"), state).await.unwrap();
        let value = body_json(response).await;
        assert_eq!(value["result"], "[HR] No error message provided.");
    }

    #[tokio::test]
    async fn malformed_json_is_rejected() {
        let (state, _dir) = state_with_catalogs();
        let status = invoke_handler(Bytes::from("not json"), state)
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn health_reports_catalog_residency() {
        let (state, _dir) = state_with_catalogs();
        let value = body_json(health_handler(state.clone()).await.unwrap()).await;
        assert_eq!(
            value,
            serde_json::json!({
                "status": "ok",
                "catalogs": {"cvr": "cold", "common": "cold"},
            })
        );

        let _ = state.engine.lookup("employee number does not match").await;
        let value = body_json(health_handler(state.clone()).await.unwrap()).await;
        assert_eq!(value["catalogs"]["cvr"], "loaded");
        assert_eq!(value["catalogs"]["common"], "loaded");
    }
}
