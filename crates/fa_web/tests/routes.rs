use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use fa_core::{CompletionModel, Error, Result};
use fa_crew::Crew;
use fa_web::{create_app, AppState};

#[derive(Debug)]
struct StaticModel {
    reply: Result<String>,
}

impl StaticModel {
    fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            reply: Err(Error::Inference(message.to_string())),
        }
    }
}

#[async_trait]
impl CompletionModel for StaticModel {
    fn name(&self) -> &str {
        "static"
    }

    async fn complete(&self, _system: &str, _prompt: &str) -> Result<String> {
        match &self.reply {
            Ok(reply) => Ok(reply.clone()),
            Err(Error::Inference(message)) => Err(Error::Inference(message.clone())),
            Err(_) => unreachable!(),
        }
    }
}

fn app_with_model(model: StaticModel) -> axum::Router {
    let crew = Crew::with_default_config(Arc::new(model)).unwrap();
    create_app(AppState::new(crew))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn root_reports_the_server_is_running() {
    let app = app_with_model(StaticModel::replying("{}"));
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"message": "Server is running"})
    );
}

#[tokio::test]
async fn analyze_returns_the_parsed_report() {
    let app = app_with_model(StaticModel::replying(
        r#"{"ticker": "XYZ", "sentiment": "bullish"}"#,
    ));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/analyze/XYZ")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"ticker": "XYZ", "sentiment": "bullish"})
    );
}

#[tokio::test]
async fn analyze_strips_code_fences_before_parsing() {
    let app = app_with_model(StaticModel::replying(
        "```json\n{\"ticker\": \"XYZ\"}\n```",
    ));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/analyze/XYZ")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"ticker": "XYZ"}));
}

#[tokio::test]
async fn non_json_model_output_is_a_fixed_500() {
    let app = app_with_model(StaticModel::replying("XYZ looks great, buy now!"));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/analyze/XYZ")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({"detail": "Model did not return valid JSON."})
    );
}

#[tokio::test]
async fn pipeline_errors_carry_their_message() {
    let app = app_with_model(StaticModel::failing("model unavailable"));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/analyze/XYZ")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("model unavailable"));
}
