use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::service::ReportService;
use super::summary::QuizAnswers;
use super::views::ReportResult;
use crate::engine::DEFAULT_TREND_LIMIT;

/// Router builder exposing the quiz catalog, report, and trend endpoints.
pub fn report_router(service: Arc<ReportService>) -> Router {
    Router::new()
        .route("/api/v1/quiz", get(catalog_handler))
        .route("/api/v1/report", post(report_handler))
        .route("/api/v1/trends", get(trends_handler))
        .with_state(service)
}

#[derive(Debug, Serialize)]
pub struct ReportEnvelope {
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub report: ReportResult,
}

#[derive(Debug, Default, Deserialize)]
pub struct TrendsQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}

pub(crate) async fn catalog_handler(State(service): State<Arc<ReportService>>) -> Response {
    (StatusCode::OK, Json(service.catalog())).into_response()
}

pub(crate) async fn report_handler(
    State(service): State<Arc<ReportService>>,
    Json(answers): Json<QuizAnswers>,
) -> Response {
    match service.report(&answers) {
        Ok(report) => {
            let envelope = ReportEnvelope {
                generated_at: Utc::now(),
                report,
            };
            (StatusCode::OK, Json(envelope)).into_response()
        }
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn trends_handler(
    State(service): State<Arc<ReportService>>,
    Query(query): Query<TrendsQuery>,
) -> Response {
    let limit = query.limit.unwrap_or(DEFAULT_TREND_LIMIT);
    let trends = service.trends(limit);
    (StatusCode::OK, Json(json!({ "stages": trends }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{
        LifeStage, LifeStageId, PopulationDataset, PrevalenceEntry, StagePrevalenceEntry, SymptomId,
    };
    use crate::report::EngineSettings;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde_json::Value;
    use std::collections::BTreeMap;
    use tower::ServiceExt;

    fn service() -> Arc<ReportService> {
        let mut dataset = PopulationDataset::default();
        dataset.life_stages.push(LifeStage {
            stage_id: LifeStageId(3),
            stage_name: "Adult (25-34)".to_string(),
            age_range_start: Some(25),
            age_range_end: Some(34),
        });
        for (id, name, percentage) in [(1, "Heavy periods", 30.0), (2, "Painful cramps", 70.0)] {
            dataset.prevalence_overall.insert(
                SymptomId(id),
                PrevalenceEntry {
                    symptom_id: SymptomId(id),
                    symptom_name: name.to_string(),
                    category_icon: "🩸".to_string(),
                    report_count: 0,
                    percentage,
                },
            );
        }
        dataset.prevalence_by_stage.insert(
            LifeStageId(3),
            BTreeMap::from([(
                SymptomId(1),
                StagePrevalenceEntry {
                    report_count: 0,
                    percentage: 40.0,
                },
            )]),
        );
        dataset.stats.total_responses = 2000;

        Arc::new(ReportService::new(
            Arc::new(dataset),
            EngineSettings::default(),
        ))
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        serde_json::from_slice(&bytes).expect("body is json")
    }

    fn post_report(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/report")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds")
    }

    #[tokio::test]
    async fn report_endpoint_ranks_with_stage_fallback() {
        let response = report_router(service())
            .oneshot(post_report(r#"{"symptom_ids":[1,2],"life_stage_id":3}"#))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert!(body["generated_at"].is_string());
        assert_eq!(body["symptom_count"], 2);
        assert_eq!(body["total_responses"], 2000);
        assert_eq!(body["life_stage"]["stage_name"], "Adult (25-34)");
        assert_eq!(body["prevalence"][0]["symptom_id"], 2);
        assert_eq!(body["prevalence"][0]["percentage"], 70.0);
        assert_eq!(body["prevalence"][1]["source"], "life_stage");
    }

    #[tokio::test]
    async fn report_endpoint_rejects_empty_selection() {
        let response = report_router(service())
            .oneshot(post_report(r#"{"symptom_ids":[]}"#))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert!(body["error"]
            .as_str()
            .expect("error message")
            .contains("at least one symptom"));
    }

    #[tokio::test]
    async fn catalog_endpoint_lists_life_stages() {
        let response = report_router(service())
            .oneshot(
                Request::builder()
                    .uri("/api/v1/quiz")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["life_stages"][0]["stage_id"], 3);
        assert_eq!(body["stats"]["total_responses"], 2000);
    }

    #[tokio::test]
    async fn trends_endpoint_honours_limit() {
        let response = report_router(service())
            .oneshot(
                Request::builder()
                    .uri("/api/v1/trends?limit=1")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let symptoms = body["stages"][0]["symptoms"]
            .as_array()
            .expect("symptom list");
        assert_eq!(symptoms.len(), 1);
        assert_eq!(symptoms[0]["symptom_name"], "Heavy periods");
    }
}
