//! HTTP implementation of the scheduling service.
//!
//! A thin JSON REST client. Non-success responses are converted to
//! [`ServiceError::Status`] carrying the server's `message` field when the
//! body has one, so the session can surface it verbatim.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::error::{ConfigError, ServiceError};
use crate::model::{Program, ReviewEvent, Segment, WorkItem};

use super::SchedulerService;

/// Scheduling-service client over JSON REST.
#[derive(Debug, Clone)]
pub struct HttpScheduler {
    base: String,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl HttpScheduler {
    /// Build a client for the service at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ConfigError> {
        let base = base_url.trim_end_matches('/').to_string();
        Url::parse(&base).map_err(|e| ConfigError::InvalidValue {
            key: "api.base_url".into(),
            message: e.to_string(),
        })?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                key: "api.timeout_secs".into(),
                message: e.to_string(),
            })?;
        Ok(Self { base, http })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base)
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ServiceError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = match resp.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };
        Err(ServiceError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl SchedulerService for HttpScheduler {
    async fn fetch_due_work_items(
        &self,
        as_of: NaiveDate,
        limit: usize,
    ) -> Result<Vec<WorkItem>, ServiceError> {
        let resp = self
            .http
            .get(self.endpoint("work-items"))
            .query(&[
                ("as_of", as_of.to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await?;
        let items = Self::check(resp).await?.json::<Vec<WorkItem>>().await?;
        Ok(items)
    }

    async fn submit_grade(&self, item_id: i64, quality: u8) -> Result<(), ServiceError> {
        let resp = self
            .http
            .post(self.endpoint("reviews"))
            .json(&json!({ "item_id": item_id, "quality": quality }))
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn complete_segment(&self, segment_id: i64) -> Result<(), ServiceError> {
        let resp = self
            .http
            .post(self.endpoint(&format!("segments/{segment_id}/complete")))
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn fetch_review_events(
        &self,
        since: Option<NaiveDate>,
    ) -> Result<Vec<ReviewEvent>, ServiceError> {
        let mut req = self.http.get(self.endpoint("review-events"));
        if let Some(since) = since {
            req = req.query(&[("since", since.to_string())]);
        }
        let resp = req.send().await?;
        let events = Self::check(resp).await?.json::<Vec<ReviewEvent>>().await?;
        Ok(events)
    }

    async fn fetch_pending_segments(&self) -> Result<Vec<Segment>, ServiceError> {
        let resp = self
            .http
            .get(self.endpoint("segments"))
            .query(&[("state", "pending")])
            .send()
            .await?;
        let segments = Self::check(resp).await?.json::<Vec<Segment>>().await?;
        Ok(segments)
    }

    async fn fetch_segment(&self, segment_id: i64) -> Result<Option<Segment>, ServiceError> {
        let resp = self
            .http
            .get(self.endpoint(&format!("segments/{segment_id}")))
            .send()
            .await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let segment = Self::check(resp).await?.json::<Segment>().await?;
        Ok(Some(segment))
    }

    async fn reschedule_segment(
        &self,
        segment_id: i64,
        new_date: NaiveDate,
    ) -> Result<(), ServiceError> {
        let resp = self
            .http
            .patch(self.endpoint(&format!("segments/{segment_id}")))
            .json(&json!({ "planned_date": new_date }))
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn fetch_programs(&self) -> Result<Vec<Program>, ServiceError> {
        let resp = self.http.get(self.endpoint("programs")).send().await?;
        let programs = Self::check(resp).await?.json::<Vec<Program>>().await?;
        Ok(programs)
    }

    async fn fetch_completed_segment_dates(&self) -> Result<Vec<DateTime<Utc>>, ServiceError> {
        let resp = self
            .http
            .get(self.endpoint("segments/completions"))
            .send()
            .await?;
        let dates = Self::check(resp)
            .await?
            .json::<Vec<DateTime<Utc>>>()
            .await?;
        Ok(dates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(server: &mockito::ServerGuard) -> HttpScheduler {
        HttpScheduler::new(&server.url(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn fetches_due_items_with_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/work-items")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("as_of".into(), "2024-01-02".into()),
                mockito::Matcher::UrlEncoded("limit".into(), "50".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[
                    {"id": 1, "due_date": "2024-01-01", "content": "alpha"},
                    {"id": 2, "due_date": "2024-01-02", "content": "beta"}
                ]"#,
            )
            .create_async()
            .await;

        let items = client(&server)
            .fetch_due_work_items(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), 50)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, 1);
        assert_eq!(items[1].content, "beta");
    }

    #[tokio::test]
    async fn submit_grade_posts_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/reviews")
            .match_body(mockito::Matcher::Json(json!({"item_id": 7, "quality": 5})))
            .with_status(204)
            .create_async()
            .await;

        client(&server).submit_grade(7, 5).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn server_error_surfaces_the_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/reviews")
            .with_status(409)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "item already graded"}"#)
            .create_async()
            .await;

        let err = client(&server).submit_grade(7, 5).await.unwrap_err();
        match err {
            ServiceError::Status { status, message } => {
                assert_eq!(status, 409);
                assert_eq!(message, "item already graded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn error_without_body_falls_back_to_status_text() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/programs")
            .with_status(500)
            .create_async()
            .await;

        let err = client(&server).fetch_programs().await.unwrap_err();
        match err {
            ServiceError::Status { status, message } => {
                assert_eq!(status, 500);
                assert!(!message.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_segment_is_none_not_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/segments/42")
            .with_status(404)
            .create_async()
            .await;

        let found = client(&server).fetch_segment(42).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn reschedule_patches_the_planned_date() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/segments/3")
            .match_body(mockito::Matcher::Json(json!({"planned_date": "2024-02-01"})))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        client(&server)
            .reschedule_segment(3, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[test]
    fn rejects_an_unparseable_base_url() {
        let err = HttpScheduler::new("not a url", Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
