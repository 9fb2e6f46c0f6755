//! End-to-end learning session against mocked scheduling and content services.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use hafiz_core::learn::{LearnPhase, LearnSession};
use hafiz_core::{HttpContent, HttpScheduler};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn services(server: &mockito::ServerGuard) -> (Arc<HttpScheduler>, Arc<HttpContent>) {
    (
        Arc::new(HttpScheduler::new(&server.url(), Duration::from_secs(5)).unwrap()),
        Arc::new(HttpContent::new(&server.url(), Duration::from_secs(5)).unwrap()),
    )
}

#[tokio::test]
async fn resolves_loads_and_completes_todays_segment() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/segments")
        .match_query(mockito::Matcher::UrlEncoded("state".into(), "pending".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[
                {"id": 5, "program_id": 1, "planned_date": "2024-01-04", "day_index": 3,
                 "page_from": 12, "page_to": 13, "completed_at": null},
                {"id": 4, "program_id": 1, "planned_date": "2024-01-03", "day_index": 2,
                 "page_from": 10, "page_to": 11, "completed_at": null}
            ]"#,
        )
        .create_async()
        .await;

    let verses = server
        .mock("GET", "/verses")
        .match_query(mockito::Matcher::AllOf(vec![
            mockito::Matcher::UrlEncoded("page_from".into(), "10".into()),
            mockito::Matcher::UrlEncoded("page_to".into(), "11".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[
                {"id": 100, "chapter_id": 2, "number": 1, "text": "first verse", "page": 10},
                {"id": 101, "chapter_id": 2, "number": 2, "text": "second verse", "page": 11}
            ]"#,
        )
        .create_async()
        .await;

    let complete = server
        .mock("POST", "/segments/4/complete")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let (scheduler, content) = services(&server).await;
    let mut session = LearnSession::new(scheduler, content, false);

    // Earliest pending on-or-before today wins: id 4 (2024-01-03).
    session.load(None, date(2024, 1, 5)).await.unwrap();
    verses.assert_async().await;
    assert_eq!(session.phase(), LearnPhase::Loaded);
    assert_eq!(session.segment().unwrap().id, 4);
    assert_eq!(session.verses().len(), 2);

    session.complete().await.unwrap();
    complete.assert_async().await;
    assert_eq!(session.phase(), LearnPhase::Completed);
}

#[tokio::test]
async fn nothing_pending_is_the_not_found_state() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/segments")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let (scheduler, content) = services(&server).await;
    let mut session = LearnSession::new(scheduler, content, false);

    session.load(None, date(2024, 1, 5)).await.unwrap();
    assert_eq!(session.phase(), LearnPhase::NotFound);
}

#[tokio::test]
async fn failed_completion_keeps_the_segment_loaded() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/segments/9")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"id": 9, "program_id": 1, "planned_date": "2024-01-05", "day_index": 0,
                "page_from": 20, "page_to": 20, "completed_at": null}"#,
        )
        .create_async()
        .await;
    server
        .mock("GET", "/verses")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id": 1, "chapter_id": 3, "number": 1, "text": "verse", "page": 20}]"#)
        .create_async()
        .await;
    server
        .mock("POST", "/segments/9/complete")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "schedule initialization failed"}"#)
        .create_async()
        .await;

    let (scheduler, content) = services(&server).await;
    let mut session = LearnSession::new(scheduler, content, false);
    session.load(Some(9), date(2024, 1, 5)).await.unwrap();

    let err = session.complete().await.unwrap_err();
    assert!(err.to_string().contains("schedule initialization failed"));
    assert_eq!(session.phase(), LearnPhase::Loaded);
    assert_eq!(session.verses().len(), 1);
}
