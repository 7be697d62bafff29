mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{FakeEndpoint, Mode, record};
use tiktaktop_registration::error::TransportError;
use tiktaktop_registration::models::remote::RemoteReply;
use tiktaktop_registration::probe::probe_connection;
use tiktaktop_registration::queue::PendingQueue;
use tiktaktop_registration::submission::{
    OutcomeKind, SubmissionController, SubmissionOutcome, SubmissionPipeline,
};
use tiktaktop_registration::transport::{
    JsonTransport, MultipartTransport, Transport, build_client,
};

fn client() -> reqwest::Client {
    build_client(Duration::from_secs(5)).unwrap()
}

#[actix_web::test]
async fn json_transport_posts_the_record_as_json() {
    let endpoint = FakeEndpoint::start(Mode::Accept).await;
    let transport = JsonTransport::new(client(), &endpoint.url);

    let reply = transport.deliver(&record("Budi Santoso")).await.unwrap();

    assert_eq!(
        reply,
        RemoteReply::Accepted {
            message: Some("Data tersimpan".into())
        }
    );
    let posts = endpoint.posts();
    assert_eq!(posts.len(), 1);
    assert!(posts[0].content_type.starts_with("application/json"));
    let body: serde_json::Value = serde_json::from_str(&posts[0].body).unwrap();
    assert_eq!(body["name"], "Budi Santoso");
    assert_eq!(body["nik"], "1234567890123456");
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
    endpoint.stop().await;
}

#[actix_web::test]
async fn multipart_transport_sends_every_field() {
    let endpoint = FakeEndpoint::start(Mode::Accept).await;
    let transport = MultipartTransport::new(client(), &endpoint.url);

    transport.deliver(&record("Budi Santoso")).await.unwrap();

    let posts = endpoint.posts();
    assert!(posts[0].content_type.starts_with("multipart/form-data"));
    for field in ["name", "program", "nik", "phone", "address", "timestamp"] {
        assert!(
            posts[0].body.contains(&format!("name=\"{field}\"")),
            "missing {field}"
        );
    }
    assert!(posts[0].body.contains("Jl. Mawar No. 10"));
    endpoint.stop().await;
}

#[actix_web::test]
async fn non_ok_status_is_a_transport_error() {
    let endpoint = FakeEndpoint::start(Mode::Down).await;
    let transport = JsonTransport::new(client(), &endpoint.url);

    match transport.deliver(&record("Budi")).await {
        Err(TransportError::Status(status)) => assert_eq!(status.as_u16(), 503),
        other => panic!("unexpected result {other:?}"),
    }
    endpoint.stop().await;
}

#[actix_web::test]
async fn slow_endpoint_times_out() {
    let endpoint = FakeEndpoint::start(Mode::Slow(Duration::from_secs(3))).await;
    let transport = JsonTransport::new(
        build_client(Duration::from_millis(200)).unwrap(),
        &endpoint.url,
    );

    assert!(matches!(
        transport.deliver(&record("Budi")).await,
        Err(TransportError::Timeout)
    ));
    endpoint.stop().await;
}

#[actix_web::test]
async fn html_reply_is_unparsed_but_delivered() {
    let endpoint = FakeEndpoint::start(Mode::Html).await;
    let transport = JsonTransport::new(client(), &endpoint.url);

    let reply = transport.deliver(&record("Budi")).await.unwrap();
    assert_eq!(reply, RemoteReply::Unparsed);
    assert!(reply.is_delivered());
    endpoint.stop().await;
}

#[actix_web::test]
async fn probe_sends_test_query_and_reads_status() {
    let endpoint = FakeEndpoint::start(Mode::Accept).await;

    let status = probe_connection(&client(), &endpoint.url).await.unwrap();

    assert!(status.status.contains('✅'));
    let hits = endpoint.hits();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].method, "GET");
    assert_eq!(hits[0].query, "test=connection");
    endpoint.stop().await;
}

#[actix_web::test]
async fn pipeline_falls_back_to_multipart() {
    let endpoint = FakeEndpoint::start(Mode::FailJsonOnly).await;
    let dir = tempfile::tempdir().unwrap();
    let config = common::config(&endpoint.url, dir.path());
    let controller = SubmissionController::new(
        SubmissionPipeline::from_config(&config).unwrap(),
        Arc::new(PendingQueue::new(&config.pending_queue_path)),
    );

    let form = serde_json::from_value(serde_json::json!({
        "fullName": "Budi Santoso",
        "program": "Web Dev",
        "nik": "1234567890123456",
        "phone": "0812 3456 7890",
        "address": "Jl. Mawar No. 10",
        "terms": true,
    }))
    .unwrap();

    match controller.submit_form(&form).await.unwrap() {
        SubmissionOutcome::Succeeded { transport, .. } => assert_eq!(transport, "multipart"),
        other => panic!("unexpected outcome {other:?}"),
    }
    let posts = endpoint.posts();
    assert_eq!(posts.len(), 2);
    assert!(posts[1].body.contains("081234567890"));
    endpoint.stop().await;
}

#[actix_web::test]
async fn unreachable_endpoint_queues_locally() {
    let endpoint = FakeEndpoint::start(Mode::Down).await;
    let dir = tempfile::tempdir().unwrap();
    let config = common::config(&endpoint.url, dir.path());
    let queue = Arc::new(PendingQueue::new(&config.pending_queue_path));
    let controller =
        SubmissionController::new(SubmissionPipeline::from_config(&config).unwrap(), queue.clone());

    let form = serde_json::from_value(serde_json::json!({
        "fullName": "Budi Santoso",
        "program": "Web Dev",
        "nik": "1234567890123456",
        "phone": "081234567890",
        "address": "Jl. Mawar No. 10",
        "terms": "on",
    }))
    .unwrap();

    let outcome = controller.submit_form(&form).await.unwrap();
    assert_eq!(outcome.kind(), OutcomeKind::Queued);
    assert_eq!(endpoint.posts().len(), 2);

    let raw = std::fs::read_to_string(&config.pending_queue_path).unwrap();
    let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored[0]["name"], "Budi Santoso");
    assert!(stored[0]["savedAt"].is_string());
    assert!(stored[0]["id"].is_string());
    assert_eq!(queue.load().await.unwrap().len(), 1);
    endpoint.stop().await;
}
