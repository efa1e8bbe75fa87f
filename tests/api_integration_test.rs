//! End-to-end API tests: a real listener, driven through the crate's
//! own retrying client.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use gradebook::aggregate::Dimension;
use gradebook::api;
use gradebook::course::{CourseDraft, CourseStore, Semester};
use gradebook::kv::MemoryKvStore;
use gradebook::{Client, Error, RetryPolicy};

async fn spawn_server() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let store = Arc::new(CourseStore::new(MemoryKvStore::new()));
    let app = api::router(store);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr) -> Client {
    Client::new(format!("http://{addr}"))
        .with_retry(RetryPolicy::new(2, Duration::from_millis(50)))
}

#[tokio::test]
async fn test_course_crud_round_trip() {
    let addr = spawn_server().await;
    let client = client_for(addr);

    let id = client
        .create_course(&CourseDraft::new("Algorithms", 92, 3.5, 2024, Semester::A))
        .await
        .unwrap();

    let record = client.get_course(&id).await.unwrap();
    assert_eq!(record.id(), id);
    assert_eq!(record.name(), "Algorithms");
    assert_eq!(record.grade(), 92);
    assert_eq!(record.semester(), Semester::A);

    let listed = client.list_courses().await.unwrap();
    assert_eq!(listed.len(), 1);

    client
        .update_course(&id, &CourseDraft::new("Algorithms II", 85, 4.0, 2025, Semester::B))
        .await
        .unwrap();
    let updated = client.get_course(&id).await.unwrap();
    assert_eq!(updated.name(), "Algorithms II");
    assert_eq!(updated.year(), 2025);

    client.delete_course(&id).await.unwrap();
    let result = client.get_course(&id).await;
    assert!(matches!(
        result,
        Err(Error::UnexpectedStatus { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_update_missing_course_is_404() {
    let addr = spawn_server().await;
    let client = client_for(addr);

    let result = client
        .update_course("ghost", &CourseDraft::new("X", 50, 1.0, 2024, Semester::A))
        .await;
    assert!(matches!(
        result,
        Err(Error::UnexpectedStatus { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_invalid_draft_is_422() {
    let addr = spawn_server().await;
    let client = client_for(addr);

    let result = client
        .create_course(&CourseDraft::new("", 92, 3.5, 2024, Semester::A))
        .await;
    assert!(matches!(
        result,
        Err(Error::UnexpectedStatus { status: 422, .. })
    ));

    let result = client
        .create_course(&CourseDraft::new("Algorithms", 101, 3.5, 2024, Semester::A))
        .await;
    assert!(matches!(
        result,
        Err(Error::UnexpectedStatus { status: 422, .. })
    ));
}

#[tokio::test]
async fn test_average_endpoints() {
    let addr = spawn_server().await;
    let client = client_for(addr);

    client
        .create_course(&CourseDraft::new("Algorithms", 90, 2.0, 2024, Semester::A))
        .await
        .unwrap();
    client
        .create_course(&CourseDraft::new("Databases", 70, 2.0, 2024, Semester::B))
        .await
        .unwrap();
    client
        .create_course(&CourseDraft::new("Compilers", 85, 4.0, 2025, Semester::A))
        .await
        .unwrap();

    let overall = client.overall_average().await.unwrap();
    assert_eq!(overall.courses, 3);
    assert!((overall.average - 660.0 / 8.0).abs() < 1e-9);

    let by_year = client.averages_by_year().await.unwrap();
    assert_eq!(by_year.len(), 2);
    assert_eq!(by_year[0].year, 2024);
    assert!((by_year[0].average - 80.0).abs() < 1e-9);
    assert_eq!(by_year[1].year, 2025);
    assert!((by_year[1].average - 85.0).abs() < 1e-9);

    let by_semester = client.averages_by_semester().await.unwrap();
    assert_eq!(by_semester.len(), 3);
    // Canonical order: ascending year, then semester rank.
    assert_eq!((by_semester[0].year, by_semester[0].semester), (2024, Semester::A));
    assert_eq!((by_semester[1].year, by_semester[1].semester), (2024, Semester::B));
    assert_eq!((by_semester[2].year, by_semester[2].semester), (2025, Semester::A));
}

#[tokio::test]
async fn test_selection_average_distinguishes_no_selection() {
    let addr = spawn_server().await;
    let client = client_for(addr);

    client
        .create_course(&CourseDraft::new("Algorithms", 90, 2.0, 2024, Semester::A))
        .await
        .unwrap();

    let some = client
        .selection_average(vec!["Algorithms".to_string()])
        .await
        .unwrap();
    assert!((some.unwrap() - 90.0).abs() < 1e-9);

    let none = client
        .selection_average(vec!["unknown name".to_string()])
        .await
        .unwrap();
    assert_eq!(none, None);
}

#[tokio::test]
async fn test_simulate_endpoint() {
    let addr = spawn_server().await;
    let client = client_for(addr);

    let id = client
        .create_course(&CourseDraft::new("Algorithms", 80, 2.0, 2024, Semester::A))
        .await
        .unwrap();
    client
        .create_course(&CourseDraft::new("Databases", 70, 2.0, 2024, Semester::B))
        .await
        .unwrap();

    let shifts = client.simulate(&id, 100).await.unwrap();
    assert!(!shifts.is_empty());
    assert_eq!(shifts[0].dimension(), Dimension::Overall);
    assert!(shifts.iter().all(|s| s.delta().abs() > 0.0));

    // Preview only - nothing was persisted.
    assert_eq!(client.get_course(&id).await.unwrap().grade(), 80);

    let result = client.simulate("ghost", 100).await;
    assert!(matches!(
        result,
        Err(Error::UnexpectedStatus { status: 404, .. })
    ));

    let result = client.simulate(&id, 101).await;
    assert!(matches!(
        result,
        Err(Error::UnexpectedStatus { status: 422, .. })
    ));
}

#[tokio::test]
async fn test_retries_exhaust_when_server_unreachable() {
    // Grab a port that nothing is listening on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = Client::new(format!("http://{addr}"))
        .with_retry(RetryPolicy::new(2, Duration::from_millis(10)));

    let result = client.list_courses().await;
    assert!(matches!(
        result,
        Err(Error::RetriesExhausted { attempts: 2, .. })
    ));
}
