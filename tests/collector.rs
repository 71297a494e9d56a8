// Collector integration tests: the weather API is stubbed with wiremock and
// the store is an in-memory SQLite database, so one run either writes exactly
// one row or nothing at all.

use diesel::prelude::*;
use diesel::SqliteConnection;
use openmeteo_sqlite::client::{OpenMeteoClient, OpenMeteoError};
use openmeteo_sqlite::services::collect::{run_once, CollectError};
use openmeteo_sqlite::{apply_database_migrations, establish_connection};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_conn() -> SqliteConnection {
    let mut conn = establish_connection(":memory:").expect("in-memory sqlite");
    apply_database_migrations(&mut conn).expect("migrations");
    conn
}

fn row_count(conn: &mut SqliteConnection) -> i64 {
    use openmeteo_sqlite::schema::weather_data::dsl as W;
    W::weather_data.count().get_result(conn).expect("count")
}

/// `run_once` is blocking (ureq + diesel), so drive it off the async runtime
/// that wiremock needs.
async fn run_collector(
    mut conn: SqliteConnection,
    client: OpenMeteoClient,
) -> (SqliteConnection, Result<openmeteo_sqlite::db::models::NewReading, CollectError>) {
    tokio::task::spawn_blocking(move || {
        let result = run_once(&mut conn, &client);
        (conn, result)
    })
    .await
    .expect("collector task")
}

fn client_for(server_uri: &str) -> OpenMeteoClient {
    OpenMeteoClient::with_base_url(server_uri, 51.5074, 0.1278, Duration::from_secs(10))
}

#[tokio::test(flavor = "multi_thread")]
async fn successful_run_writes_one_row() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("current_weather", "true"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"current_weather": {"temperature": 21.5}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let conn = test_conn();
    let (mut conn, result) = run_collector(conn, client_for(&server.uri())).await;

    let row = result.expect("collection succeeds");
    assert_eq!(row.temperature_celsius, 21.5);
    assert_eq!(row_count(&mut conn), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn http_error_status_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let conn = test_conn();
    let (mut conn, result) = run_collector(conn, client_for(&server.uri())).await;

    match result {
        Err(CollectError::Api(OpenMeteoError::Http { status, .. })) => assert_eq!(status, 503),
        other => panic!("expected http error, got {:?}", other),
    }
    assert_eq!(row_count(&mut conn), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_temperature_field_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"current_weather": {}})))
        .mount(&server)
        .await;

    let conn = test_conn();
    let (mut conn, result) = run_collector(conn, client_for(&server.uri())).await;

    assert!(matches!(
        result,
        Err(CollectError::Api(OpenMeteoError::MissingTemperature))
    ));
    assert_eq!(row_count(&mut conn), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn connection_error_writes_nothing() {
    // Grab a free port, then close it again so the connect is refused.
    let dead_addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr")
    };

    let conn = test_conn();
    let client = client_for(&format!("http://{}", dead_addr));
    let (mut conn, result) = run_collector(conn, client).await;

    assert!(matches!(result, Err(CollectError::Api(OpenMeteoError::Transport(_)))));
    assert_eq!(row_count(&mut conn), 0);
}
