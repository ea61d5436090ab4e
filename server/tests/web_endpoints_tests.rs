use axum::body::Body;
use axum::http::{Request, StatusCode};
use taskboard_server::config::Config;
use taskboard_server::web::create_app;
use tower::ServiceExt;

fn config(dir: &tempfile::TempDir) -> Config {
    Config {
        port: 0,
        data_file: dir.path().join("data").join("tasks.json"),
        static_dir: None,
        enforce_future_due_dates: true,
    }
}

#[tokio::test]
async fn health_check_responds_ok() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_app(&config(&dir)).unwrap();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn creating_app_initializes_data_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir);

    create_app(&config).unwrap();

    assert_eq!(std::fs::read_to_string(&config.data_file).unwrap(), "[]");
}

#[tokio::test]
async fn serves_static_assets_when_configured() {
    let dir = tempfile::tempdir().unwrap();
    let public = dir.path().join("public");
    std::fs::create_dir_all(&public).unwrap();
    std::fs::write(public.join("index.html"), "<h1>Tasks</h1>").unwrap();
    let config = Config {
        static_dir: Some(public),
        ..config(&dir)
    };
    let app = create_app(&config).unwrap();

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"<h1>Tasks</h1>");
}

#[tokio::test]
async fn api_routes_take_precedence_over_static_assets() {
    let dir = tempfile::tempdir().unwrap();
    let public = dir.path().join("public");
    std::fs::create_dir_all(&public).unwrap();
    let config = Config {
        static_dir: Some(public),
        ..config(&dir)
    };
    let app = create_app(&config).unwrap();

    let response = app
        .oneshot(Request::builder().uri("/api/tasks").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn empty_static_dir_serves_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        static_dir: Some("".into()),
        ..config(&dir)
    };
    assert!(config.static_dir().is_none());
    let app = create_app(&config).unwrap();

    // The crate manifest sits in the test's working directory
    let response = app
        .oneshot(Request::builder().uri("/Cargo.toml").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
