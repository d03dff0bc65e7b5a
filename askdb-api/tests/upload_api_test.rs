mod common;

use actix_web::test::{self, TestRequest};
use actix_web::App;
use askdb_api::handlers::configure_routes;
use common::{build_company_db, multipart_file, test_state, MockLlmClient};

#[actix_rt::test]
async fn test_upload_returns_schema() {
    let (dir, state) = test_state(MockLlmClient::new(), false);
    let app = test::init_service(
        App::new()
            .app_data(state.clone())
            .configure(configure_routes),
    )
    .await;

    let db_path = dir.path().join("company.db");
    build_company_db(&db_path);
    let bytes = std::fs::read(&db_path).unwrap();

    let (content_type, body) = multipart_file("database", "company.db", &bytes);
    let req = TestRequest::post()
        .uri("/upload")
        .insert_header(("content-type", content_type))
        .set_payload(body)
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(body["db_filename"], "company.db");
    assert_eq!(
        body["message"],
        "Database company.db uploaded successfully!"
    );
    assert_eq!(
        body["schema"]["departments"],
        serde_json::json!(["dept_id", "dept_name"])
    );
    assert_eq!(
        body["schema"]["employees"],
        serde_json::json!(["emp_id", "name", "position", "dept_id"])
    );
    assert_eq!(
        body["schema"]["salaries"],
        serde_json::json!(["emp_id", "amount"])
    );

    // The file landed in the upload store
    assert!(state.uploads.resolve("company.db").is_ok());
}

#[actix_rt::test]
async fn test_upload_missing_field_is_400_and_creates_no_file() {
    let (_dir, state) = test_state(MockLlmClient::new(), false);
    let app = test::init_service(
        App::new()
            .app_data(state.clone())
            .configure(configure_routes),
    )
    .await;

    let (content_type, body) = multipart_file("attachment", "company.db", b"whatever");
    let req = TestRequest::post()
        .uri("/upload")
        .insert_header(("content-type", content_type))
        .set_payload(body)
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert!(body["error"].as_str().unwrap().contains("No file uploaded"));

    let entries: Vec<_> = std::fs::read_dir(state.uploads.root())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert!(entries.is_empty(), "upload dir should stay empty");
}

#[actix_rt::test]
async fn test_upload_invalid_database_is_400() {
    let (_dir, state) = test_state(MockLlmClient::new(), false);
    let app = test::init_service(
        App::new()
            .app_data(state.clone())
            .configure(configure_routes),
    )
    .await;

    let (content_type, body) =
        multipart_file("database", "garbage.db", b"not a sqlite file at all");
    let req = TestRequest::post()
        .uri("/upload")
        .insert_header(("content-type", content_type))
        .set_payload(body)
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[actix_rt::test]
async fn test_upload_traversal_filename_stays_in_store() {
    let (dir, state) = test_state(MockLlmClient::new(), false);
    let app = test::init_service(
        App::new()
            .app_data(state.clone())
            .configure(configure_routes),
    )
    .await;

    let db_path = dir.path().join("seed.db");
    build_company_db(&db_path);
    let bytes = std::fs::read(&db_path).unwrap();

    let (content_type, body) = multipart_file("database", "../../escape.db", &bytes);
    let req = TestRequest::post()
        .uri("/upload")
        .insert_header(("content-type", content_type))
        .set_payload(body)
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(body["db_filename"], "escape.db");
    assert!(state.uploads.root().join("escape.db").is_file());
    assert!(!dir.path().join("escape.db").exists());
}
