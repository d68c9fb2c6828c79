//! Integration tests for file upload and download

mod common;

use axum::http::StatusCode;

#[tokio::test]
#[ignore = "requires database"]
async fn test_upload_requires_token() {
    let app = common::TestApp::new().await;

    let (status, _) = app
        .upload("/uploadFile", "hello.txt", b"hello world", None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_upload_and_download_round_trip() {
    let app = common::TestApp::new().await;
    let token = app.token_for("uploader");

    let (status, response) = app
        .upload("/uploadFile", "hello.txt", b"hello world", Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);

    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    let file_name = response["fileName"].as_str().unwrap();
    assert!(file_name.ends_with("_hello.txt"));
    assert_eq!(response["size"], 11);
    assert_eq!(
        response["fileDownloadUri"],
        format!("/downloadFile/{file_name}")
    );

    // Download is public
    let (status, body) = app.get(&format!("/downloadFile/{file_name}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "hello world");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_upload_multiple_files_stores_every_part() {
    let app = common::TestApp::new().await;
    let token = app.token_for("uploader");

    let files: &[(&str, &[u8])] = &[("one.txt", b"first"), ("two.png", b"second")];
    let (status, response) = app
        .upload_many("/uploadMultipleFiles", files, Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);

    let responses: Vec<serde_json::Value> = serde_json::from_str(&response).unwrap();
    assert_eq!(responses.len(), 2);
    assert!(responses[0]["fileName"].as_str().unwrap().ends_with("_one.txt"));
    assert_eq!(responses[0]["size"], 5);
    assert!(responses[1]["fileName"].as_str().unwrap().ends_with("_two.png"));
    assert_eq!(responses[1]["size"], 6);

    // Every stored part can be fetched back
    for (stored, expected) in responses.iter().zip(["first", "second"]) {
        let uri = stored["fileDownloadUri"].as_str().unwrap();
        let (status, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, expected);
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_upload_multiple_files_rejects_empty_body() {
    let app = common::TestApp::new().await;
    let token = app.token_for("uploader");

    // Well-formed multipart body with zero file parts
    let (status, _) = app
        .upload_many("/uploadMultipleFiles", &[], Some(&token))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_download_missing_file() {
    let app = common::TestApp::new().await;

    let (status, _) = app.get("/downloadFile/does-not-exist.bin").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_uploaded_names_never_collide() {
    let app = common::TestApp::new().await;
    let token = app.token_for("uploader");

    let (_, first) = app
        .upload("/uploadFile", "same.txt", b"first", Some(&token))
        .await;
    let (_, second) = app
        .upload("/uploadFile", "same.txt", b"second", Some(&token))
        .await;

    let first: serde_json::Value = serde_json::from_str(&first).unwrap();
    let second: serde_json::Value = serde_json::from_str(&second).unwrap();
    assert_ne!(first["fileName"], second["fileName"]);
}
