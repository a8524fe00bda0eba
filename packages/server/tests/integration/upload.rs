use crate::common::TestApp;

#[tokio::test]
async fn upload_and_fetch_roundtrip() {
    let app = TestApp::spawn().await;
    let bytes = b"\x89PNG fake image bytes".to_vec();

    let res = app.upload("sign.png", bytes.clone(), "image/png").await;
    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["originalName"], "sign.png");

    let url = res.body["url"].as_str().expect("url in response");
    assert!(url.starts_with("/uploads/"));
    assert!(url.ends_with(".png"));

    // Stored under the generated name on disk.
    let filename = url.strip_prefix("/uploads/").unwrap();
    assert!(app.upload_path(filename).is_file());

    // And served back statically.
    let fetched = app.get(url).await;
    assert_eq!(fetched.status, 200);
    assert_eq!(fetched.text.as_bytes(), bytes.as_slice());
}

#[tokio::test]
async fn generated_names_are_unique_per_upload() {
    let app = TestApp::spawn().await;

    let first = app.upload("a.jpg", vec![1, 2, 3], "image/jpeg").await;
    let second = app.upload("a.jpg", vec![4, 5, 6], "image/jpeg").await;
    assert_eq!(first.status, 201);
    assert_eq!(second.status, 201);
    assert_ne!(first.body["url"], second.body["url"]);
}

#[tokio::test]
async fn missing_file_field_is_rejected() {
    let app = TestApp::spawn().await;

    let form = reqwest::multipart::Form::new().text("other", "value");
    let res = app
        .client
        .post(format!("http://{}/upload/file", app.addr))
        .multipart(form)
        .send()
        .await
        .expect("send upload");
    let res = crate::common::TestResponse::from_response(res).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}
