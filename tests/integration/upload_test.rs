//! Integration tests for `PUT /post-image`.

mod helpers;

use http::StatusCode;

use helpers::{PNG, Part, TestApp};

#[tokio::test]
async fn test_upload_without_file() {
    let app = TestApp::new().await;
    let user = app.register("max@example.com").await;

    let response = app
        .multipart("PUT", "/post-image", &[], Some(&user.token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["message"], "No file provided!");
    assert!(response.data().get("file_path").is_none());
}

#[tokio::test]
async fn test_upload_stores_image() {
    let app = TestApp::new().await;
    let user = app.register("max@example.com").await;

    let response = app
        .multipart("PUT", "/post-image", &[Part::png("image")], Some(&user.token))
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    assert_eq!(response.data()["message"], "File stored.");
    let key = response.data()["file_path"].as_str().unwrap();
    assert!(key.starts_with("images/"));
    assert!(key.ends_with("photo.png"));
    assert!(app.state.images.exists(key).await.unwrap());
}

#[tokio::test]
async fn test_upload_replaces_old_path() {
    let app = TestApp::new().await;
    let user = app.register("max@example.com").await;

    let first = app
        .multipart("PUT", "/post-image", &[Part::png("image")], Some(&user.token))
        .await;
    let old = first.data()["file_path"].as_str().unwrap().to_string();

    let second = app
        .multipart(
            "PUT",
            "/post-image",
            &[Part::png("image"), Part::Text("oldPath", &old)],
            Some(&user.token),
        )
        .await;
    assert_eq!(second.status, StatusCode::CREATED);
    assert!(!app.state.images.exists(&old).await.unwrap());
}

#[tokio::test]
async fn test_upload_cannot_clear_foreign_post_image() {
    let app = TestApp::new().await;
    let owner = app.register("owner@example.com").await;
    let other = app.register("other@example.com").await;
    let post = app.create_post(&owner.token, "Owner post").await;
    let image_url = post["image_url"].as_str().unwrap();

    let response = app
        .multipart(
            "PUT",
            "/post-image",
            &[Part::png("image"), Part::Text("old_path", image_url)],
            Some(&other.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert!(app.state.images.exists(image_url).await.unwrap());
}

#[tokio::test]
async fn test_upload_cannot_clear_foreign_unattached_image() {
    let app = TestApp::new().await;
    let owner = app.register("owner@example.com").await;
    let other = app.register("other@example.com").await;

    let fresh = app
        .multipart("PUT", "/post-image", &[Part::png("image")], Some(&owner.token))
        .await;
    let key = fresh.data()["file_path"].as_str().unwrap().to_string();

    let response = app
        .multipart(
            "PUT",
            "/post-image",
            &[Part::png("image"), Part::Text("oldPath", &key)],
            Some(&other.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert!(app.state.images.exists(&key).await.unwrap());
}

#[tokio::test]
async fn test_upload_rejects_unsupported_type() {
    let app = TestApp::new().await;
    let user = app.register("max@example.com").await;

    let response = app
        .multipart(
            "PUT",
            "/post-image",
            &[Part::File {
                name: "image",
                file_name: "anim.gif",
                content_type: "image/gif",
                data: b"GIF89a\x01\x00\x01\x00",
            }],
            Some(&user.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["details"][0]["field"], "image");

    // Declared as PNG but not one.
    let response = app
        .multipart(
            "PUT",
            "/post-image",
            &[Part::File {
                name: "image",
                file_name: "fake.png",
                content_type: "image/png",
                data: b"definitely not an image",
            }],
            Some(&user.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_upload_rejects_oversized_image() {
    let app = TestApp::with_config(|c| c.storage.max_image_size_bytes = 8).await;
    let user = app.register("max@example.com").await;
    assert!(PNG.len() > 8);

    let response = app
        .multipart("PUT", "/post-image", &[Part::png("image")], Some(&user.token))
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_upload_requires_token() {
    let app = TestApp::new().await;

    let response = app
        .multipart("PUT", "/post-image", &[Part::png("image")], None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
