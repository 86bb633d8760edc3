//! Integration tests for post listing and CRUD over REST.

mod helpers;

use http::StatusCode;

use helpers::{Part, TestApp};

#[tokio::test]
async fn test_create_and_get_post() {
    let app = TestApp::new().await;
    let user = app.register("max@example.com").await;

    let post = app.create_post(&user.token, "First post").await;
    assert_eq!(post["title"], "First post");
    assert_eq!(post["content"], "Some interesting content");
    assert_eq!(post["creator"]["id"], user.id.to_string());
    assert_eq!(post["creator"]["name"], "Max");
    let image_url = post["image_url"].as_str().unwrap();
    assert!(image_url.starts_with("images/"));
    assert!(app.state.images.exists(image_url).await.unwrap());

    let id = post["id"].as_str().unwrap();
    let response = app
        .request("GET", &format!("/feed/post/{id}"), None, Some(&user.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["title"], "First post");
}

#[tokio::test]
async fn test_create_post_requires_image() {
    let app = TestApp::new().await;
    let user = app.register("max@example.com").await;

    let response = app
        .multipart(
            "POST",
            "/feed/post",
            &[
                Part::Text("title", "First post"),
                Part::Text("content", "Some interesting content"),
            ],
            Some(&user.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["details"][0]["field"], "image");
}

#[tokio::test]
async fn test_create_post_validates_title_and_content() {
    let app = TestApp::new().await;
    let user = app.register("max@example.com").await;

    let response = app
        .multipart(
            "POST",
            "/feed/post",
            &[
                Part::Text("title", "abc"),
                Part::Text("content", "ok"),
                Part::png("image"),
            ],
            Some(&user.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields: Vec<&str> = response.body["details"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|d| d["field"].as_str())
        .collect();
    assert!(fields.contains(&"title"));
    assert!(fields.contains(&"content"));
}

#[tokio::test]
async fn test_list_posts_is_paginated_newest_first() {
    let app = TestApp::new().await;
    let user = app.register("max@example.com").await;
    for title in ["Post one", "Post two", "Post three"] {
        app.create_post(&user.token, title).await;
    }

    let page1 = app
        .request("GET", "/feed/posts", None, Some(&user.token))
        .await;
    assert_eq!(page1.status, StatusCode::OK);
    let data = page1.data();
    assert_eq!(data["total_items"], 3);
    assert_eq!(data["total_pages"], 2);
    assert_eq!(data["page"], 1);
    let items = data["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["title"], "Post three");

    let page2 = app
        .request("GET", "/feed/posts?page=2", None, Some(&user.token))
        .await;
    let items = page2.data()["items"].as_array().unwrap().clone();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Post one");
    assert_eq!(page2.data()["total_items"], 3);

    let page9 = app
        .request("GET", "/feed/posts?page=9", None, Some(&user.token))
        .await;
    assert_eq!(page9.status, StatusCode::OK);
    assert!(page9.data()["items"].as_array().unwrap().is_empty());

    let huge = app
        .request(
            "GET",
            &format!("/feed/posts?page={}", u64::MAX),
            None,
            Some(&user.token),
        )
        .await;
    assert_eq!(huge.status, StatusCode::OK);
    assert!(huge.data()["items"].as_array().unwrap().is_empty());
    assert_eq!(huge.data()["total_items"], 3);
}

#[tokio::test]
async fn test_unknown_post_is_not_found() {
    let app = TestApp::new().await;
    let user = app.register("max@example.com").await;

    let id = uuid::Uuid::new_v4();
    let response = app
        .request("GET", &format!("/feed/post/{id}"), None, Some(&user.token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");

    let response = app
        .request("GET", "/feed/post/not-a-uuid", None, Some(&user.token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_owner_updates_post_keeping_image() {
    let app = TestApp::new().await;
    let user = app.register("max@example.com").await;
    let post = app.create_post(&user.token, "First post").await;
    let id = post["id"].as_str().unwrap();
    let image_url = post["image_url"].as_str().unwrap();

    let response = app
        .multipart(
            "PUT",
            &format!("/feed/post/{id}"),
            &[
                Part::Text("title", "Edited title"),
                Part::Text("content", "Edited content"),
                Part::Text("image", image_url),
            ],
            Some(&user.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert_eq!(response.data()["title"], "Edited title");
    assert_eq!(response.data()["image_url"], image_url);
    assert!(app.state.images.exists(image_url).await.unwrap());
}

#[tokio::test]
async fn test_replacing_image_clears_old_one() {
    let app = TestApp::new().await;
    let user = app.register("max@example.com").await;
    let post = app.create_post(&user.token, "First post").await;
    let id = post["id"].as_str().unwrap();
    let old_image = post["image_url"].as_str().unwrap().to_string();

    let response = app
        .multipart(
            "PUT",
            &format!("/feed/post/{id}"),
            &[
                Part::Text("title", "Edited title"),
                Part::Text("content", "Edited content"),
                Part::png("image"),
            ],
            Some(&user.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    let new_image = response.data()["image_url"].as_str().unwrap();
    assert_ne!(new_image, old_image);
    assert!(app.state.images.exists(new_image).await.unwrap());
    assert!(!app.state.images.exists(&old_image).await.unwrap());
}

#[tokio::test]
async fn test_non_owner_cannot_update_or_delete() {
    let app = TestApp::new().await;
    let owner = app.register("owner@example.com").await;
    let other = app.register("other@example.com").await;
    let post = app.create_post(&owner.token, "Owner post").await;
    let id = post["id"].as_str().unwrap();

    let response = app
        .multipart(
            "PUT",
            &format!("/feed/post/{id}"),
            &[
                Part::Text("title", "Hijacked title"),
                Part::Text("content", "Hijacked content"),
                Part::png("image"),
            ],
            Some(&other.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "FORBIDDEN");

    let response = app
        .request("DELETE", &format!("/feed/post/{id}"), None, Some(&other.token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("GET", &format!("/feed/post/{id}"), None, Some(&owner.token))
        .await;
    assert_eq!(response.data()["title"], "Owner post");
}

#[tokio::test]
async fn test_owner_deletes_post() {
    let app = TestApp::new().await;
    let user = app.register("max@example.com").await;
    let post = app.create_post(&user.token, "First post").await;
    let id = post["id"].as_str().unwrap();
    let image_url = post["image_url"].as_str().unwrap();

    let response = app
        .request("DELETE", &format!("/feed/post/{id}"), None, Some(&user.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["message"], "Deleted post.");
    assert!(!app.state.images.exists(image_url).await.unwrap());

    let response = app
        .request("GET", &format!("/feed/post/{id}"), None, Some(&user.token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("DELETE", &format!("/feed/post/{id}"), None, Some(&user.token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let listing = app
        .request("GET", "/feed/posts", None, Some(&user.token))
        .await;
    assert_eq!(listing.data()["total_items"], 0);
}

#[tokio::test]
async fn test_cannot_reuse_another_users_image() {
    let app = TestApp::new().await;
    let victim = app.register("victim@example.com").await;
    let attacker = app.register("attacker@example.com").await;
    let victim_post = app.create_post(&victim.token, "Victim post").await;
    let victim_image = victim_post["image_url"].as_str().unwrap();

    let response = app
        .multipart(
            "POST",
            "/feed/post",
            &[
                Part::Text("title", "Borrowed image"),
                Part::Text("content", "Some interesting content"),
                Part::Text("image", victim_image),
            ],
            Some(&attacker.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let own = app.create_post(&attacker.token, "Attacker post").await;
    let own_id = own["id"].as_str().unwrap();
    let response = app
        .multipart(
            "PUT",
            &format!("/feed/post/{own_id}"),
            &[
                Part::Text("title", "Borrowed image"),
                Part::Text("content", "Some interesting content"),
                Part::Text("image", victim_image),
            ],
            Some(&attacker.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("DELETE", &format!("/feed/post/{own_id}"), None, Some(&attacker.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(app.state.images.exists(victim_image).await.unwrap());
}
