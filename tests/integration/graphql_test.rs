//! Integration tests for the `/graphql` endpoint.

mod helpers;

use http::StatusCode;
use serde_json::{Value, json};

use helpers::{Part, TestApp};

const CREATE_USER: &str = r#"
    mutation CreateUser($input: UserInputData!) {
        createUser(userInput: $input) { id email name status posts }
    }
"#;

const LOGIN: &str = r#"
    mutation Login($email: String!, $password: String!) {
        login(email: $email, password: $password) { token userId }
    }
"#;

const CREATE_POST: &str = r#"
    mutation CreatePost($input: PostInputData!) {
        createPost(postInput: $input) { id title imageUrl creator { id name } }
    }
"#;

const POSTS: &str = r#"
    query Posts($page: Int) {
        posts(page: $page) { totalPosts page totalPages posts { id title } }
    }
"#;

fn first_error(body: &Value) -> &Value {
    &body["errors"][0]
}

async fn graphql_login(app: &TestApp, email: &str) -> String {
    let response = app
        .graphql(
            CREATE_USER,
            json!({ "input": { "email": email, "name": "Max", "password": "secret123" } }),
            None,
        )
        .await;
    assert!(response.body["errors"].is_null(), "{}", response.body);

    let response = app
        .graphql(
            LOGIN,
            json!({ "email": email, "password": "secret123" }),
            None,
        )
        .await;
    assert!(response.body["errors"].is_null(), "{}", response.body);
    response.body["data"]["login"]["token"]
        .as_str()
        .unwrap()
        .to_string()
}

async fn upload_image(app: &TestApp, token: &str) -> String {
    let response = app
        .multipart("PUT", "/post-image", &[Part::png("image")], Some(token))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.data()["file_path"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_create_user_and_login() {
    let app = TestApp::new().await;

    let response = app
        .graphql(
            CREATE_USER,
            json!({ "input": { "email": "max@example.com", "name": "Max", "password": "secret123" } }),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let user = &response.body["data"]["createUser"];
    assert_eq!(user["email"], "max@example.com");
    assert_eq!(user["status"], "I am new!");
    assert_eq!(user["posts"], json!([]));

    let response = app
        .graphql(
            LOGIN,
            json!({ "email": "max@example.com", "password": "secret123" }),
            None,
        )
        .await;
    assert_eq!(response.body["data"]["login"]["userId"], user["id"]);
}

#[tokio::test]
async fn test_create_user_validation_error() {
    let app = TestApp::new().await;

    let response = app
        .graphql(
            CREATE_USER,
            json!({ "input": { "email": "nope", "name": "Max", "password": "abc" } }),
            None,
        )
        .await;

    let error = first_error(&response.body);
    assert_eq!(error["extensions"]["code"], 422);
    let fields: Vec<&str> = error["extensions"]["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|d| d["field"].as_str())
        .collect();
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"password"));
}

#[tokio::test]
async fn test_login_failure_has_401_code() {
    let app = TestApp::new().await;

    let response = app
        .graphql(
            LOGIN,
            json!({ "email": "nobody@example.com", "password": "secret123" }),
            None,
        )
        .await;

    assert_eq!(first_error(&response.body)["extensions"]["code"], 401);
}

#[tokio::test]
async fn test_posts_require_authentication() {
    let app = TestApp::new().await;

    let response = app.graphql(POSTS, json!({}), None).await;

    let error = first_error(&response.body);
    assert_eq!(error["message"], "Not authenticated!");
    assert_eq!(error["extensions"]["code"], 401);
}

#[tokio::test]
async fn test_create_post_with_uploaded_image() {
    let app = TestApp::new().await;
    let token = graphql_login(&app, "max@example.com").await;
    let image_url = upload_image(&app, &token).await;

    let response = app
        .graphql(
            CREATE_POST,
            json!({ "input": {
                "title": "GraphQL post",
                "content": "Written through GraphQL",
                "imageUrl": image_url,
            } }),
            Some(&token),
        )
        .await;
    assert!(response.body["errors"].is_null(), "{}", response.body);
    let post = &response.body["data"]["createPost"];
    assert_eq!(post["title"], "GraphQL post");
    assert_eq!(post["imageUrl"], image_url.as_str());
    assert_eq!(post["creator"]["name"], "Max");

    let response = app.graphql(POSTS, json!({ "page": 1 }), Some(&token)).await;
    let page = &response.body["data"]["posts"];
    assert_eq!(page["totalPosts"], 1);
    assert_eq!(page["totalPages"], 1);
    assert_eq!(page["posts"][0]["title"], "GraphQL post");
}

#[tokio::test]
async fn test_create_post_without_image_is_rejected() {
    let app = TestApp::new().await;
    let token = graphql_login(&app, "max@example.com").await;

    let response = app
        .graphql(
            CREATE_POST,
            json!({ "input": { "title": "GraphQL post", "content": "No image at all" } }),
            Some(&token),
        )
        .await;

    let error = first_error(&response.body);
    assert_eq!(error["extensions"]["code"], 422);
    assert_eq!(error["extensions"]["data"][0]["field"], "image");
}

#[tokio::test]
async fn test_delete_post_by_other_user_is_forbidden() {
    let app = TestApp::new().await;
    let owner = graphql_login(&app, "owner@example.com").await;
    let other = graphql_login(&app, "other@example.com").await;
    let image_url = upload_image(&app, &owner).await;

    let response = app
        .graphql(
            CREATE_POST,
            json!({ "input": {
                "title": "Owner post",
                "content": "Only the owner may delete",
                "imageUrl": image_url,
            } }),
            Some(&owner),
        )
        .await;
    let id = response.body["data"]["createPost"]["id"].clone();

    let delete = "mutation Delete($id: UUID!) { deletePost(id: $id) }";
    let response = app.graphql(delete, json!({ "id": id }), Some(&other)).await;
    assert_eq!(first_error(&response.body)["extensions"]["code"], 403);

    let response = app.graphql(delete, json!({ "id": id }), Some(&owner)).await;
    assert_eq!(response.body["data"]["deletePost"], true);
}

#[tokio::test]
async fn test_edit_user_and_fetch_profile() {
    let app = TestApp::new().await;
    let token = graphql_login(&app, "max@example.com").await;

    let response = app
        .graphql(
            r#"mutation { editUser(userInput: { status: "Busy writing" }) { status name } }"#,
            json!({}),
            Some(&token),
        )
        .await;
    assert_eq!(response.body["data"]["editUser"]["status"], "Busy writing");

    let response = app
        .graphql("{ user { email status } }", json!({}), Some(&token))
        .await;
    assert_eq!(response.body["data"]["user"]["email"], "max@example.com");
    assert_eq!(response.body["data"]["user"]["status"], "Busy writing");
}
