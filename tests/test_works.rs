mod common;

use axum::http::StatusCode;
use mongodb::bson::oid::ObjectId;

use portfolio_api::db::models::{Year, WORKS_COLLECTION};
use portfolio_api::db::work_repository::WorkRepository;

#[tokio::test]
async fn create_then_fetch_work_with_tag_details() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let rust = env.create_tag(&server, "rust").await;
    let web = env.create_tag(&server, "web").await;

    let response = env
        .post_work(&server, "Portfolio", &[rust.clone(), web.clone()])
        .await;
    response.assert_status(StatusCode::CREATED);
    let id = common::created_id(&response.text());

    let response = server.get(&format!("/works/{id}")).await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["name"], "Portfolio");
    assert_eq!(body["year"], 2022);
    assert_eq!(body["_id"], id);
    assert_eq!(body["tags"], serde_json::json!([&rust, &web]));
    assert!(body["tagDetails"][0]["_id"].is_string());

    let mut names: Vec<&str> = body["tagDetails"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    names.sort();
    assert_eq!(names, vec!["rust", "web"]);

    // Tags are stored as ObjectIds, not strings.
    let stored = env
        .works
        .find_with_tags(ObjectId::parse_str(&id).unwrap())
        .await
        .unwrap()
        .expect("work should exist");
    assert_eq!(stored.work.year, Year::Number(2022));
    assert_eq!(
        stored.work.tags,
        vec![
            ObjectId::parse_str(&rust).unwrap(),
            ObjectId::parse_str(&web).unwrap()
        ]
    );
}

#[tokio::test]
async fn form_encoded_work_with_repeated_tags() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let response = server.post("/tag").form(&[("name", "print")]).await;
    response.assert_status(StatusCode::CREATED);
    let print = common::created_id(&response.text());
    let web = env.create_tag(&server, "web").await;

    let response = server
        .post("/work")
        .form(&[
            ("name", "Poster"),
            ("description", "Screen printed"),
            ("year", "2019-2020"),
            ("tags", print.as_str()),
            ("tags", web.as_str()),
            ("link", "https://example.com/poster"),
        ])
        .await;
    response.assert_status(StatusCode::CREATED);
    let id = common::created_id(&response.text());

    let stored = env
        .works
        .find_with_tags(ObjectId::parse_str(&id).unwrap())
        .await
        .unwrap()
        .expect("work should exist");
    assert_eq!(stored.work.year, Year::Text("2019-2020".into()));
    assert_eq!(stored.work.tags.len(), 2);
    assert_eq!(stored.tag_details.len(), 2);
}

#[tokio::test]
async fn duplicate_tag_ids_are_accepted_and_joined_once() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let rust = env.create_tag(&server, "rust").await;

    let response = env
        .post_work(&server, "Twice tagged", &[rust.clone(), rust.clone()])
        .await;
    response.assert_status(StatusCode::CREATED);
    let id = common::created_id(&response.text());

    let body: serde_json::Value = server.get(&format!("/works/{id}")).await.json();
    assert_eq!(body["tags"].as_array().unwrap().len(), 2);
    assert_eq!(body["tagDetails"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn invalid_work_payloads_create_nothing() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let rust = env.create_tag(&server, "rust").await;
    let before = env.count(WORKS_COLLECTION).await;

    let response = env.post_work(&server, "No tags", &[]).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_text("All fields are required.");

    let response = env
        .post_work(&server, "Unknown tag", &[rust.clone(), ObjectId::new().to_hex()])
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_text("One or more tags are invalid.");

    let response = env
        .post_work(&server, "Malformed tag", &["not-an-object-id".to_string()])
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .post("/work")
        .json(&serde_json::json!({ "name": "Missing everything else" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(env.count(WORKS_COLLECTION).await, before);
}

#[tokio::test]
async fn delete_work_once_then_not_found() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let rust = env.create_tag(&server, "rust").await;
    let id = common::created_id(&env.post_work(&server, "Doomed", &[rust]).await.text());
    assert_eq!(env.count(WORKS_COLLECTION).await, 1);

    let response = server.delete(&format!("/work/{id}")).await;
    response.assert_status_ok();
    response.assert_text(format!("Work with ID {id} deleted successfully."));
    assert_eq!(env.count(WORKS_COLLECTION).await, 0);

    let response = server.delete(&format!("/work/{id}")).await;
    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_text("Work not found.");
}

#[tokio::test]
async fn work_lookup_boundaries() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let response = server.get(&format!("/works/{}", ObjectId::new())).await;
    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_text("Work not found");

    // A malformed id is a server error, not a 404.
    let response = server.get("/works/12345").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.text().starts_with("Error fetching work: "));

    let response = server.delete("/work/12345").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.text().starts_with("Error deleting work: "));
}

#[tokio::test]
async fn list_works_envelope() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let body: serde_json::Value = server.get("/works").await.json();
    assert_eq!(body["status"], "OK request");
    assert_eq!(body["message"], "got all works");
    assert_eq!(body["data"], serde_json::json!([]));

    let rust = env.create_tag(&server, "rust").await;
    env.post_work(&server, "One", &[rust.clone()]).await;
    env.post_work(&server, "Two", &[rust]).await;

    let body: serde_json::Value = server.get("/works").await.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}
