use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::json;
use server::entity::{answer, category, question, question_template, template};

use crate::common::{TestApp, question_payload, routes};

fn record(id: i32, question: &str, category_id: i32) -> serde_json::Value {
    json!({
        "id": id,
        "question": question,
        "options": ["A", "B"],
        "correct_option": "A",
        "lang": "uz",
        "category_id": category_id,
        "templates": [],
    })
}

#[tokio::test]
async fn import_creates_stub_categories_and_questions() {
    let app = TestApp::spawn().await;
    app.write_import_file("lotin", &json!([record(1, "Q1?", 5)]));

    let res = app.post_empty(&routes::import("lotin")).await;
    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["summary"]["created"], 1);
    assert_eq!(res.body["summary"]["updated"], 0);
    assert_eq!(res.body["summary"]["errors"], 0);
    assert_eq!(res.body["summary"]["total"], 1);

    let cats = app.get(routes::CATEGORIES).await;
    let items = cats.body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], 5);
    assert_eq!(items[0]["name"], "Category 5");

    let q = app.get(&routes::question(1)).await;
    assert_eq!(q.status, 200);
    assert_eq!(q.body["question"], "Q1?");
    assert_eq!(q.body["category_id"], 5);
}

#[tokio::test]
async fn reimport_is_idempotent() {
    let app = TestApp::spawn().await;
    let doc = json!([record(1, "Q1?", 5), record(2, "Q2?", 5)]);
    app.write_import_file("rus", &doc);

    let first = app.post_empty(&routes::import("rus")).await;
    assert_eq!(first.body["summary"]["created"], 2);

    let second = app.post_empty(&routes::import("rus")).await;
    assert_eq!(second.body["summary"]["created"], 0);
    assert_eq!(second.body["summary"]["updated"], 2);
    assert_eq!(second.body["summary"]["total"], 2);

    // Still exactly one stub category.
    let count = category::Entity::find().count(&app.db).await.unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn reimport_overwrites_scalar_fields() {
    let app = TestApp::spawn().await;
    app.write_import_file("lotin", &json!([record(1, "Old text?", 5)]));
    app.post_empty(&routes::import("lotin")).await;

    let mut updated = record(1, "New text?", 5);
    updated["correct_option"] = json!("B");
    app.write_import_file("lotin", &json!([updated]));
    app.post_empty(&routes::import("lotin")).await;

    let q = app.get(&routes::question(1)).await;
    assert_eq!(q.body["question"], "New text?");
    assert_eq!(q.body["correct_option"], "B");
}

#[tokio::test]
async fn import_resolves_and_replaces_template_links() {
    let app = TestApp::spawn().await;

    let mut rec = record(1, "Q1?", 5);
    rec["templates"] = json!([{"id": 1, "name": "Ticket 1", "status": 1, "questions_count": 20}]);
    app.write_import_file("crill", &json!([rec]));
    app.post_empty(&routes::import("crill")).await;

    let t = template::Entity::find_by_id(1)
        .one(&app.db)
        .await
        .unwrap()
        .expect("template created");
    assert_eq!(t.name, "Ticket 1");
    assert_eq!(t.questions_count, Some(20));

    let links = question_template::Entity::find()
        .filter(question_template::Column::QuestionId.eq(1))
        .count(&app.db)
        .await
        .unwrap();
    assert_eq!(links, 1);

    // Existing templates are not updated, and links are replaced wholesale.
    let mut rec = record(1, "Q1?", 5);
    rec["templates"] = json!([{"id": 1, "name": "Renamed", "status": 1}]);
    app.write_import_file("crill", &json!([rec]));
    app.post_empty(&routes::import("crill")).await;

    let t = template::Entity::find_by_id(1).one(&app.db).await.unwrap().unwrap();
    assert_eq!(t.name, "Ticket 1");

    app.write_import_file("crill", &json!([record(1, "Q1?", 5)]));
    app.post_empty(&routes::import("crill")).await;
    let links = question_template::Entity::find()
        .filter(question_template::Column::QuestionId.eq(1))
        .count(&app.db)
        .await
        .unwrap();
    assert_eq!(links, 0);
}

#[tokio::test]
async fn malformed_document_is_a_validation_error() {
    let app = TestApp::spawn().await;
    app.write_import_file("lotin", &json!({"not": "an array"}));

    let res = app.post_empty(&routes::import("lotin")).await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn missing_document_is_an_internal_error() {
    let app = TestApp::spawn().await;

    let res = app.post_empty(&routes::import("rus")).await;
    assert_eq!(res.status, 500);
    assert_eq!(res.body["code"], "INTERNAL_ERROR");
}

#[tokio::test]
async fn import_all_aggregates_and_skips_missing_files() {
    let app = TestApp::spawn().await;
    app.write_import_file("lotin", &json!([record(1, "Q1?", 5)]));
    app.write_import_file("rus", &json!([record(2, "Q2?", 5)]));
    // crill.json intentionally absent.

    let res = app.post_empty(&routes::import("all")).await;
    assert_eq!(res.status, 201);
    assert_eq!(res.body["summary"]["created"], 2);
    assert_eq!(res.body["summary"]["total"], 2);
}

#[tokio::test]
async fn cleanup_purges_everything_and_is_idempotent() {
    let app = TestApp::spawn().await;

    // A high explicit id keeps the imported row clear of the sequence used
    // by the API-created question below.
    let mut rec = record(50, "Q50?", 5);
    rec["templates"] = json!([{"id": 1, "name": "T1", "status": 1}]);
    app.write_import_file("lotin", &json!([rec]));
    app.post_empty(&routes::import("lotin")).await;
    app.create_question(&question_payload("With answers?", "uz")).await;

    let res = app.delete(routes::CLEANUP).await;
    assert_eq!(res.status, 204);

    assert_eq!(question::Entity::find().count(&app.db).await.unwrap(), 0);
    assert_eq!(answer::Entity::find().count(&app.db).await.unwrap(), 0);
    assert_eq!(category::Entity::find().count(&app.db).await.unwrap(), 0);
    assert_eq!(template::Entity::find().count(&app.db).await.unwrap(), 0);
    assert_eq!(
        question_template::Entity::find().count(&app.db).await.unwrap(),
        0
    );

    // Safe to run twice.
    let res = app.delete(routes::CLEANUP).await;
    assert_eq!(res.status, 204);

    // Identity sequences restart after a purge.
    let id = app.create_question(&question_payload("Fresh?", "uz")).await;
    assert_eq!(id, 1);
}
