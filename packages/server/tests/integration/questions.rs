use std::collections::HashSet;

use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde_json::json;
use server::entity::{answer, category};

use crate::common::{TestApp, question_payload, routes};

#[tokio::test]
async fn create_and_fetch_question_with_answers() {
    let app = TestApp::spawn().await;

    let id = app.create_question(&question_payload("What does a red light mean?", "uz")).await;

    let res = app.get(&routes::question(id)).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["question"], "What does a red light mean?");
    assert_eq!(res.body["correct_option"], "A");
    assert_eq!(res.body["lang"], "uz");
    assert_eq!(res.body["status"], 1);
    assert_eq!(res.body["static_order_answers"], 0);

    let answers = res.body["answers"].as_array().expect("answers array");
    assert_eq!(answers.len(), 2);
    assert_eq!(answers[0]["letter"], "A");
    assert_eq!(answers[0]["correct"], true);
    assert_eq!(answers[1]["correct"], false);
}

#[tokio::test]
async fn missing_question_is_not_found() {
    let app = TestApp::spawn().await;

    let res = app.get(&routes::question(999)).await;
    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");

    let res = app.patch(&routes::question(999), &json!({"question": "X?"})).await;
    assert_eq!(res.status, 404);

    let res = app.delete(&routes::question(999)).await;
    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn create_rejects_empty_options() {
    let app = TestApp::spawn().await;

    let res = app
        .post(routes::QUESTIONS, &json!({"question": "Q?", "options": []}))
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn patch_distinguishes_absent_null_and_value() {
    let app = TestApp::spawn().await;

    let mut payload = question_payload("Q?", "ru");
    payload["image_path"] = json!("uploads/sign.png");
    let id = app.create_question(&payload).await;

    // Absent field leaves the image alone.
    let res = app.patch(&routes::question(id), &json!({"comment": "note"})).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["image_path"], "uploads/sign.png");
    assert_eq!(res.body["comment"], "note");

    // Explicit null clears it.
    let res = app.patch(&routes::question(id), &json!({"image_path": null})).await;
    assert_eq!(res.status, 200);
    assert!(res.body["image_path"].is_null());
    assert_eq!(res.body["comment"], "note");
}

#[tokio::test]
async fn single_field_patch_routes_update_one_column() {
    let app = TestApp::spawn().await;
    let id = app.create_question(&question_payload("Q?", "ru")).await;

    let res = app
        .patch(&routes::correct_option(id), &json!({"correct_option": "B"}))
        .await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["correct_option"], "B");

    let res = app
        .patch(&routes::image_path(id), &json!({"image_path": "uploads/new.png"}))
        .await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["image_path"], "uploads/new.png");
    assert_eq!(res.body["correct_option"], "B");
}

#[tokio::test]
async fn delete_cascades_to_answers() {
    let app = TestApp::spawn().await;
    let id = app.create_question(&question_payload("Q?", "uz")).await;

    let res = app.delete(&routes::question(id)).await;
    assert_eq!(res.status, 204);

    let res = app.get(&routes::question(id)).await;
    assert_eq!(res.status, 404);

    let orphans = answer::Entity::find()
        .filter(answer::Column::QuestionId.eq(id))
        .all(&app.db)
        .await
        .expect("query answers");
    assert!(orphans.is_empty());
}

#[tokio::test]
async fn pagination_pages_are_disjoint_and_cover_everything() {
    let app = TestApp::spawn().await;

    let batch: Vec<_> = (0..5).map(|i| question_payload(&format!("Q{i}?"), "uz")).collect();
    let res = app.post(routes::QUESTIONS_BULK, &json!(batch)).await;
    assert_eq!(res.status, 201);
    assert_eq!(res.body["created"], 5);
    assert_eq!(res.body["failed"], 0);

    let page1 = app.get("/questions?page=1&per_page=2").await;
    assert_eq!(page1.status, 200);
    assert_eq!(page1.body["total"], 5);
    assert_eq!(page1.body["pageSize"], 2);
    assert_eq!(page1.body["totalPages"], 3);
    assert_eq!(page1.body["data"].as_array().unwrap().len(), 2);

    let page2 = app.get("/questions?page=2&per_page=2").await;
    let page3 = app.get("/questions?page=3&per_page=2").await;
    assert_eq!(page3.body["data"].as_array().unwrap().len(), 1);

    let ids = |res: &crate::common::TestResponse| -> Vec<i64> {
        res.body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|q| q["id"].as_i64().unwrap())
            .collect()
    };

    let (ids1, ids2, ids3) = (ids(&page1), ids(&page2), ids(&page3));
    let all: HashSet<i64> = ids1.iter().chain(&ids2).chain(&ids3).copied().collect();
    assert_eq!(all.len(), 5);

    // Ascending id order within and across pages.
    let mut flat: Vec<i64> = ids1.into_iter().chain(ids2).chain(ids3).collect();
    let sorted = {
        let mut s = flat.clone();
        s.sort_unstable();
        s
    };
    assert_eq!(flat, sorted);
    flat.dedup();
    assert_eq!(flat.len(), 5);
}

#[tokio::test]
async fn list_filters_by_lang() {
    let app = TestApp::spawn().await;
    app.create_question(&question_payload("Uz?", "uz")).await;
    app.create_question(&question_payload("Ru?", "ru")).await;

    let res = app.get("/questions?lang=ru").await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["total"], 1);
    assert_eq!(res.body["data"][0]["lang"], "ru");
}

#[tokio::test]
async fn random_returns_only_active_matching_questions() {
    let app = TestApp::spawn().await;

    let mut eligible = HashSet::new();
    for i in 0..3 {
        eligible.insert(
            app.create_question(&question_payload(&format!("Uz{i}?"), "uz")).await as i64,
        );
    }
    let mut inactive = question_payload("Inactive?", "uz");
    inactive["status"] = json!(0);
    app.create_question(&inactive).await;
    app.create_question(&question_payload("Ru?", "ru")).await;

    let res = app.get("/questions/random?lang=uz&limit=2").await;
    assert_eq!(res.status, 200);
    let items = res.body.as_array().expect("array body");
    assert_eq!(items.len(), 2);
    for q in items {
        assert!(eligible.contains(&q["id"].as_i64().unwrap()));
        assert_eq!(q["lang"], "uz");
        assert_eq!(q["status"], 1);
    }

    // Limit above the eligible pool returns the whole pool.
    let res = app.get("/questions/random?lang=uz&limit=50").await;
    assert_eq!(res.body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn ticket_count_rounds_up_and_rejects_zero() {
    let app = TestApp::spawn().await;
    for i in 0..5 {
        app.create_question(&question_payload(&format!("Q{i}?"), "uz")).await;
    }

    let res = app.get("/questions/ticket-count?questions_per_ticket=2&lang=uz").await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["totalQuestions"], 5);
    assert_eq!(res.body["questionsPerTicket"], 2);
    assert_eq!(res.body["totalTickets"], 3);
    assert_eq!(res.body["lang"], "uz");

    let res = app.get("/questions/ticket-count?questions_per_ticket=0").await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn by_category_lists_only_that_category() {
    let app = TestApp::spawn().await;
    category::ActiveModel {
        id: Set(5),
        name: Set("Signs".to_string()),
        description: Set(None),
        status: Set(1),
    }
    .insert(&app.db)
    .await
    .expect("insert category");

    let mut in_cat = question_payload("Categorized?", "uz");
    in_cat["category_id"] = json!(5);
    let id = app.create_question(&in_cat).await;
    app.create_question(&question_payload("Uncategorized?", "uz")).await;

    let res = app.get(&routes::by_category(5)).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["total"], 1);
    assert_eq!(res.body["data"][0]["id"], id);
    assert_eq!(res.body["data"][0]["category"]["name"], "Signs");
}
