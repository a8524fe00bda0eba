use sea_orm::{ActiveModelTrait, Set};
use server::entity::category;

use crate::common::{TestApp, routes};

async fn insert_category(app: &TestApp, id: i32, name: &str) {
    category::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        description: Set(None),
        status: Set(1),
    }
    .insert(&app.db)
    .await
    .expect("insert category");
}

#[tokio::test]
async fn empty_store_lists_no_categories() {
    let app = TestApp::spawn().await;

    let res = app.get(routes::CATEGORIES).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn categories_are_listed_in_id_order() {
    let app = TestApp::spawn().await;
    insert_category(&app, 7, "Signs").await;
    insert_category(&app, 3, "Rules").await;

    let res = app.get(routes::CATEGORIES).await;
    assert_eq!(res.status, 200);

    let items = res.body.as_array().expect("array body");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], 3);
    assert_eq!(items[0]["name"], "Rules");
    assert_eq!(items[1]["id"], 7);
    assert_eq!(items[1]["status"], 1);
}
