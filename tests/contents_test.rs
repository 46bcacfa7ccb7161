//! End-to-end tests for bundle and folder content resolution.

mod helpers;

use std::sync::atomic::Ordering;

use helpers::{
    TestApp, bundle_record, document, folder, folder_record, session_id,
};

use docroom_entity::FolderContents;

/// Open the gate and clear the identity challenge, returning the session id.
async fn grant(app: &TestApp, token: &str) -> String {
    let response = app.open(token, None).await;
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    let sid = session_id(&body);

    let response = app
        .post_json(
            &format!("/v/{token}/viewer"),
            &sid,
            serde_json::json!({"name": "Ada", "email": "ada@example.com"}),
        )
        .await;
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["state"], "granted");
    sid
}

#[tokio::test]
async fn test_bundle_contents_resolve_in_one_exchange() {
    let app = TestApp::spawn().await;
    let docs = vec![
        document("one.pdf", Some("application/pdf"), None),
        document("two.pdf", Some("application/pdf"), None),
        document("three.mp4", Some("video/mp4"), None),
    ];
    app.backend.add_link(bundle_record("tok", "Deal docs", docs));

    let sid = grant(&app, "tok").await;
    let response = app.contents("tok", &sid, "").await;
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["content"]["kind"], "bundle");
    assert_eq!(body["data"]["content"]["name"], "Deal docs");
    assert_eq!(
        body["data"]["content"]["documents"].as_array().unwrap().len(),
        3
    );
    assert_eq!(app.backend.batch_calls.load(Ordering::SeqCst), 1);
    assert_eq!(app.backend.single_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_batch_outage_falls_back_to_per_item_signing() {
    let app = TestApp::spawn().await;
    let docs = (0..5)
        .map(|i| document(&format!("doc-{i}.pdf"), None, None))
        .collect();
    app.backend.add_link(bundle_record("tok", "Big", docs));
    app.backend.fail_batch.store(true, Ordering::SeqCst);

    let sid = grant(&app, "tok").await;
    let response = app.contents("tok", &sid, "").await;
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["data"]["content"]["documents"].as_array().unwrap().len(),
        5
    );
    // One per-item request per document; the outage never reaches the viewer.
    assert_eq!(app.backend.single_calls.load(Ordering::SeqCst), 5);
}

#[tokio::test]
async fn test_folder_selection_filters_and_metadata() {
    let app = TestApp::spawn().await;
    let root_id = uuid::Uuid::new_v4();
    let sub_id = uuid::Uuid::new_v4();
    app.backend.set_folder_contents(
        "tok",
        FolderContents {
            root_folder: folder(root_id, None, "Data room"),
            folders: vec![folder(sub_id, Some(root_id), "Financials")],
            documents: vec![
                document("overview.pdf", Some("application/pdf"), Some(root_id)),
                document("q1.xlsx", None, Some(sub_id)),
                document("q2.xlsx", None, Some(sub_id)),
            ],
        },
    );
    let mut record = folder_record("tok", root_id);
    record.link.access_level = docroom_entity::AccessLevel::ViewOnly;
    app.backend.add_link(record);

    let sid = grant(&app, "tok").await;

    // Root selection shows all three documents.
    let response = app.contents("tok", &sid, "").await;
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["data"]["content"]["documents"].as_array().unwrap().len(),
        3
    );
    // The presentation layer needs the access level to suppress downloads.
    assert_eq!(body["data"]["access"]["access_level"], "view_only");

    // Subfolder selection narrows to its two documents.
    let response = app
        .contents("tok", &sid, &format!("?folder={sub_id}"))
        .await;
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["data"]["content"]["documents"].as_array().unwrap().len(),
        2
    );
    assert_eq!(body["data"]["content"]["selected_folder"], sub_id.to_string());

    // Name filtering applies on top of the selection.
    let response = app.contents("tok", &sid, "?q=overview").await;
    let body: serde_json::Value = response.json().await.unwrap();
    let docs = body["data"]["content"]["documents"].as_array().unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["file_name"], "overview.pdf");
}

#[tokio::test]
async fn test_empty_folder_is_a_terminal_no_documents_screen() {
    let app = TestApp::spawn().await;
    let root_id = uuid::Uuid::new_v4();
    app.backend.set_folder_contents(
        "tok",
        FolderContents {
            root_folder: folder(root_id, None, "Empty room"),
            folders: vec![],
            documents: vec![],
        },
    );
    app.backend.add_link(folder_record("tok", root_id));

    let sid = grant(&app, "tok").await;
    let response = app.contents("tok", &sid, "").await;
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "NO_DOCUMENTS");
}

#[tokio::test]
async fn test_repeat_views_are_served_from_cache() {
    let app = TestApp::spawn().await;
    app.backend
        .add_link(document_record_for_cache("tok"));

    let sid = grant(&app, "tok").await;
    let first = app.contents("tok", &sid, "").await;
    assert_eq!(first.status(), reqwest::StatusCode::OK);
    let second = app.contents("tok", &sid, "").await;
    assert_eq!(second.status(), reqwest::StatusCode::OK);

    // The second render hits the URL cache: still exactly one exchange.
    assert_eq!(app.backend.batch_calls.load(Ordering::SeqCst), 1);
}

fn document_record_for_cache(token: &str) -> docroom_entity::LinkRecord {
    helpers::document_record(token, document("cached.pdf", Some("application/pdf"), None))
}
