mod common;

use axum::http::StatusCode;
use common::{parse_body, workshop_payload, TestApp};
use serde_json::json;
use std::time::Duration;

async fn create(app: &TestApp, cookie: &str) -> String {
    let event = parse_body(app.request("POST", "/api/v1/events", Some(cookie), Some(workshop_payload())).await).await;
    event["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_rapid_edits_are_saved_once_with_latest_text() {
    let app = TestApp::new().await;
    let cookie = app.login().await;
    let id = create(&app, &cookie).await;
    let uri = format!("/api/v1/events/{}/content", id);

    for (i, text) in ["T", "Te", "Texto final"].iter().enumerate() {
        let res = app.request("PUT", &uri, Some(&cookie), Some(json!({ "summary": text, "article": text }))).await;
        assert_eq!(res.status(), StatusCode::ACCEPTED);
        assert_eq!(parse_body(res).await["generation"], (i + 1) as u64);
    }

    let before = app.state.event_store.get(&id).await.unwrap().unwrap();
    assert_ne!(before.generated.summary, "Texto final");

    tokio::time::sleep(Duration::from_millis(300)).await;

    let after = app.state.event_store.get(&id).await.unwrap().unwrap();
    assert_eq!(after.generated.summary, "Texto final");
    assert_eq!(after.generated.article, "Texto final");
    assert!(after.updated_at > before.updated_at);
}

#[tokio::test]
async fn test_regenerate_requires_confirmation() {
    let app = TestApp::new().await;
    let cookie = app.login().await;
    let id = create(&app, &cookie).await;

    app.request("PUT", &format!("/api/v1/events/{}/content", id), Some(&cookie), Some(json!({ "summary": "editado", "article": "editado" }))).await;
    tokio::time::sleep(Duration::from_millis(300)).await;

    let uri = format!("/api/v1/events/{}/regenerate", id);
    let res = app.request("POST", &uri, Some(&cookie), Some(json!({}))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let res = app.request("POST", &uri, Some(&cookie), Some(json!({ "confirm": false }))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.state.event_store.get(&id).await.unwrap().unwrap().generated.summary, "editado");

    let res = app.request("POST", &uri, Some(&cookie), Some(json!({ "confirm": true }))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let event = parse_body(res).await;
    assert!(event["generated"]["summary"].as_str().unwrap().starts_with("Comunicado:"));
}

#[tokio::test]
async fn test_regenerate_discards_pending_edit() {
    let app = TestApp::new().await;
    let cookie = app.login().await;
    let id = create(&app, &cookie).await;

    let res = app.request("PUT", &format!("/api/v1/events/{}/content", id), Some(&cookie), Some(json!({ "summary": "editado", "article": "editado" }))).await;
    assert_eq!(res.status(), StatusCode::ACCEPTED);

    let res = app.request("POST", &format!("/api/v1/events/{}/regenerate", id), Some(&cookie), Some(json!({ "confirm": true }))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let regenerated = parse_body(res).await["generated"]["summary"].as_str().unwrap().to_string();
    assert!(regenerated.starts_with("Comunicado:"));

    tokio::time::sleep(Duration::from_millis(300)).await;

    let stored = app.state.event_store.get(&id).await.unwrap().unwrap();
    assert_eq!(stored.generated.summary, regenerated);
    assert_eq!(app.state.autosave.pending(), 0);
}

#[tokio::test]
async fn test_publishing_a_draft_generates_content() {
    let app = TestApp::new().await;
    let cookie = app.login().await;

    let draft = parse_body(app.request("POST", "/api/v1/events/drafts", Some(&cookie), Some(json!({
        "title": "Rodada de Negócios",
        "date": "2024-05-20",
        "comoQuanto": ["rodada com 40 empresas"],
        "porQue": ["ampliar vendas"]
    }))).await).await;
    let uri = format!("/api/v1/events/{}/status", draft["id"].as_str().unwrap());

    let res = app.request("PUT", &uri, Some(&cookie), Some(json!({ "status": "Publicado" }))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let event = parse_body(res).await;
    assert_eq!(event["status"], "Publicado");
    assert!(event["generated"]["summary"].as_str().unwrap().contains("rodada com 40 empresas"));

    let res = app.request("PUT", &uri, Some(&cookie), Some(json!({ "status": "Destaque" }))).await;
    assert_eq!(parse_body(res).await["status"], "Destaque");
}

#[tokio::test]
async fn test_incomplete_draft_cannot_be_published() {
    let app = TestApp::new().await;
    let cookie = app.login().await;

    let draft = parse_body(app.request("POST", "/api/v1/events/drafts", Some(&cookie), Some(json!({ "title": "Incompleto" }))).await).await;
    let id = draft["id"].as_str().unwrap();

    let res = app.request("PUT", &format!("/api/v1/events/{}/status", id), Some(&cookie), Some(json!({ "status": "Publicado" }))).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = parse_body(res).await;
    assert!(body["fields"].get("porQue").is_some());

    let stored = app.state.event_store.get(id).await.unwrap().unwrap();
    assert_eq!(stored.generated.summary, "");
}

#[tokio::test]
async fn test_cover_update_reaches_remote_row() {
    let app = TestApp::new().await;
    let cookie = app.login().await;
    let id = create(&app, &cookie).await;
    let uri = format!("/api/v1/events/{}/cover", id);

    let res = app.request("PUT", &uri, Some(&cookie), Some(json!({}))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.request("PUT", &uri, Some(&cookie), Some(json!({ "coverBase64": "data:image/jpeg;base64,aGVsbG8=" }))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let event = parse_body(res).await;
    let expected = format!("https://files.test/capa-{}.jpeg", id);
    assert_eq!(event["coverUrl"], expected.as_str());
    assert!(event.get("coverBase64").is_none());

    let rows = app.remote.rows.lock().unwrap().clone();
    assert_eq!(rows[0].photos.as_ref().unwrap()[0].url, expected);
}

#[tokio::test]
async fn test_remote_only_event_is_imported_on_edit() {
    let app = TestApp::new().await;
    let cookie = app.login().await;
    create(&app, &cookie).await;

    let res = app.request("PUT", "/api/v1/events/1000/status", Some(&cookie), Some(json!({ "status": "Destaque" }))).await;
    assert_eq!(res.status(), StatusCode::OK);

    let imported = app.state.event_store.get("1000").await.unwrap().unwrap();
    assert_eq!(imported.remote_row_id, Some(1000));
    assert!(!imported.generated.is_empty());
}

#[tokio::test]
async fn test_prompt_describes_event() {
    let app = TestApp::new().await;
    let cookie = app.login().await;
    let id = create(&app, &cookie).await;

    let body = parse_body(app.request("GET", &format!("/api/v1/events/{}/prompt", id), Some(&cookie), None).await).await;
    let prompt = body["prompt"].as_str().unwrap();
    assert!(prompt.contains("Evento: Workshop"));
    assert!(prompt.contains("- Tom: institucional"));
    assert!(prompt.contains("- Incluir CTA: Não"));
}
