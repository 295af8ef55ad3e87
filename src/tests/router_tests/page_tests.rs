use crate::errors::ServerError;
use crate::router::handle;
use crate::map::{DeniedPosition, HeadlessMap};
use crate::tests::utils::{
    body_string, get, list_item_ids, listing, make_app_with, started_app, FakeApi,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[test]
fn home_page_lists_loaded_listings() {
    let api = Arc::new(FakeApi::with_listings(vec![
        listing(1, Some((37.5, 127.0))),
        listing(2, None),
    ]));
    let app = Mutex::new(started_app(api));

    let resp = handle(get("/"), &app).expect("Failed to handle request");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("<!DOCTYPE html>"));
    assert!(body.contains(r#"id="propertyList""#));
    assert!(body.contains(r#"id="map-state""#));
    assert_eq!(list_item_ids(&body), vec!["1", "2"]);
}

#[test]
fn health_check_is_plain_text() {
    let app = Mutex::new(started_app(Arc::new(FakeApi::with_listings(vec![]))));

    let resp = handle(get("/healthz"), &app).expect("Failed to handle request");
    assert_eq!(resp.status(), 200);
    assert_eq!(body_string(resp), "ok");
}

#[test]
fn unknown_path_is_not_found() {
    let app = Mutex::new(started_app(Arc::new(FakeApi::with_listings(vec![]))));

    let err = handle(get("/api/nope"), &app).unwrap_err();
    assert!(matches!(err, ServerError::NotFound));
}

#[test]
fn non_numeric_id_is_bad_request() {
    let app = Mutex::new(started_app(Arc::new(FakeApi::with_listings(vec![]))));

    let err = handle(get("/select?id=abc"), &app).unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));

    let err = handle(get("/detail"), &app).unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));
}

#[test]
fn invalid_price_filter_is_bad_request() {
    let app = Mutex::new(started_app(Arc::new(FakeApi::with_listings(vec![]))));

    let err = handle(get("/search?minPrice=cheap"), &app).unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));
}

#[test]
fn hung_load_still_renders_loading_state() {
    let (api, release) =
        FakeApi::with_listings(vec![listing(1, Some((37.5, 127.0)))]).gated_fetch_all();
    let mut app = make_app_with(Arc::new(api), Arc::new(DeniedPosition), HeadlessMap::new())
        .with_render_wait(Duration::from_millis(50));
    app.start();
    let app = Mutex::new(app);

    let body = body_string(handle(get("/"), &app).expect("Failed to handle request"));
    assert!(body.contains(r#"class="loading""#));
    assert!(list_item_ids(&body).is_empty());
    assert!(app.lock().unwrap().pending() >= 1);

    release.send(()).unwrap();
    app.lock().unwrap().settle();

    let body = body_string(handle(get("/"), &app).unwrap());
    assert_eq!(list_item_ids(&body), vec!["1"]);
}
