use crate::router::handle;
use crate::tests::utils::{
    body_string, get, list_item_ids, listing, selected_ids, started_app, ApiCall, FakeApi,
};
use std::sync::{Arc, Mutex};

fn two_listings() -> Arc<FakeApi> {
    Arc::new(
        FakeApi::with_listings(vec![
            listing(1, Some((37.5, 127.0))),
            listing(2, Some((37.6, 127.1))),
        ])
        .search_returns(
            "type=studio&minPrice=1000&address=%EB%A7%88%ED%8F%AC",
            vec![listing(2, Some((37.6, 127.1)))],
        ),
    )
}

#[test]
fn search_form_submission_reaches_backend() {
    let api = two_listings();
    let app = Mutex::new(started_app(Arc::clone(&api)));

    let resp = handle(
        get("/search?type=studio&minPrice=1%2C000&maxPrice=&address=%EB%A7%88%ED%8F%AC"),
        &app,
    )
    .expect("Failed to handle request");

    assert_eq!(
        api.calls().last(),
        Some(&ApiCall::Search(
            "type=studio&minPrice=1000&address=%EB%A7%88%ED%8F%AC".into()
        ))
    );
    let body = body_string(resp);
    assert_eq!(list_item_ids(&body), vec!["2"]);
    assert!(body.contains(r#"value="마포""#));
}

#[test]
fn reload_fetches_everything_again() {
    let api = two_listings();
    let app = Mutex::new(started_app(Arc::clone(&api)));

    let body = body_string(handle(get("/reload"), &app).unwrap());

    assert_eq!(api.calls(), vec![ApiCall::FetchAll, ApiCall::FetchAll]);
    assert_eq!(list_item_ids(&body), vec!["1", "2"]);
}

#[test]
fn select_link_highlights_item() {
    let app = Mutex::new(started_app(two_listings()));

    handle(get("/select?id=1"), &app).unwrap();
    let body = body_string(handle(get("/select?id=2"), &app).unwrap());

    assert_eq!(selected_ids(&body), vec!["2"]);
}

#[test]
fn marker_link_opens_info_window() {
    let app = Mutex::new(started_app(two_listings()));
    let marker = app.lock().unwrap().map().marker_for(2).unwrap();

    let body = body_string(handle(get(&format!("/marker?handle={}", marker.0)), &app).unwrap());

    assert_eq!(selected_ids(&body), vec!["2"]);
    assert!(body.contains("map-info-window"));
    assert!(body.contains(r#"href="/detail?id=2""#));
}

#[test]
fn detail_and_close_round_trip() {
    let api = two_listings();
    let app = Mutex::new(started_app(Arc::clone(&api)));

    let body = body_string(handle(get("/detail?id=1"), &app).unwrap());
    assert_eq!(api.calls().last(), Some(&ApiCall::FetchOne(1)));
    assert!(body.contains(r#"role="dialog""#));

    let body = body_string(handle(get("/modal/close"), &app).unwrap());
    assert!(!body.contains(r#"role="dialog""#));
}

#[test]
fn clicks_on_missing_elements_are_ignored() {
    let api = two_listings();
    let app = Mutex::new(started_app(Arc::clone(&api)));

    let body = body_string(handle(get("/detail?id=42"), &app).unwrap());
    let body_after_close = body_string(handle(get("/modal/close"), &app).unwrap());

    assert_eq!(api.calls(), vec![ApiCall::FetchAll]);
    assert!(selected_ids(&body).is_empty());
    assert_eq!(list_item_ids(&body_after_close), vec!["1", "2"]);
}

#[test]
fn backdrop_click_also_closes_modal() {
    let app = Mutex::new(started_app(two_listings()));

    handle(get("/detail?id=2"), &app).unwrap();
    let body = body_string(handle(get("/modal/close?source=backdrop"), &app).unwrap());

    assert!(!body.contains(r#"role="dialog""#));
    assert!(app.lock().unwrap().document().modal().is_none());
}
