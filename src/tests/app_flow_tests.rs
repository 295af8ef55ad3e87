use crate::domain::{FilterCriteria, LatLng};
use crate::map::{DeniedPosition, FixedPosition, HeadlessMap, DEFAULT_CENTER, FOCUS_LEVEL};
use crate::page::{ElementId, ListPanel, MapPanel, UiAction, MAP_UNAVAILABLE_MESSAGE};
use crate::store::{DETAIL_GONE_MESSAGE, LOAD_FAILED_MESSAGE, SEARCH_FAILED_MESSAGE};
use crate::tests::utils::{
    listing, list_item_ids, make_app_with, selected_ids, started_app, ApiCall, FakeApi,
};
use std::sync::Arc;

fn studio_criteria() -> FilterCriteria {
    FilterCriteria {
        listing_type: Some("studio".into()),
        ..FilterCriteria::default()
    }
}

#[test]
fn initial_load_places_markers_and_renders_list() {
    let api = Arc::new(FakeApi::with_listings(vec![listing(1, Some((37.5, 127.0)))]));
    let mut app = started_app(Arc::clone(&api));

    assert_eq!(api.calls(), vec![ApiCall::FetchAll]);
    assert_eq!(app.map().provider().marker_count(), 1);
    assert_eq!(app.map().viewport().center, LatLng::new(37.5, 127.0));
    assert_eq!(app.document().rendered_ids(), vec![1]);

    let html = app.render_page().into_string();
    assert!(html.contains(r#"data-property-id="1""#));
    assert_eq!(list_item_ids(&html), vec!["1"]);
}

#[test]
fn listing_without_coordinates_is_listed_but_not_mapped() {
    let api = Arc::new(FakeApi::with_listings(vec![
        listing(1, Some((37.55, 126.92))),
        listing(2, None),
    ]));
    let app = started_app(api);

    assert_eq!(app.document().rendered_ids(), vec![1, 2]);
    assert_eq!(app.map().entries().len(), 1);
    assert_eq!(app.map().marker_for(2), None);
}

#[test]
fn search_sends_only_present_filters() {
    let api = Arc::new(
        FakeApi::with_listings(vec![listing(1, Some((37.5, 127.0)))])
            .search_returns("type=studio", vec![listing(3, Some((37.6, 127.1)))]),
    );
    let mut app = started_app(Arc::clone(&api));

    app.dispatch(UiAction::Search(studio_criteria()));
    app.settle();

    assert_eq!(
        api.calls(),
        vec![ApiCall::FetchAll, ApiCall::Search("type=studio".into())]
    );
    assert_eq!(app.document().rendered_ids(), vec![3]);
    assert_eq!(app.store().all().len(), 1);
    assert_eq!(app.store().current_filters(), &studio_criteria());

    let html = app.render_page().into_string();
    let page = scraper::Html::parse_document(&html);
    let selector = scraper::Selector::parse("select[name=type] option[selected]").unwrap();
    let chosen: Vec<_> = page
        .select(&selector)
        .filter_map(|el| el.value().attr("value"))
        .collect();
    assert_eq!(chosen, vec!["studio"]);
}

#[test]
fn empty_search_hits_search_endpoint_without_query() {
    let api = Arc::new(FakeApi::with_listings(vec![]));
    let mut app = started_app(Arc::clone(&api));

    app.dispatch(UiAction::Search(FilterCriteria::default()));
    app.settle();

    assert_eq!(api.calls().last(), Some(&ApiCall::Search(String::new())));
    assert_eq!(app.document().list_panel(), &ListPanel::Empty);
    assert!(app.render_page().into_string().contains("No listings match"));
}

#[test]
fn selecting_unknown_listing_changes_nothing() {
    let api = Arc::new(FakeApi::with_listings(vec![listing(1, Some((37.5, 127.0)))]));
    let mut app = started_app(api);
    let before = app.map().viewport();

    assert!(!app.click(ElementId::ListItem(99)));
    app.dispatch(UiAction::Select(99));

    assert_eq!(app.document().selected(), None);
    assert_eq!(app.map().viewport(), before);
}

#[test]
fn only_last_selected_item_is_highlighted() {
    let api = Arc::new(FakeApi::with_listings(vec![
        listing(5, Some((37.51, 127.01))),
        listing(7, Some((37.57, 126.97))),
    ]));
    let mut app = started_app(api);

    assert!(app.click(ElementId::ListItem(5)));
    assert!(app.click(ElementId::ListItem(7)));

    let viewport = app.map().viewport();
    assert_eq!(viewport.center, LatLng::new(37.57, 126.97));
    assert_eq!(viewport.level, FOCUS_LEVEL);

    let html = app.render_page().into_string();
    assert_eq!(selected_ids(&html), vec!["7"]);
}

#[test]
fn selecting_listing_without_coordinates_only_highlights() {
    let api = Arc::new(FakeApi::with_listings(vec![
        listing(1, Some((37.5, 127.0))),
        listing(2, None),
    ]));
    let mut app = started_app(api);
    let before = app.map().viewport();

    assert!(app.click(ElementId::ListItem(2)));

    assert_eq!(app.document().selected(), Some(2));
    assert_eq!(app.map().viewport(), before);
}

#[test]
fn marker_click_opens_window_and_scrolls_list() {
    let api = Arc::new(FakeApi::with_listings(vec![
        listing(5, Some((37.51, 127.01))),
        listing(7, Some((37.57, 126.97))),
    ]));
    let mut app = started_app(api);

    let marker = app.map().marker_for(5).unwrap();
    assert!(app.click(ElementId::Marker(marker)));

    assert_eq!(app.document().selected(), Some(5));
    assert_eq!(app.document().scroll_target(), Some(5));
    assert_eq!(app.map().open_listing(), Some(5));
    assert_eq!(app.map().provider().open_windows().len(), 1);

    let other = app.map().marker_for(7).unwrap();
    app.click(ElementId::Marker(other));
    assert_eq!(app.map().provider().open_windows().len(), 1);

    let html = app.render_page().into_string();
    assert_eq!(selected_ids(&html), vec!["7"]);
    assert!(html.contains(r#"data-scroll-to="7""#));
    assert!(html.contains("map-info-window"));
}

#[test]
fn superseded_load_does_not_overwrite_search_results() {
    let (api, release) = FakeApi::with_listings(vec![
        listing(1, Some((37.5, 127.0))),
        listing(2, Some((37.6, 127.1))),
    ])
    .search_returns("type=studio", vec![listing(3, Some((37.55, 126.95)))])
    .gated_fetch_all();
    let api = Arc::new(api);

    let mut app = make_app_with(Arc::clone(&api), Arc::new(DeniedPosition), HeadlessMap::new());
    app.start();
    app.dispatch(UiAction::Search(studio_criteria()));

    // The initial load is still blocked; wait for the search to land.
    while app.document().rendered_ids() != vec![3] {
        assert!(app.wait_one());
    }

    release.send(()).unwrap();
    app.settle();

    assert_eq!(app.document().rendered_ids(), vec![3]);
    assert_eq!(app.map().entries().len(), 1);
    assert_eq!(app.map().entries()[0].listing_id, 3);
    assert!(app.store().all().is_empty());
    assert_eq!(app.pending(), 0);
    assert_eq!(app.pump(), 0);
}

#[test]
fn failed_load_shows_error_in_list() {
    let api = Arc::new(FakeApi::with_listings(vec![]).failing_fetch_all());
    let mut app = started_app(api);

    assert_eq!(
        app.document().list_panel(),
        &ListPanel::Error(LOAD_FAILED_MESSAGE.into())
    );
    assert!(app.render_page().into_string().contains(LOAD_FAILED_MESSAGE));
}

#[test]
fn failed_search_keeps_previous_markers() {
    let api = Arc::new(
        FakeApi::with_listings(vec![listing(1, Some((37.5, 127.0)))]).failing_search(),
    );
    let mut app = started_app(api);

    app.dispatch(UiAction::Search(studio_criteria()));
    app.settle();

    assert_eq!(
        app.document().list_panel(),
        &ListPanel::Error(SEARCH_FAILED_MESSAGE.into())
    );
    assert_eq!(app.map().entries().len(), 1);
    assert!(!app.events().is_registered(ElementId::ListItem(1)));
}

#[test]
fn detail_opens_modal_and_close_removes_it() {
    let api = Arc::new(FakeApi::with_listings(vec![listing(1, Some((37.5, 127.0)))]));
    let mut app = started_app(Arc::clone(&api));

    assert!(app.click(ElementId::InfoWindowDetail(1)));
    app.settle();

    assert_eq!(api.calls().last(), Some(&ApiCall::FetchOne(1)));
    assert_eq!(app.document().modal().map(|l| l.id), Some(1));
    assert!(app.events().is_registered(ElementId::ModalBackdrop));

    let html = app.render_page().into_string();
    assert!(html.contains("modal-backdrop"));
    assert!(html.contains("33㎡"));
    assert!(html.contains("3F / 15F"));
    assert!(html.contains("010-1234-5678"));

    assert!(app.click(ElementId::ModalClose));
    assert!(app.document().modal().is_none());
    assert!(!app.events().is_registered(ElementId::ModalClose));
    assert!(!app.events().is_registered(ElementId::ModalBackdrop));
    assert!(!app.render_page().into_string().contains("modal-backdrop"));
}

#[test]
fn missing_detail_raises_alert_once() {
    let api = Arc::new(
        FakeApi::with_listings(vec![])
            .search_returns("type=studio", vec![listing(9, Some((37.5, 127.0)))]),
    );
    let mut app = started_app(api);
    app.dispatch(UiAction::Search(studio_criteria()));
    app.settle();

    assert!(app.click(ElementId::InfoWindowDetail(9)));
    app.settle();

    assert!(app.document().modal().is_none());
    assert!(app.render_page().into_string().contains(DETAIL_GONE_MESSAGE));
    assert!(!app.render_page().into_string().contains(DETAIL_GONE_MESSAGE));
}

#[test]
fn unavailable_map_shows_message_and_still_lists() {
    let api = Arc::new(FakeApi::with_listings(vec![listing(1, Some((37.5, 127.0)))]));
    let mut app = make_app_with(
        api,
        Arc::new(DeniedPosition),
        HeadlessMap::unavailable("vendor script blocked"),
    );
    app.start();
    app.settle();

    assert_eq!(
        app.document().map_panel(),
        &MapPanel::Error(MAP_UNAVAILABLE_MESSAGE.into())
    );
    assert_eq!(app.document().rendered_ids(), vec![1]);
    assert_eq!(app.map().provider().marker_count(), 0);
    assert!(app.render_page().into_string().contains(MAP_UNAVAILABLE_MESSAGE));
}

#[test]
fn device_position_recenters_and_marks_location() {
    let here = LatLng::new(37.5563, 126.9236);
    let api = Arc::new(FakeApi::with_listings(vec![]));
    let mut app = make_app_with(api, Arc::new(FixedPosition(here)), HeadlessMap::new());
    app.start();
    app.settle();

    assert_eq!(app.map().snapshot().current_location, Some(here));
    assert_eq!(app.map().provider().center(), Some(here));
    assert_eq!(app.map().provider().marker_count(), 1);
}

#[test]
fn denied_position_keeps_default_center() {
    let api = Arc::new(FakeApi::with_listings(vec![]));
    let app = started_app(api);

    assert_eq!(app.map().provider().center(), Some(DEFAULT_CENTER));
    assert_eq!(app.map().snapshot().current_location, None);
}

#[test]
fn position_after_shutdown_is_ignored() {
    let api = Arc::new(FakeApi::with_listings(vec![]));
    let mut app = make_app_with(
        api,
        Arc::new(FixedPosition(LatLng::new(37.5563, 126.9236))),
        HeadlessMap::new(),
    );
    app.start();
    app.shutdown();
    app.settle();

    assert!(!app.map().is_ready());
    assert_eq!(app.map().snapshot().current_location, None);
    assert_eq!(app.map().provider().marker_count(), 0);
}

#[test]
fn current_location_window_closes_listing_window() {
    let api = Arc::new(FakeApi::with_listings(vec![listing(1, Some((37.5, 127.0)))]));
    let mut app = make_app_with(
        api,
        Arc::new(FixedPosition(LatLng::new(37.5563, 126.9236))),
        HeadlessMap::new(),
    );
    app.start();
    app.settle();

    let listing_marker = app.map().marker_for(1).unwrap();
    let location_marker = app
        .map()
        .provider()
        .markers()
        .iter()
        .find(|(_, options)| options.title.as_deref() == Some("Current location"))
        .map(|(handle, _)| *handle)
        .unwrap();

    assert!(app.click(ElementId::Marker(listing_marker)));
    assert!(app.click(ElementId::Marker(location_marker)));
    assert_eq!(app.map().provider().open_windows().len(), 1);
    assert_eq!(app.map().open_listing(), None);

    assert!(app.click(ElementId::Marker(listing_marker)));
    assert_eq!(app.map().provider().open_windows().len(), 1);
    assert_eq!(app.map().open_listing(), Some(1));
}
