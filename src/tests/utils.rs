use crate::api::{FetchError, ListingApi};
use crate::app::dispatch::Dispatcher;
use crate::app::App;
use crate::domain::{Listing, ListingId, ListingType};
use crate::map::{DeniedPosition, HeadlessMap, MapView, PositionSource, DEFAULT_CENTER};
use crate::store::ListingStore;
use astra::Body;
use http::{Method, Request};
use std::collections::HashMap;
use std::io::Read;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    FetchAll,
    Search(String),
    FetchOne(ListingId),
}

/// Canned backend. Every call is recorded; `fetch_all` can be held back
/// until the test releases it.
#[derive(Default)]
pub struct FakeApi {
    listings: Vec<Listing>,
    searches: HashMap<String, Vec<Listing>>,
    fail_fetch_all: bool,
    fail_search: bool,
    fetch_all_gate: Mutex<Option<Receiver<()>>>,
    calls: Mutex<Vec<ApiCall>>,
}

impl FakeApi {
    pub fn with_listings(listings: Vec<Listing>) -> Self {
        Self {
            listings,
            ..Self::default()
        }
    }

    pub fn search_returns(mut self, query: &str, listings: Vec<Listing>) -> Self {
        self.searches.insert(query.to_string(), listings);
        self
    }

    pub fn failing_fetch_all(mut self) -> Self {
        self.fail_fetch_all = true;
        self
    }

    pub fn failing_search(mut self) -> Self {
        self.fail_search = true;
        self
    }

    /// The first `fetch_all` blocks until the returned sender fires.
    pub fn gated_fetch_all(self) -> (Self, Sender<()>) {
        let (tx, rx) = channel();
        *self.fetch_all_gate.lock().unwrap() = Some(rx);
        (self, tx)
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ListingApi for FakeApi {
    fn fetch_all(&self) -> Result<Vec<Listing>, FetchError> {
        self.record(ApiCall::FetchAll);

        let gate = self.fetch_all_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.recv();
        }

        if self.fail_fetch_all {
            return Err(FetchError::Status {
                status: 500,
                reason: "Internal Server Error".into(),
            });
        }
        Ok(self.listings.clone())
    }

    fn search(&self, query: &str) -> Result<Vec<Listing>, FetchError> {
        self.record(ApiCall::Search(query.to_string()));

        if self.fail_search {
            return Err(FetchError::Transport("connection refused".into()));
        }
        Ok(self.searches.get(query).cloned().unwrap_or_default())
    }

    fn fetch_one(&self, id: ListingId) -> Result<Listing, FetchError> {
        self.record(ApiCall::FetchOne(id));

        self.listings
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or(FetchError::Status {
                status: 404,
                reason: "Not Found".into(),
            })
    }
}

pub fn listing(id: ListingId, coords: Option<(f64, f64)>) -> Listing {
    Listing {
        id,
        title: format!("Listing {id}"),
        price: 15_000,
        address: "서울 마포구".into(),
        listing_type: ListingType::Studio,
        latitude: coords.map(|c| c.0),
        longitude: coords.map(|c| c.1),
        area: Some(33.0),
        floor: Some(3),
        total_floor: Some(15),
        description: Some("Bright corner unit near the station".into()),
        contact_name: Some("Kim".into()),
        contact_phone: Some("010-1234-5678".into()),
    }
}

/// App wired to `api`, not yet started.
pub fn make_app_with(
    api: Arc<FakeApi>,
    positions: Arc<dyn PositionSource>,
    map: HeadlessMap,
) -> App<HeadlessMap> {
    let dispatcher = Dispatcher::new(api, positions);
    App::new(MapView::new(map, DEFAULT_CENTER), ListingStore::new(), dispatcher)
}

/// Started app with every initial request applied.
pub fn started_app(api: Arc<FakeApi>) -> App<HeadlessMap> {
    let mut app = make_app_with(api, Arc::new(DeniedPosition), HeadlessMap::new());
    app.start();
    app.settle();
    app
}

pub fn get(uri: &str) -> astra::Request {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn body_string(resp: astra::Response) -> String {
    let mut body = String::new();
    resp.into_body()
        .reader()
        .read_to_string(&mut body)
        .unwrap();
    body
}

pub fn selected_ids(html: &str) -> Vec<String> {
    let document = scraper::Html::parse_document(html);
    let selector = scraper::Selector::parse(".property-item.selected").unwrap();
    document
        .select(&selector)
        .filter_map(|el| el.value().attr("data-property-id"))
        .map(str::to_string)
        .collect()
}

pub fn list_item_ids(html: &str) -> Vec<String> {
    let document = scraper::Html::parse_document(html);
    let selector = scraper::Selector::parse(".property-item").unwrap();
    document
        .select(&selector)
        .filter_map(|el| el.value().attr("data-property-id"))
        .map(str::to_string)
        .collect()
}
