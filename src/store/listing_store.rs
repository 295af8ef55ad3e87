// src/store/listing_store.rs

use crate::api::FetchError;
use crate::app::dispatch::{Dispatcher, Generation, LoadKind, RequestGeneration};
use crate::domain::{FilterCriteria, Listing, ListingId};
use crate::map::{MapProvider, MapView};
use crate::page::{Document, ElementId, EventRegistry, UiAction};
use tracing::{debug, error, info, warn};

pub const LOAD_FAILED_MESSAGE: &str = "Listings could not be loaded.";
pub const SEARCH_FAILED_MESSAGE: &str = "Something went wrong while searching listings.";
pub const DETAIL_FAILED_MESSAGE: &str = "Listing details could not be loaded.";
pub const DETAIL_GONE_MESSAGE: &str = "This listing is no longer available.";

fn clear_list_listeners(events: &mut EventRegistry) {
    events.unregister_where(|el| matches!(el, ElementId::ListItem(_)));
}

fn show_loading(document: &mut Document, events: &mut EventRegistry) {
    clear_list_listeners(events);
    document.show_list_loading();
}

/// Fetched listings plus the subset currently shown in list and map.
#[derive(Debug, Default)]
pub struct ListingStore {
    all: Vec<Listing>,
    filtered: Vec<Listing>,
    current_filters: FilterCriteria,
    generation: RequestGeneration,
}

impl ListingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_all(
        &mut self,
        document: &mut Document,
        events: &mut EventRegistry,
        dispatcher: &Dispatcher,
    ) -> Generation {
        show_loading(document, events);
        let generation = self.generation.issue();
        dispatcher.fetch_all(generation);
        debug!(generation, "loading all listings");
        generation
    }

    pub fn search(
        &mut self,
        criteria: FilterCriteria,
        document: &mut Document,
        events: &mut EventRegistry,
        dispatcher: &Dispatcher,
    ) -> Generation {
        show_loading(document, events);
        let query = criteria.to_query_string();
        self.current_filters = criteria;

        let generation = self.generation.issue();
        debug!(generation, %query, "searching listings");
        dispatcher.search(generation, query);
        generation
    }

    /// Applies a collection response. Returns `false` when the response
    /// belongs to a request that has since been superseded.
    pub fn apply_listings<P: MapProvider>(
        &mut self,
        generation: Generation,
        kind: LoadKind,
        result: Result<Vec<Listing>, FetchError>,
        document: &mut Document,
        map: &mut MapView<P>,
        events: &mut EventRegistry,
    ) -> bool {
        if !self.generation.is_current(generation) {
            debug!(
                generation,
                latest = self.generation.latest(),
                "dropping stale listing response"
            );
            return false;
        }

        let listings = match result {
            Ok(listings) => listings,
            Err(e) => {
                let message = match kind {
                    LoadKind::All => LOAD_FAILED_MESSAGE,
                    LoadKind::Search => SEARCH_FAILED_MESSAGE,
                };
                error!(error = %e, ?kind, "listing request failed");
                clear_list_listeners(events);
                document.show_list_error(message);
                return true;
            }
        };

        match kind {
            LoadKind::All => {
                info!(count = listings.len(), "loaded listings");
                self.all = listings.clone();
                self.filtered = listings;
            }
            LoadKind::Search => {
                info!(
                    count = listings.len(),
                    loaded = self.all.len(),
                    "search matched listings"
                );
                self.filtered = listings;
            }
        }

        self.render_list(document, events);
        map.set_markers(&self.filtered, events);
        true
    }

    fn render_list(&self, document: &mut Document, events: &mut EventRegistry) {
        clear_list_listeners(events);
        document.render_listings(&self.filtered);

        for listing in &self.filtered {
            events.register(ElementId::ListItem(listing.id), UiAction::Select(listing.id));
        }
    }

    /// Recenters the map on an already loaded listing and highlights its
    /// list entry. Unknown ids change nothing.
    pub fn select<P: MapProvider>(
        &self,
        id: ListingId,
        document: &mut Document,
        map: &mut MapView<P>,
    ) -> bool {
        let Some(listing) = self.find(id) else {
            warn!(listing_id = id, "selected listing not found");
            return false;
        };

        if let Ok(position) = listing.position() {
            map.focus(position.lat, position.lng);
        }
        document.highlight(id);

        debug!(listing_id = id, title = %listing.title, "listing selected");
        true
    }

    pub fn show_detail(&self, id: ListingId, dispatcher: &Dispatcher) {
        debug!(listing_id = id, "fetching listing detail");
        dispatcher.fetch_detail(id);
    }

    pub fn apply_detail(
        &self,
        id: ListingId,
        result: Result<Listing, FetchError>,
        document: &mut Document,
        events: &mut EventRegistry,
    ) -> bool {
        match result {
            Ok(listing) => {
                document.open_modal(listing);
                events.register(ElementId::ModalClose, UiAction::CloseModal);
                events.register(ElementId::ModalBackdrop, UiAction::CloseModal);
                true
            }
            Err(e) => {
                error!(listing_id = id, error = %e, "listing detail failed");
                let message = if e.is_not_found() {
                    DETAIL_GONE_MESSAGE
                } else {
                    DETAIL_FAILED_MESSAGE
                };
                document.alert(message);
                false
            }
        }
    }

    pub fn find(&self, id: ListingId) -> Option<&Listing> {
        self.filtered.iter().find(|l| l.id == id)
    }

    #[cfg(test)]
    pub fn all(&self) -> &[Listing] {
        &self.all
    }

    pub fn current_filters(&self) -> &FilterCriteria {
        &self.current_filters
    }
}
