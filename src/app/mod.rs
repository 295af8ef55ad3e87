pub mod dispatch;

use crate::map::{MapProvider, MapView};
use crate::page::{Document, ElementId, EventRegistry, UiAction};
use crate::store::ListingStore;
use crate::templates::pages::{home_page, HomeVm};
use dispatch::{Completion, Dispatcher};
use maud::Markup;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// How long a page request waits for in-flight work before rendering.
pub const DEFAULT_RENDER_WAIT: Duration = Duration::from_millis(1500);

/// Application root. Owns both components, the page and the listener table;
/// every user event and every finished request goes through here.
pub struct App<P: MapProvider> {
    map: MapView<P>,
    store: ListingStore,
    document: Document,
    events: EventRegistry,
    dispatcher: Dispatcher,
    render_wait: Duration,
}

impl<P: MapProvider> App<P> {
    pub fn new(map: MapView<P>, store: ListingStore, dispatcher: Dispatcher) -> Self {
        Self {
            map,
            store,
            document: Document::new(),
            events: EventRegistry::new(),
            dispatcher,
            render_wait: DEFAULT_RENDER_WAIT,
        }
    }

    pub fn with_render_wait(mut self, render_wait: Duration) -> Self {
        self.render_wait = render_wait;
        self
    }

    pub fn render_wait(&self) -> Duration {
        self.render_wait
    }

    /// Brings the map up and starts the initial load.
    pub fn start(&mut self) {
        self.map.initialize(&mut self.document, &self.dispatcher);
        self.dispatch(UiAction::LoadAll);
    }

    /// Routes a click through the listener table. Returns `false` when no
    /// listener is attached to `element`.
    pub fn click(&mut self, element: ElementId) -> bool {
        let Some(action) = self.events.action_for(element).cloned() else {
            debug!(?element, "click on element without listener");
            return false;
        };
        self.dispatch(action);
        true
    }

    pub fn dispatch(&mut self, action: UiAction) {
        debug!(?action, "dispatch");

        match action {
            UiAction::LoadAll => {
                self.store
                    .load_all(&mut self.document, &mut self.events, &self.dispatcher);
            }
            UiAction::Search(criteria) => {
                self.store.search(
                    criteria,
                    &mut self.document,
                    &mut self.events,
                    &self.dispatcher,
                );
            }
            UiAction::Select(id) => {
                self.store.select(id, &mut self.document, &mut self.map);
            }
            UiAction::ShowDetail(id) => {
                self.store.show_detail(id, &self.dispatcher);
            }
            UiAction::MarkerClicked(marker) => {
                if let Some(id) = self.map.on_marker_click(marker) {
                    if self.document.highlight(id) {
                        self.document.scroll_into_view(id);
                    }
                }
            }
            UiAction::CloseModal => {
                self.document.close_modal();
                self.events.unregister(ElementId::ModalClose);
                self.events.unregister(ElementId::ModalBackdrop);
            }
        }
    }

    fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::Listings {
                generation,
                kind,
                result,
            } => {
                self.store.apply_listings(
                    generation,
                    kind,
                    result,
                    &mut self.document,
                    &mut self.map,
                    &mut self.events,
                );
            }
            Completion::Detail { id, result } => {
                self.store
                    .apply_detail(id, result, &mut self.document, &mut self.events);
            }
            Completion::Position { session, result } => {
                self.map.apply_position(session, result, &mut self.events);
            }
        }
    }

    /// Applies whatever has finished without waiting. Returns how many
    /// completions were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(completion) = self.dispatcher.try_next() {
            self.apply(completion);
            applied += 1;
        }
        applied
    }

    /// Waits for the next completion and applies it.
    #[cfg(test)]
    pub fn wait_one(&mut self) -> bool {
        match self.dispatcher.next_blocking() {
            Some(completion) => {
                self.apply(completion);
                true
            }
            None => false,
        }
    }

    /// Waits until nothing is in flight. Requests have no timeout, so this
    /// blocks as long as the slowest one.
    #[cfg(test)]
    pub fn settle(&mut self) -> usize {
        let mut applied = 0;
        while self.wait_one() {
            applied += 1;
        }
        applied
    }

    /// Applies completions until nothing is in flight or `budget` runs out.
    /// Work still running afterwards stays pending; its loading state is
    /// what the next render shows.
    pub fn settle_within(&mut self, budget: Duration) -> usize {
        let deadline = Instant::now() + budget;
        let mut applied = 0;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            match self.dispatcher.next_within(remaining) {
                Some(completion) => {
                    self.apply(completion);
                    applied += 1;
                }
                None => break,
            }
        }

        applied + self.pump()
    }

    pub fn shutdown(&mut self) {
        self.map.teardown(&mut self.events);
        info!("app shut down");
    }

    /// Renders the full page and consumes pending alerts.
    pub fn render_page(&mut self) -> Markup {
        let alerts = self.document.take_alerts();
        let snapshot = self.map.snapshot();
        let open_listing = snapshot.open_listing.and_then(|id| self.store.find(id));

        home_page(&HomeVm {
            document: &self.document,
            map: snapshot,
            open_listing,
            filters: self.store.current_filters(),
            alerts,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn map(&self) -> &MapView<P> {
        &self.map
    }

    pub fn store(&self) -> &ListingStore {
        &self.store
    }

    pub fn events(&self) -> &EventRegistry {
        &self.events
    }

    pub fn pending(&self) -> usize {
        self.dispatcher.pending()
    }
}
