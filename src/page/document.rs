// src/page/document.rs

use crate::domain::{Listing, ListingId};
use crate::templates::components;
use maud::Markup;

pub const MAP_CONTAINER_ID: &str = "map";
pub const LIST_CONTAINER_ID: &str = "propertyList";

pub const MAP_UNAVAILABLE_MESSAGE: &str = "The map could not be loaded.";

#[derive(Debug, Clone, PartialEq)]
pub enum MapPanel {
    Pending,
    Live,
    /// Static message replacing the map surface.
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListPanel {
    Idle,
    Loading,
    Error(String),
    Empty,
    Items(Vec<Listing>),
}

/// Page state: the map container, the list container, the modal slot and
/// pending alerts.
#[derive(Debug)]
pub struct Document {
    map_panel: MapPanel,
    list_panel: ListPanel,
    selected: Option<ListingId>,
    scroll_target: Option<ListingId>,
    modal: Option<Listing>,
    alerts: Vec<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            map_panel: MapPanel::Pending,
            list_panel: ListPanel::Idle,
            selected: None,
            scroll_target: None,
            modal: None,
            alerts: Vec::new(),
        }
    }

    // === Map container ===

    pub fn show_map(&mut self) {
        self.map_panel = MapPanel::Live;
    }

    pub fn show_map_error(&mut self, message: &str) {
        self.map_panel = MapPanel::Error(message.to_string());
    }

    pub fn map_panel(&self) -> &MapPanel {
        &self.map_panel
    }

    // === List container ===

    pub fn show_list_loading(&mut self) {
        self.replace_list(ListPanel::Loading);
    }

    pub fn show_list_error(&mut self, message: &str) {
        self.replace_list(ListPanel::Error(message.to_string()));
    }

    /// Replaces the list contents. The old item elements are gone, so is
    /// their highlight.
    pub fn render_listings(&mut self, listings: &[Listing]) {
        let panel = if listings.is_empty() {
            ListPanel::Empty
        } else {
            ListPanel::Items(listings.to_vec())
        };
        self.replace_list(panel);
    }

    fn replace_list(&mut self, panel: ListPanel) {
        self.list_panel = panel;
        self.selected = None;
        self.scroll_target = None;
    }

    pub fn list_panel(&self) -> &ListPanel {
        &self.list_panel
    }

    /// Ids carrying a `data-property-id` attribute, in render order.
    pub fn rendered_ids(&self) -> Vec<ListingId> {
        match &self.list_panel {
            ListPanel::Items(items) => items.iter().map(|l| l.id).collect(),
            _ => Vec::new(),
        }
    }

    /// Clears every highlight, then marks the item for `id` when it is
    /// rendered. Returns whether an item is now highlighted.
    pub fn highlight(&mut self, id: ListingId) -> bool {
        self.selected = None;
        if self.rendered_ids().contains(&id) {
            self.selected = Some(id);
        }
        self.selected.is_some()
    }

    pub fn scroll_into_view(&mut self, id: ListingId) {
        if self.selected == Some(id) {
            self.scroll_target = Some(id);
        }
    }

    pub fn selected(&self) -> Option<ListingId> {
        self.selected
    }

    pub fn scroll_target(&self) -> Option<ListingId> {
        self.scroll_target
    }

    pub fn list_markup(&self) -> Markup {
        components::list_panel(&self.list_panel, self.selected)
    }

    // === Modal and alerts ===

    pub fn open_modal(&mut self, listing: Listing) {
        self.modal = Some(listing);
    }

    pub fn close_modal(&mut self) -> bool {
        self.modal.take().is_some()
    }

    pub fn modal(&self) -> Option<&Listing> {
        self.modal.as_ref()
    }

    /// Blocking alert; shown once on the next render.
    pub fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    #[cfg(test)]
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }
}
