// src/map/view.rs

use crate::domain::{LatLng, LatLngBounds, Listing, ListingId};
use crate::map::icons;
use crate::map::position::{PositionError, PositionRequest, Session};
use crate::map::provider::{
    ControlPosition, InfoWindowHandle, InfoWindowOptions, MapControl, MapError, MapProvider,
    MarkerHandle, MarkerOptions,
};
use crate::page::{Document, ElementId, EventRegistry, UiAction, MAP_UNAVAILABLE_MESSAGE};
use crate::templates::components;
use serde::Serialize;
use tracing::{debug, error, info, warn};

/// Seoul City Hall.
pub const DEFAULT_CENTER: LatLng = LatLng::new(37.5665, 126.9780);
pub const DEFAULT_LEVEL: u8 = 3;
/// Zoom used when jumping to a single listing.
pub const FOCUS_LEVEL: u8 = 2;

/// One placed listing: its marker, its info window and where it sits.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerEntry {
    pub listing_id: ListingId,
    pub marker: MarkerHandle,
    pub info_window: InfoWindowHandle,
    pub position: LatLng,
    pub icon: String,
}

#[derive(Debug, Clone, Copy)]
struct CurrentLocation {
    marker: MarkerHandle,
    info_window: InfoWindowHandle,
    position: LatLng,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub center: LatLng,
    pub level: u8,
    pub bounds: Option<LatLngBounds>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkerSnapshot {
    pub listing_id: ListingId,
    pub marker: MarkerHandle,
    pub position: LatLng,
    pub icon: String,
}

/// What a client-side map widget needs to redraw the current view.
#[derive(Debug, Clone, Serialize)]
pub struct MapSnapshot {
    pub ready: bool,
    pub viewport: Viewport,
    pub markers: Vec<MarkerSnapshot>,
    pub open_listing: Option<ListingId>,
    pub current_location: Option<LatLng>,
}

pub struct MapView<P: MapProvider> {
    provider: P,
    default_center: LatLng,
    session: Session,
    ready: bool,
    alive: bool,
    entries: Vec<MarkerEntry>,
    current_location: Option<CurrentLocation>,
    open_listing: Option<ListingId>,
    viewport: Viewport,
}

impl<P: MapProvider> MapView<P> {
    pub fn new(provider: P, default_center: LatLng) -> Self {
        Self {
            provider,
            default_center,
            session: 0,
            ready: false,
            alive: true,
            entries: Vec::new(),
            current_location: None,
            open_listing: None,
            viewport: Viewport {
                center: default_center,
                level: DEFAULT_LEVEL,
                bounds: None,
            },
        }
    }

    /// Creates the map with its controls and asks for the device position.
    /// A failure replaces the map container with a static message; it is
    /// never returned to the caller.
    pub fn initialize<R>(&mut self, document: &mut Document, positions: &R) -> bool
    where
        R: PositionRequest + ?Sized,
    {
        self.session += 1;
        self.alive = true;

        match self.create() {
            Ok(()) => {
                self.ready = true;
                document.show_map();
                positions.request_position(self.session);
                info!(session = self.session, "map initialized");
                true
            }
            Err(e) => {
                self.ready = false;
                error!(error = %e, "map initialization failed");
                document.show_map_error(MAP_UNAVAILABLE_MESSAGE);
                false
            }
        }
    }

    fn create(&mut self) -> Result<(), MapError> {
        self.provider.create_map(self.default_center, DEFAULT_LEVEL)?;
        self.provider
            .add_control(MapControl::Zoom(ControlPosition::Right))?;
        self.provider
            .add_control(MapControl::MapType(ControlPosition::TopRight))?;

        self.viewport = Viewport {
            center: self.default_center,
            level: DEFAULT_LEVEL,
            bounds: None,
        };
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.ready && self.alive
    }

    /// Applies the answer to `request_position`. Answers for another
    /// session, or arriving after `teardown`, are dropped.
    pub fn apply_position(
        &mut self,
        session: Session,
        result: Result<LatLng, PositionError>,
        events: &mut EventRegistry,
    ) -> bool {
        if !self.is_active() || session != self.session {
            debug!(
                session,
                current = self.session,
                "dropping position for an inactive map"
            );
            return false;
        }

        match result {
            Ok(position) => {
                self.provider.set_center(position);
                self.viewport.center = position;
                self.viewport.bounds = None;
                self.place_current_location(position, events);
                true
            }
            Err(e) => {
                warn!(error = %e, "device position unavailable, keeping default center");
                false
            }
        }
    }

    fn place_current_location(&mut self, position: LatLng, events: &mut EventRegistry) {
        self.remove_current_location(events);

        let marker = self.provider.add_marker(MarkerOptions {
            position,
            image: icons::current_location_icon(),
            clickable: true,
            title: Some("Current location".to_string()),
        });
        let info_window = self.provider.add_info_window(InfoWindowOptions {
            content: components::current_location_window().into_string(),
            removable: false,
        });

        events.register(ElementId::Marker(marker), UiAction::MarkerClicked(marker));
        self.current_location = Some(CurrentLocation {
            marker,
            info_window,
            position,
        });
    }

    fn remove_current_location(&mut self, events: &mut EventRegistry) {
        if let Some(current) = self.current_location.take() {
            self.provider.close_info_window(current.info_window);
            self.provider.remove_info_window(current.info_window);
            self.provider.remove_marker(current.marker);
            events.unregister(ElementId::Marker(current.marker));
        }
    }

    /// Replaces every listing marker. Listings without usable coordinates
    /// are skipped with a warning. Returns the number of markers placed.
    pub fn set_markers(&mut self, listings: &[Listing], events: &mut EventRegistry) -> usize {
        self.clear_markers(events);

        if !self.is_active() {
            warn!(count = listings.len(), "map not available, markers not drawn");
            return 0;
        }

        for listing in listings {
            match listing.position() {
                Ok(position) => self.place_marker(listing, position, events),
                Err(e) => warn!(listing_id = listing.id, error = %e, "skipping marker"),
            }
        }

        self.fit_bounds();
        debug!(placed = self.entries.len(), "markers drawn");
        self.entries.len()
    }

    fn place_marker(&mut self, listing: &Listing, position: LatLng, events: &mut EventRegistry) {
        let image = icons::listing_icon(&listing.listing_type);
        let icon = image.src.clone();

        let marker = self.provider.add_marker(MarkerOptions {
            position,
            image,
            clickable: true,
            title: Some(listing.title.clone()),
        });
        let info_window = self.provider.add_info_window(InfoWindowOptions {
            content: components::info_window(listing).into_string(),
            removable: true,
        });

        events.register(ElementId::Marker(marker), UiAction::MarkerClicked(marker));
        events.register(
            ElementId::InfoWindowDetail(listing.id),
            UiAction::ShowDetail(listing.id),
        );

        self.entries.push(MarkerEntry {
            listing_id: listing.id,
            marker,
            info_window,
            position,
            icon,
        });
    }

    /// Releases every listing marker and info window, then empties the
    /// tracking collection.
    pub fn clear_markers(&mut self, events: &mut EventRegistry) {
        for entry in self.entries.drain(..) {
            self.provider.close_info_window(entry.info_window);
            self.provider.remove_info_window(entry.info_window);
            self.provider.remove_marker(entry.marker);
            events.unregister(ElementId::Marker(entry.marker));
            events.unregister(ElementId::InfoWindowDetail(entry.listing_id));
        }
        self.open_listing = None;
    }

    pub fn close_all_info_windows(&mut self) {
        for entry in &self.entries {
            self.provider.close_info_window(entry.info_window);
        }
        if let Some(current) = self.current_location {
            self.provider.close_info_window(current.info_window);
        }
        self.open_listing = None;
    }

    fn fit_bounds(&mut self) {
        let Some(bounds) = LatLngBounds::from_points(self.entries.iter().map(|e| e.position))
        else {
            return;
        };

        self.provider.set_bounds(bounds);
        self.viewport.center = bounds.center();
        self.viewport.bounds = Some(bounds);
    }

    /// Opens the clicked marker's info window (closing any other) and
    /// returns the listing whose list entry should be highlighted.
    pub fn on_marker_click(&mut self, marker: MarkerHandle) -> Option<ListingId> {
        if let Some(current) = self.current_location {
            if current.marker == marker {
                self.close_all_info_windows();
                self.provider
                    .open_info_window(current.info_window, current.marker);
                return None;
            }
        }

        let entry = self.entries.iter().find(|e| e.marker == marker).cloned()?;

        self.close_all_info_windows();
        self.provider.open_info_window(entry.info_window, entry.marker);
        self.open_listing = Some(entry.listing_id);
        Some(entry.listing_id)
    }

    /// Recenters on a point at the close-in zoom level.
    pub fn focus(&mut self, lat: f64, lng: f64) -> bool {
        if !self.is_active() {
            return false;
        }

        let center = LatLng::new(lat, lng);
        self.provider.set_center(center);
        self.provider.set_level(FOCUS_LEVEL);
        self.viewport = Viewport {
            center,
            level: FOCUS_LEVEL,
            bounds: None,
        };
        true
    }

    pub fn teardown(&mut self, events: &mut EventRegistry) {
        self.clear_markers(events);
        self.remove_current_location(events);
        self.alive = false;
        self.ready = false;
        info!(session = self.session, "map torn down");
    }

    pub fn snapshot(&self) -> MapSnapshot {
        MapSnapshot {
            ready: self.is_active(),
            viewport: self.viewport,
            markers: self
                .entries
                .iter()
                .map(|e| MarkerSnapshot {
                    listing_id: e.listing_id,
                    marker: e.marker,
                    position: e.position,
                    icon: e.icon.clone(),
                })
                .collect(),
            open_listing: self.open_listing,
            current_location: self.current_location.map(|c| c.position),
        }
    }

    pub fn entries(&self) -> &[MarkerEntry] {
        &self.entries
    }

    pub fn marker_for(&self, id: ListingId) -> Option<MarkerHandle> {
        self.entries
            .iter()
            .find(|e| e.listing_id == id)
            .map(|e| e.marker)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn open_listing(&self) -> Option<ListingId> {
        self.open_listing
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn is_ready(&self) -> bool {
        self.is_active()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}
