use crate::domain::{LatLng, LatLngBounds};
use crate::map::provider::{
    InfoWindowHandle, InfoWindowOptions, MapControl, MapError, MapProvider, MarkerHandle,
    MarkerOptions,
};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct HeadlessWindow {
    pub options: InfoWindowOptions,
    pub anchor: Option<MarkerHandle>,
}

/// In-memory map widget. The page server embeds its state for a client-side
/// renderer; tests inspect it directly.
#[derive(Debug)]
pub struct HeadlessMap {
    unavailable: Option<String>,
    created: bool,
    center: Option<LatLng>,
    level: Option<u8>,
    bounds: Option<LatLngBounds>,
    controls: Vec<MapControl>,
    markers: BTreeMap<MarkerHandle, MarkerOptions>,
    windows: BTreeMap<InfoWindowHandle, HeadlessWindow>,
    next_handle: u64,
}

impl Default for HeadlessMap {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessMap {
    pub fn new() -> Self {
        Self {
            unavailable: None,
            created: false,
            center: None,
            level: None,
            bounds: None,
            controls: Vec::new(),
            markers: BTreeMap::new(),
            windows: BTreeMap::new(),
            next_handle: 1,
        }
    }

    /// A provider whose `create_map` always fails, like a page where the
    /// vendor script never loaded.
    pub fn unavailable(reason: &str) -> Self {
        Self {
            unavailable: Some(reason.to_string()),
            ..Self::new()
        }
    }

    fn next(&mut self) -> u64 {
        let handle = self.next_handle;
        self.next_handle += 1;
        handle
    }

    pub fn is_created(&self) -> bool {
        self.created
    }

    pub fn center(&self) -> Option<LatLng> {
        self.center
    }

    pub fn level(&self) -> Option<u8> {
        self.level
    }

    pub fn bounds(&self) -> Option<LatLngBounds> {
        self.bounds
    }

    pub fn controls(&self) -> &[MapControl] {
        &self.controls
    }

    pub fn markers(&self) -> &BTreeMap<MarkerHandle, MarkerOptions> {
        &self.markers
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    pub fn window(&self, handle: InfoWindowHandle) -> Option<&HeadlessWindow> {
        self.windows.get(&handle)
    }

    pub fn open_windows(&self) -> Vec<InfoWindowHandle> {
        self.windows
            .iter()
            .filter(|(_, w)| w.anchor.is_some())
            .map(|(h, _)| *h)
            .collect()
    }
}

impl MapProvider for HeadlessMap {
    fn create_map(&mut self, center: LatLng, level: u8) -> Result<(), MapError> {
        if let Some(reason) = &self.unavailable {
            return Err(MapError::Unavailable(reason.clone()));
        }
        self.created = true;
        self.center = Some(center);
        self.level = Some(level);
        Ok(())
    }

    fn add_control(&mut self, control: MapControl) -> Result<(), MapError> {
        if !self.created {
            return Err(MapError::Control("map not created".into()));
        }
        self.controls.push(control);
        Ok(())
    }

    fn add_marker(&mut self, options: MarkerOptions) -> MarkerHandle {
        let handle = MarkerHandle(self.next());
        self.markers.insert(handle, options);
        handle
    }

    fn remove_marker(&mut self, marker: MarkerHandle) {
        self.markers.remove(&marker);
        // An info window cannot stay anchored to a marker that is gone.
        for window in self.windows.values_mut() {
            if window.anchor == Some(marker) {
                window.anchor = None;
            }
        }
    }

    fn add_info_window(&mut self, options: InfoWindowOptions) -> InfoWindowHandle {
        let handle = InfoWindowHandle(self.next());
        self.windows.insert(
            handle,
            HeadlessWindow {
                options,
                anchor: None,
            },
        );
        handle
    }

    fn open_info_window(&mut self, window: InfoWindowHandle, anchor: MarkerHandle) {
        if !self.markers.contains_key(&anchor) {
            return;
        }
        if let Some(w) = self.windows.get_mut(&window) {
            w.anchor = Some(anchor);
        }
    }

    fn close_info_window(&mut self, window: InfoWindowHandle) {
        if let Some(w) = self.windows.get_mut(&window) {
            w.anchor = None;
        }
    }

    fn remove_info_window(&mut self, window: InfoWindowHandle) {
        self.windows.remove(&window);
    }

    fn set_center(&mut self, center: LatLng) {
        self.center = Some(center);
        self.bounds = None;
    }

    fn set_level(&mut self, level: u8) {
        self.level = Some(level);
    }

    fn set_bounds(&mut self, bounds: LatLngBounds) {
        self.center = Some(bounds.center());
        self.bounds = Some(bounds);
    }
}
