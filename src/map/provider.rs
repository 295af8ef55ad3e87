use crate::domain::{LatLng, LatLngBounds};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MarkerHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct InfoWindowHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ControlPosition {
    Right,
    TopRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MapControl {
    Zoom(ControlPosition),
    MapType(ControlPosition),
}

/// Icon drawn for a marker; `offset` is the anchor inside the image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerImage {
    pub src: String,
    pub width: u32,
    pub height: u32,
    pub offset: (u32, u32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerOptions {
    pub position: LatLng,
    pub image: MarkerImage,
    pub clickable: bool,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfoWindowOptions {
    pub content: String,
    pub removable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("map provider unavailable: {0}")]
    Unavailable(String),
    #[error("map control rejected: {0}")]
    Control(String),
}

/// Map widget capability. Implementations wrap a vendor SDK or, like
/// `HeadlessMap`, keep the state in memory.
///
/// Handles are only meaningful to the provider that issued them.
pub trait MapProvider: Send {
    fn create_map(&mut self, center: LatLng, level: u8) -> Result<(), MapError>;
    fn add_control(&mut self, control: MapControl) -> Result<(), MapError>;

    fn add_marker(&mut self, options: MarkerOptions) -> MarkerHandle;
    fn remove_marker(&mut self, marker: MarkerHandle);

    fn add_info_window(&mut self, options: InfoWindowOptions) -> InfoWindowHandle;
    fn open_info_window(&mut self, window: InfoWindowHandle, anchor: MarkerHandle);
    fn close_info_window(&mut self, window: InfoWindowHandle);
    fn remove_info_window(&mut self, window: InfoWindowHandle);

    fn set_center(&mut self, center: LatLng);
    fn set_level(&mut self, level: u8);
    /// Moves the viewport so that `bounds` is fully visible.
    fn set_bounds(&mut self, bounds: LatLngBounds);
}
