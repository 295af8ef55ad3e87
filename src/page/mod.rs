pub mod document;
pub mod events;

pub use document::{
    Document, ListPanel, MapPanel, LIST_CONTAINER_ID, MAP_CONTAINER_ID, MAP_UNAVAILABLE_MESSAGE,
};
pub use events::{ElementId, EventRegistry, UiAction};
