pub mod error;
pub mod info_window;
pub mod list;
pub mod map;
pub mod modal;
pub mod search_form;

pub use error::error_page;
pub use info_window::{current_location_window, info_window};
pub use list::{empty_state, list_error, list_item, list_panel, loading};
pub use map::map_container;
pub use modal::detail_modal;
pub use search_form::{alerts, search_form};
