pub mod filter;
pub mod format;
pub mod geo;
pub mod listing;

pub use filter::{CriteriaError, FilterCriteria};
pub use geo::{LatLng, LatLngBounds};
pub use listing::{DataError, Listing, ListingId, ListingType};
