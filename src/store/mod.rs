mod listing_store;

pub use listing_store::{
    ListingStore, DETAIL_FAILED_MESSAGE, DETAIL_GONE_MESSAGE, LOAD_FAILED_MESSAGE,
    SEARCH_FAILED_MESSAGE,
};
