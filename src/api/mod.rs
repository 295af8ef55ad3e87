mod api_error;
mod client;
mod models;

pub use api_error::FetchError;
pub use client::{HttpListingApi, ListingApi};
