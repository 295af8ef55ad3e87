use crate::domain::Listing;
use serde::Deserialize;

// The backend answers collection requests either with a bare array or with a
// Spring `Page`:
//
// page
//  ├── content        <- the listings
//  ├── totalElements
//  ├── totalPages
//  └── number

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListingCollection {
    Bare(Vec<Listing>),
    Paged {
        content: Vec<Listing>,
        #[serde(rename = "totalElements")]
        total_elements: Option<u64>,
    },
}

impl ListingCollection {
    pub fn into_listings(self) -> Vec<Listing> {
        match self {
            ListingCollection::Bare(listings) => listings,
            ListingCollection::Paged {
                content,
                total_elements,
            } => {
                if let Some(total) = total_elements {
                    if total > content.len() as u64 {
                        tracing::debug!(
                            received = content.len(),
                            total,
                            "backend returned a partial page"
                        );
                    }
                }
                content
            }
        }
    }
}
