// src/domain/listing.rs

use crate::domain::geo::LatLng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub type ListingId = i64;

/// Category of a listing. The backend sends Korean labels, the search form
/// sends English slugs; both map onto the same variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ListingType {
    Apartment,
    Studio,
    TwoRoom,
    Officetel,
    Other(String),
}

impl ListingType {
    pub fn from_slug(raw: &str) -> Self {
        Self::from(raw.to_string())
    }

    /// Value used on the wire and in query strings.
    pub fn as_slug(&self) -> &str {
        match self {
            ListingType::Apartment => "apartment",
            ListingType::Studio => "studio",
            ListingType::TwoRoom => "two_room",
            ListingType::Officetel => "officetel",
            ListingType::Other(raw) => raw,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ListingType::Apartment => "Apartment",
            ListingType::Studio => "Studio",
            ListingType::TwoRoom => "Two-room",
            ListingType::Officetel => "Officetel",
            ListingType::Other(raw) => raw,
        }
    }

    /// Types offered by the search form, in display order.
    pub const SEARCHABLE: [ListingType; 4] = [
        ListingType::Apartment,
        ListingType::Studio,
        ListingType::TwoRoom,
        ListingType::Officetel,
    ];
}

impl From<String> for ListingType {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "apartment" | "아파트" => ListingType::Apartment,
            "studio" | "one_room" | "원룸" => ListingType::Studio,
            "two_room" | "tworoom" | "투룸" => ListingType::TwoRoom,
            "officetel" | "오피스텔" => ListingType::Officetel,
            _ => ListingType::Other(raw),
        }
    }
}

impl From<ListingType> for String {
    fn from(kind: ListingType) -> Self {
        match kind {
            ListingType::Other(raw) => raw,
            known => known.as_slug().to_string(),
        }
    }
}

impl fmt::Display for ListingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One property record as served by `/api/properties`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: ListingId,
    pub title: String,
    /// Major units (10,000 KRW).
    pub price: i64,
    pub address: String,
    #[serde(rename = "type", alias = "propertyType")]
    pub listing_type: ListingType,

    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_floor: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
}

/// A record that cannot be placed on the map.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    #[error("listing {id} has no coordinates")]
    MissingCoordinates { id: ListingId },
    #[error("listing {id} has unusable coordinates ({lat}, {lng})")]
    InvalidCoordinates { id: ListingId, lat: f64, lng: f64 },
}

impl Listing {
    pub fn position(&self) -> Result<LatLng, DataError> {
        let (lat, lng) = match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => (lat, lng),
            _ => return Err(DataError::MissingCoordinates { id: self.id }),
        };

        LatLng::checked(lat, lng).ok_or(DataError::InvalidCoordinates {
            id: self.id,
            lat,
            lng,
        })
    }

    #[cfg(test)]
    pub fn has_position(&self) -> bool {
        self.position().is_ok()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.trim().is_empty())
    }
}
