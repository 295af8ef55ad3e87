// src/domain/filter.rs

use thiserror::Error;
use url::form_urlencoded;

/// User supplied search constraints. A missing field, a blank string or a
/// zero price all mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub listing_type: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CriteriaError {
    #[error("{field} must be a whole number, got {value:?}")]
    InvalidPrice { field: &'static str, value: String },
}

fn present_text(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn present_price(value: Option<i64>) -> Option<i64> {
    value.filter(|p| *p != 0)
}

impl FilterCriteria {
    /// True when no field would end up in the query string.
    pub fn is_empty(&self) -> bool {
        present_text(&self.listing_type).is_none()
            && present_price(self.min_price).is_none()
            && present_price(self.max_price).is_none()
            && present_text(&self.address).is_none()
    }

    /// Form-urlencoded query for `/api/properties/search`, present fields
    /// only, in the order `type, minPrice, maxPrice, address`.
    pub fn to_query_string(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());

        if let Some(kind) = present_text(&self.listing_type) {
            query.append_pair("type", kind);
        }
        if let Some(min) = present_price(self.min_price) {
            query.append_pair("minPrice", &min.to_string());
        }
        if let Some(max) = present_price(self.max_price) {
            query.append_pair("maxPrice", &max.to_string());
        }
        if let Some(address) = present_text(&self.address) {
            query.append_pair("address", address);
        }

        query.finish()
    }

    /// Reads criteria back from a submitted search form. Unknown keys are
    /// ignored; blank values become `None`.
    pub fn from_form(query: &str) -> Result<Self, CriteriaError> {
        let mut criteria = FilterCriteria::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            match key.as_ref() {
                "type" => criteria.listing_type = Some(value.to_string()),
                "minPrice" => criteria.min_price = Some(parse_price("minPrice", value)?),
                "maxPrice" => criteria.max_price = Some(parse_price("maxPrice", value)?),
                "address" => criteria.address = Some(value.to_string()),
                _ => {}
            }
        }

        Ok(criteria)
    }
}

fn parse_price(field: &'static str, value: &str) -> Result<i64, CriteriaError> {
    value
        .replace(',', "")
        .parse()
        .map_err(|_| CriteriaError::InvalidPrice {
            field,
            value: value.to_string(),
        })
}
