use crate::domain::format::price_label;
use crate::domain::Listing;
use maud::{html, Markup};

/// Summary shown when a listing marker is clicked.
pub fn info_window(listing: &Listing) -> Markup {
    html! {
        div class="info-window" style="padding:10px; width:250px;" {
            div style="font-weight:bold; margin-bottom:5px;" { (listing.title) }
            div style="color:#e74c3c; font-weight:bold; margin-bottom:5px;" {
                (price_label(listing.price))
            }
            div style="color:#666; margin-bottom:5px;" { (listing.address) }
            div style="margin-bottom:10px;" {
                span class="badge" style="background:#3498db; color:white; padding:2px 6px; border-radius:3px; font-size:12px;" {
                    (listing.listing_type.label())
                }
            }
            a class="info-detail"
                href=(format!("/detail?id={}", listing.id))
                data-property-id=(listing.id)
                style="background:#3498db; color:white; padding:5px 10px; border-radius:3px;"
            {
                "Details"
            }
        }
    }
}

pub fn current_location_window() -> Markup {
    html! {
        div style="padding:5px;" { "Current location" }
    }
}
