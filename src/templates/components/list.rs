use crate::domain::format::{
    area_label, floor_label, price_label, truncate_description, DESCRIPTION_BUDGET,
};
use crate::domain::{Listing, ListingId};
use crate::page::ListPanel;
use maud::{html, Markup};

pub fn list_panel(panel: &ListPanel, selected: Option<ListingId>) -> Markup {
    match panel {
        ListPanel::Idle => html! {},
        ListPanel::Loading => loading(),
        ListPanel::Error(message) => list_error(message),
        ListPanel::Empty => empty_state(),
        ListPanel::Items(listings) => html! {
            @for listing in listings {
                (list_item(listing, selected == Some(listing.id)))
            }
        },
    }
}

pub fn list_item(listing: &Listing, selected: bool) -> Markup {
    html! {
        div.property-item.selected[selected] data-property-id=(listing.id) {
            a class="property-link" href=(format!("/select?id={}", listing.id)) {
                div class="property-title" { (listing.title) }
                div class="property-price" { (price_label(listing.price)) }
                div class="property-address" { (listing.address) }

                div class="property-details" {
                    span class="property-type" { (listing.listing_type.label()) }
                    @if let Some(area) = listing.area {
                        span class="property-area text-xs text-gray-500 ml-2" { (area_label(area)) }
                    }
                    @if let Some(floor) = listing.floor {
                        span class="property-floor text-xs text-gray-500 ml-2" { (floor_label(floor, None)) }
                    }
                }

                @if let Some(description) = listing.description() {
                    div class="property-description text-sm text-gray-500 mt-2" {
                        (truncate_description(description, DESCRIPTION_BUDGET).into_owned())
                    }
                }
            }
        }
    }
}

pub fn empty_state() -> Markup {
    html! {
        div class="empty-state text-center p-10 text-gray-500" {
            div class="text-5xl mb-4" { "🏠" }
            div class="text-base mb-1" { "No listings match your search." }
            div class="text-sm" { "Try different filters." }
        }
    }
}

pub fn loading() -> Markup {
    html! {
        div class="loading" {
            div class="spinner" aria-hidden="true" {}
        }
    }
}

pub fn list_error(message: &str) -> Markup {
    html! {
        div class="list-error text-center p-10" style="color: #e74c3c;" {
            div class="text-5xl mb-4" { "⚠️" }
            div class="text-base" { (message) }
        }
    }
}
