use crate::domain::format::{area_label, floor_label, price_label};
use crate::domain::Listing;
use maud::{html, Markup};

/// Full record of one listing. Clicking the backdrop or the close button
/// dismisses it.
pub fn detail_modal(listing: &Listing) -> Markup {
    html! {
        div class="modal-backdrop" id="modal-backdrop" data-close-href="/modal/close?source=backdrop"
            style="position:fixed; inset:0; background:rgba(0,0,0,0.7); z-index:1000; display:flex; align-items:center; justify-content:center;"
        {
            div class="modal" role="dialog" aria-modal="true" data-property-id=(listing.id)
                style="background:white; padding:30px; border-radius:10px; max-width:500px; width:90%;"
            {
                h2 class="mb-5" { (listing.title) }

                (field("Price", html! { (price_label(listing.price)) }))
                (field("Address", html! { (listing.address) }))
                (field("Type", html! { (listing.listing_type.label()) }))

                @if let Some(area) = listing.area {
                    (field("Area", html! { (area_label(area)) }))
                }
                @if let Some(floor) = listing.floor {
                    (field("Floor", html! { (floor_label(floor, listing.total_floor)) }))
                }
                @if let Some(name) = &listing.contact_name {
                    (field("Contact", html! {
                        (name)
                        @if let Some(phone) = &listing.contact_phone {
                            " (" (phone) ")"
                        }
                    }))
                }
                @if let Some(description) = listing.description() {
                    div class="modal-description mb-5" {
                        strong { "Description:" }
                        br;
                        div style="margin-top:5px; line-height:1.5;" { (description) }
                    }
                }

                a class="modal-close btn" id="modal-close" href="/modal/close" { "Close" }
            }
        }
    }
}

fn field(label: &str, value: Markup) -> Markup {
    html! {
        div class="modal-field mb-4" {
            strong { (label) ":" } " " (value)
        }
    }
}
