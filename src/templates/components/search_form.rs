use crate::domain::{FilterCriteria, ListingType};
use maud::{html, Markup};

pub fn search_form(current: &FilterCriteria) -> Markup {
    let current_type = current.listing_type.as_deref().map(ListingType::from_slug);

    html! {
        form class="search-form flex items-center gap-2" method="get" action="/search" {
            label class="sr-only" for="type" { "Type" }
            select name="type" id="type" {
                option value="" selected[current_type.is_none()] { "All types" }
                @for kind in &ListingType::SEARCHABLE {
                    option value=(kind.as_slug()) selected[current_type.as_ref() == Some(kind)] {
                        (kind.label())
                    }
                }
            }

            label class="sr-only" for="minPrice" { "Minimum price" }
            input type="number" id="minPrice" name="minPrice" placeholder="Min price"
                value=[current.min_price];

            label class="sr-only" for="maxPrice" { "Maximum price" }
            input type="number" id="maxPrice" name="maxPrice" placeholder="Max price"
                value=[current.max_price];

            label class="sr-only" for="address" { "Address" }
            input type="text" id="address" name="address" placeholder="Address"
                value=[current.address.as_deref()];

            button type="submit" class="primary" { "Search" }
            a class="btn" href="/reload" { "Show all" }
        }
    }
}

pub fn alerts(messages: &[String]) -> Markup {
    html! {
        @for message in messages {
            div class="alert" role="alert" { (message) }
        }
    }
}
