// templates/pages/home.rs

use crate::domain::{FilterCriteria, Listing};
use crate::map::MapSnapshot;
use crate::page::{Document, LIST_CONTAINER_ID};
use crate::templates::{components, desktop_layout};
use maud::{html, Markup};

pub struct HomeVm<'a> {
    pub document: &'a Document,
    pub map: MapSnapshot,
    pub open_listing: Option<&'a Listing>,
    pub filters: &'a FilterCriteria,
    pub alerts: Vec<String>,
}

pub fn home_page(vm: &HomeVm) -> Markup {
    let open_window = vm.open_listing.map(components::info_window);

    desktop_layout(
        "Listings",
        html! {
            main class="container" {
                (components::alerts(&vm.alerts))
                (components::search_form(vm.filters))

                div class="map-and-list flex gap-4" {
                    (components::map_container(vm.document.map_panel(), &vm.map, open_window))

                    div id=(LIST_CONTAINER_ID)
                        class="property-list"
                        data-scroll-to=[vm.document.scroll_target()]
                    {
                        (vm.document.list_markup())
                    }
                }

                @if let Some(listing) = vm.document.modal() {
                    (components::detail_modal(listing))
                }
            }
        },
    )
}
