use crate::map::MapSnapshot;
use crate::page::{MapPanel, MAP_CONTAINER_ID};
use maud::{html, Markup, PreEscaped};

/// JSON embedded in a `<script>` must not be able to close the tag.
fn script_safe_json(snapshot: &MapSnapshot) -> String {
    serde_json::to_string(snapshot)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/")
}

/// The map container. A live map carries its state as JSON for the
/// client-side widget plus plain links so it stays usable without script.
pub fn map_container(panel: &MapPanel, snapshot: &MapSnapshot, open_window: Option<Markup>) -> Markup {
    html! {
        div id=(MAP_CONTAINER_ID) class="map" {
            @match panel {
                MapPanel::Error(message) => {
                    (map_error(message))
                }
                MapPanel::Pending => {
                    div class="map-pending" {}
                }
                MapPanel::Live => {
                    script type="application/json" id="map-state" {
                        (PreEscaped(script_safe_json(snapshot)))
                    }
                    noscript {
                        ul class="map-markers" {
                            @for marker in &snapshot.markers {
                                li {
                                    a href=(format!("/marker?handle={}", marker.marker.0))
                                        data-property-id=(marker.listing_id)
                                    {
                                        "Marker " (marker.listing_id)
                                        (format!(" ({}, {})", marker.position.lat, marker.position.lng))
                                    }
                                }
                            }
                        }
                    }
                    @if let Some(window) = open_window {
                        div class="map-info-window" { (window) }
                    }
                }
            }
        }
    }
}

pub fn map_error(message: &str) -> Markup {
    html! {
        div class="map-error" style="display:flex; align-items:center; justify-content:center; height:100%; color:#666;" {
            div style="text-align:center;" {
                div style="font-size:48px; margin-bottom:10px;" { "⚠️" }
                div { (message) }
            }
        }
    }
}
