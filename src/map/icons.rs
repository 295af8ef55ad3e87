use crate::domain::ListingType;
use crate::map::provider::MarkerImage;

const LISTING_ICON_SIZE: u32 = 32;
const CURRENT_LOCATION_ICON_SIZE: u32 = 24;

/// Anchors the image at its bottom-center so the pin tip sits on the point.
fn marker_image(src: &str, width: u32, height: u32) -> MarkerImage {
    MarkerImage {
        src: src.to_string(),
        width,
        height,
        offset: (width / 2, height),
    }
}

pub fn listing_icon(kind: &ListingType) -> MarkerImage {
    let src = match kind {
        ListingType::Apartment => "/images/marker-apartment.png",
        ListingType::Studio | ListingType::TwoRoom => "/images/marker-room.png",
        ListingType::Officetel => "/images/marker-officetel.png",
        ListingType::Other(_) => "/images/marker-default.png",
    };
    marker_image(src, LISTING_ICON_SIZE, LISTING_ICON_SIZE)
}

pub fn current_location_icon() -> MarkerImage {
    marker_image(
        "/images/current-location.png",
        CURRENT_LOCATION_ICON_SIZE,
        CURRENT_LOCATION_ICON_SIZE,
    )
}
