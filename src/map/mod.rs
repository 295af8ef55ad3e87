mod headless;
mod icons;
mod position;
mod provider;
mod view;

pub use headless::HeadlessMap;
pub use position::{
    DeniedPosition, FixedPosition, PositionError, PositionRequest, PositionSource, Session,
};
pub use provider::{
    ControlPosition, InfoWindowHandle, InfoWindowOptions, MapControl, MapError, MapProvider,
    MarkerHandle, MarkerOptions,
};
pub use view::{MapSnapshot, MapView, MarkerEntry, Viewport, DEFAULT_CENTER, FOCUS_LEVEL};
