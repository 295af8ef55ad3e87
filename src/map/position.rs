use crate::domain::LatLng;
use thiserror::Error;

/// Identifies one initialization of a `MapView`. Position results for any
/// other session are dropped.
pub type Session = u64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("position permission denied")]
    Denied,
    #[error("position unavailable: {0}")]
    Unavailable(String),
}

/// Geolocation-like source of the device position. May block.
pub trait PositionSource: Send + Sync {
    fn current_position(&self) -> Result<LatLng, PositionError>;
}

/// Asks for the device position in the background; the result is handed
/// back to `MapView::apply_position` with the same session.
pub trait PositionRequest {
    fn request_position(&self, session: Session);
}

/// A device that always reports the same point.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub LatLng);

impl PositionSource for FixedPosition {
    fn current_position(&self) -> Result<LatLng, PositionError> {
        Ok(self.0)
    }
}

/// A device whose user declined to share the position.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedPosition;

impl PositionSource for DeniedPosition {
    fn current_position(&self) -> Result<LatLng, PositionError> {
        Err(PositionError::Denied)
    }
}
