//! Initial map position from the device location.

use polymap_core::Coordinate;
use polymap_settings::MapSettings;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeolocationState {
    /// Waiting on the platform (or on a permission prompt).
    Loading,
    Resolved(Coordinate),
    /// Denied, unsupported, or failed.
    Unavailable,
}

/// Source of the device location.
pub trait GeolocationProvider {
    fn state(&self) -> GeolocationState;
}

/// Provider returning a fixed state, for the CLI and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub GeolocationState);

impl GeolocationProvider for FixedLocation {
    fn state(&self) -> GeolocationState {
        self.0
    }
}

/// Center and zoom the map opens with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapCamera {
    pub center: Coordinate,
    pub zoom: u8,
}

/// The resolved location, or the configured fallback center.
pub fn initial_center(state: GeolocationState, settings: &MapSettings) -> Coordinate {
    match state {
        GeolocationState::Resolved(at) if at.is_valid() => at,
        GeolocationState::Resolved(at) => {
            tracing::warn!("Ignoring invalid device location {}", at);
            settings.fallback_center
        }
        GeolocationState::Loading | GeolocationState::Unavailable => settings.fallback_center,
    }
}

/// Camera for the map, or `None` while the location is still loading.
pub fn initial_camera<P>(provider: &P, settings: &MapSettings) -> Option<MapCamera>
where
    P: GeolocationProvider + ?Sized,
{
    match provider.state() {
        GeolocationState::Loading => None,
        state => Some(MapCamera {
            center: initial_center(state, settings),
            zoom: settings.default_zoom,
        }),
    }
}
