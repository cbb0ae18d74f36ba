//! Drawing primitives for the draggable calibration markers.
//!
//! Every control works in canvas pixels: positions handed to these types are
//! already converted from the relative image space by the caller.
pub mod horizon_control;
pub mod origin_control;
pub mod principal_point_control;

use iced::{Color, Point};

pub use horizon_control::HorizonControl;
pub use origin_control::OriginControl;
pub use principal_point_control::PrincipalPointControl;

/// Radius in pixels around a handle centre that still counts as a grab.
pub const GRAB_RADIUS: f32 = 10.0;

pub const HANDLE_RADIUS: f32 = 5.0;

pub fn is_grabbed(handle: Point, cursor: Point) -> bool {
    cursor.distance(handle) < GRAB_RADIUS
}

pub(crate) fn handle_color(selected: bool) -> Color {
    if selected {
        Color::from_rgba(0.8, 0.8, 0.2, 0.9)
    } else {
        Color::from_rgba(0.8, 0.8, 0.8, 0.8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grab_radius_is_exclusive() {
        let handle = Point::new(100.0, 100.0);
        assert!(is_grabbed(handle, Point::new(104.0, 103.0)));
        assert!(!is_grabbed(handle, Point::new(110.0, 100.0)));
        assert!(!is_grabbed(handle, Point::new(0.0, 0.0)));
    }
}
