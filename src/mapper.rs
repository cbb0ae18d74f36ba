use iced::{Point, Rectangle};
use nalgebra::Vector2;

use crate::{AbsolutePoint, ControlPointsError, RelativePoint, Result};

/// Screen rectangle the control points are drawn into.
///
/// `left` and `top` place the rectangle on screen; absolute points are local
/// to it, so only `width` and `height` take part in the conversions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    left: f32,
    top: f32,
    width: f32,
    height: f32,
}

impl Viewport {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Result<Self> {
        let valid = |value: f32| value.is_finite() && value > 0.0;
        if !valid(width) || !valid(height) {
            return Err(ControlPointsError::DegenerateViewport { width, height });
        }
        Ok(Self {
            left,
            top,
            width,
            height,
        })
    }

    pub fn from_bounds(bounds: Rectangle) -> Result<Self> {
        Self::new(bounds.x, bounds.y, bounds.width, bounds.height)
    }

    pub fn left(&self) -> f32 {
        self.left
    }

    pub fn top(&self) -> f32 {
        self.top
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Screen position measured from the viewport's top left corner.
    pub fn to_local(&self, screen: Point) -> AbsolutePoint {
        AbsolutePoint::new(screen.x - self.left, screen.y - self.top)
    }

    fn scale(&self) -> Vector2<f32> {
        Vector2::new(self.width, self.height)
    }
}

pub fn to_relative(absolute: AbsolutePoint, viewport: &Viewport) -> RelativePoint {
    let relative = Vector2::new(absolute.x, absolute.y).component_div(&viewport.scale());
    RelativePoint::new(relative.x, relative.y)
}

/// Out of range relative points are kept as is and land outside the viewport.
pub fn to_absolute(relative: RelativePoint, viewport: &Viewport) -> AbsolutePoint {
    let absolute = Vector2::new(relative.x, relative.y).component_mul(&viewport.scale());
    AbsolutePoint::new(absolute.x, absolute.y)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn viewports() -> Vec<Viewport> {
        [(1.0, 1.0), (640.0, 480.0), (1920.0, 1080.0), (333.3, 17.5)]
            .into_iter()
            .map(|(width, height)| Viewport::new(0.0, 0.0, width, height).unwrap())
            .collect()
    }

    #[test]
    fn relative_round_trip() {
        let points = [
            RelativePoint::new(0.0, 0.0),
            RelativePoint::new(0.25, 0.75),
            RelativePoint::new(1.0, 1.0),
            RelativePoint::new(-0.3, 1.7),
        ];
        for viewport in viewports() {
            for point in points {
                let back = to_relative(to_absolute(point, &viewport), &viewport);
                assert_relative_eq!(back.x, point.x, epsilon = 1e-5);
                assert_relative_eq!(back.y, point.y, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn absolute_round_trip() {
        for viewport in viewports() {
            let point = AbsolutePoint::new(viewport.width() * 0.3, viewport.height() * 0.9);
            let back = to_absolute(to_relative(point, &viewport), &viewport);
            assert_relative_eq!(back.x, point.x, max_relative = 1e-5);
            assert_relative_eq!(back.y, point.y, max_relative = 1e-5);
        }
    }

    #[test]
    fn unit_square_corners_map_to_viewport_corners() {
        for viewport in viewports() {
            assert_eq!(
                to_absolute(RelativePoint::new(0.0, 0.0), &viewport),
                AbsolutePoint::new(0.0, 0.0)
            );
            assert_eq!(
                to_absolute(RelativePoint::new(1.0, 1.0), &viewport),
                AbsolutePoint::new(viewport.width(), viewport.height())
            );
        }
    }

    #[test]
    fn offset_does_not_shift_conversion() {
        let viewport = Viewport::new(120.0, 40.0, 200.0, 100.0).unwrap();
        assert_eq!(
            to_relative(AbsolutePoint::new(100.0, 25.0), &viewport),
            RelativePoint::new(0.5, 0.25)
        );
    }

    #[test]
    fn screen_points_become_viewport_local() {
        let bounds = Rectangle::new(Point::new(50.0, 30.0), iced::Size::new(400.0, 200.0));
        let viewport = Viewport::from_bounds(bounds).unwrap();
        assert_eq!(viewport.left(), 50.0);
        assert_eq!(viewport.top(), 30.0);
        let local = viewport.to_local(Point::new(250.0, 80.0));
        assert_eq!(local, AbsolutePoint::new(200.0, 50.0));
        assert_eq!(to_relative(local, &viewport), RelativePoint::new(0.5, 0.25));
    }

    #[test]
    fn out_of_range_points_are_not_clamped() {
        let viewport = Viewport::new(0.0, 0.0, 200.0, 100.0).unwrap();
        assert_eq!(
            to_absolute(RelativePoint::new(1.5, -0.5), &viewport),
            AbsolutePoint::new(300.0, -50.0)
        );
    }

    #[test]
    fn rejects_degenerate_viewports() {
        for (width, height) in [
            (0.0, 100.0),
            (100.0, 0.0),
            (-5.0, 100.0),
            (f32::NAN, 100.0),
            (100.0, f32::INFINITY),
        ] {
            assert!(matches!(
                Viewport::new(0.0, 0.0, width, height),
                Err(ControlPointsError::DegenerateViewport { .. })
            ));
        }
    }
}
