pub mod container;
pub mod control_points_canvas;
pub mod mapper;
pub mod read_state;
pub mod session;
pub mod store;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ControlPointsError {
    #[error("viewport must have a positive size, got {width}x{height}")]
    DegenerateViewport { width: f32, height: f32 },
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
    #[error("control points for {} were never loaded", .0.display())]
    NotLoaded(std::path::PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ControlPointsError>;

/// Position in the unit square of the image, independent of its pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RelativePoint {
    pub x: f32,
    pub y: f32,
}

impl RelativePoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Position in pixels from the top left corner of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AbsolutePoint {
    pub x: f32,
    pub y: f32,
}

impl AbsolutePoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<iced::Point> for AbsolutePoint {
    fn from(point: iced::Point) -> Self {
        Self::new(point.x, point.y)
    }
}

impl From<AbsolutePoint> for iced::Point {
    fn from(point: AbsolutePoint) -> Self {
        iced::Point::new(point.x, point.y)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalibrationMode {
    #[default]
    OneVanishingPoint,
    TwoVanishingPoint,
}

impl CalibrationMode {
    pub fn is_one_vanishing_point(self) -> bool {
        matches!(self, CalibrationMode::OneVanishingPoint)
    }
}

/// Control points every calibration mode carries.
pub trait ControlPointsStateBase {
    fn principal_point(&self) -> RelativePoint;
    fn origin(&self) -> RelativePoint;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlPointsState1VP {
    pub principal_point: RelativePoint,
    pub origin: RelativePoint,
    pub horizon_start: RelativePoint,
    pub horizon_end: RelativePoint,
}

impl Default for ControlPointsState1VP {
    fn default() -> Self {
        Self {
            principal_point: RelativePoint::new(0.5, 0.5),
            origin: RelativePoint::new(0.5, 0.5),
            horizon_start: RelativePoint::new(0.1, 0.5),
            horizon_end: RelativePoint::new(0.9, 0.5),
        }
    }
}

impl ControlPointsStateBase for ControlPointsState1VP {
    fn principal_point(&self) -> RelativePoint {
        self.principal_point
    }

    fn origin(&self) -> RelativePoint {
        self.origin
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: RelativePoint,
    pub end: RelativePoint,
}

impl LineSegment {
    pub const fn new(start: RelativePoint, end: RelativePoint) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VanishingPointControl {
    pub line_segments: [LineSegment; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlPointsState2VP {
    pub principal_point: RelativePoint,
    pub origin: RelativePoint,
    /// Stored and persisted, not yet drawn.
    pub vanishing_points: [VanishingPointControl; 2],
}

const fn segment(start_x: f32, start_y: f32, end_x: f32, end_y: f32) -> LineSegment {
    LineSegment::new(
        RelativePoint::new(start_x, start_y),
        RelativePoint::new(end_x, end_y),
    )
}

impl Default for ControlPointsState2VP {
    fn default() -> Self {
        Self {
            principal_point: RelativePoint::new(0.5, 0.5),
            origin: RelativePoint::new(0.5, 0.5),
            vanishing_points: [
                VanishingPointControl {
                    line_segments: [
                        segment(0.43, 0.76, 0.2, 0.62),
                        segment(0.43, 0.24, 0.2, 0.38),
                    ],
                },
                VanishingPointControl {
                    line_segments: [
                        segment(0.57, 0.76, 0.8, 0.62),
                        segment(0.57, 0.24, 0.8, 0.38),
                    ],
                },
            ],
        }
    }
}

impl ControlPointsStateBase for ControlPointsState2VP {
    fn principal_point(&self) -> RelativePoint {
        self.principal_point
    }

    fn origin(&self) -> RelativePoint {
        self.origin
    }
}
