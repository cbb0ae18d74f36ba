use handles::{HorizonControl, OriginControl, PrincipalPointControl, is_grabbed};
use iced::Point;
use tracing::trace;

use crate::{
    AbsolutePoint, CalibrationMode, ControlPointsState1VP, ControlPointsState2VP,
    ControlPointsStateBase, RelativePoint, Result,
    mapper::{Viewport, to_absolute, to_relative},
};

/// Read only snapshot of the store the overlay is drawn from.
#[derive(Debug, Clone, Copy)]
pub struct ControlPointsProps<'a> {
    pub calibration_mode: CalibrationMode,
    pub control_points_state_1vp: &'a ControlPointsState1VP,
    pub control_points_state_2vp: &'a ControlPointsState2VP,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlHandle {
    PrincipalPoint,
    Origin,
    HorizonStart,
    HorizonEnd,
}

/// Receivers of drag motion, one per handle. Positions are relative.
pub trait DragCallbacks {
    fn on_principal_point_drag(
        &mut self,
        is_one_vanishing_point_mode: bool,
        position: RelativePoint,
    ) -> Result<()>;
    fn on_origin_drag(
        &mut self,
        is_one_vanishing_point_mode: bool,
        position: RelativePoint,
    ) -> Result<()>;
    fn on_horizon_start_drag(
        &mut self,
        is_one_vanishing_point_mode: bool,
        position: RelativePoint,
    ) -> Result<()>;
    fn on_horizon_end_drag(
        &mut self,
        is_one_vanishing_point_mode: bool,
        position: RelativePoint,
    ) -> Result<()>;
}

/// A drag converted to relative space, waiting to be handed to [`DragCallbacks`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragIntent {
    pub handle: ControlHandle,
    pub is_one_vanishing_point_mode: bool,
    pub position: RelativePoint,
}

impl DragIntent {
    pub fn dispatch<C>(self, callbacks: &mut C) -> Result<()>
    where
        C: DragCallbacks + ?Sized,
    {
        let DragIntent {
            handle,
            is_one_vanishing_point_mode,
            position,
        } = self;
        match handle {
            ControlHandle::PrincipalPoint => {
                callbacks.on_principal_point_drag(is_one_vanishing_point_mode, position)
            }
            ControlHandle::Origin => callbacks.on_origin_drag(is_one_vanishing_point_mode, position),
            ControlHandle::HorizonStart => {
                callbacks.on_horizon_start_drag(is_one_vanishing_point_mode, position)
            }
            ControlHandle::HorizonEnd => {
                callbacks.on_horizon_end_drag(is_one_vanishing_point_mode, position)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModeControls {
    OneVanishingPoint { horizon: HorizonControl },
    /// Mode whose controls have no drawing yet.
    NotImplemented(CalibrationMode),
}

/// Everything the overlay draws for one frame, in canvas pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlSet {
    pub principal_point: PrincipalPointControl,
    pub origin: OriginControl,
    pub mode_controls: ModeControls,
}

impl ControlSet {
    /// Draggable handles in paint order.
    pub fn handles(&self) -> Vec<(ControlHandle, Point)> {
        let mut handles = vec![
            (ControlHandle::PrincipalPoint, self.principal_point.position),
            (ControlHandle::Origin, self.origin.position),
        ];
        if let ModeControls::OneVanishingPoint { horizon } = &self.mode_controls
            && horizon.enabled
        {
            handles.push((ControlHandle::HorizonStart, horizon.start));
            handles.push((ControlHandle::HorizonEnd, horizon.end));
        }
        handles
    }

    /// Topmost handle under the cursor.
    pub fn hit_test(&self, cursor: Point) -> Option<ControlHandle> {
        self.handles()
            .into_iter()
            .rev()
            .find(|(_, position)| is_grabbed(*position, cursor))
            .map(|(handle, _)| handle)
    }
}

/// Stateless view over the calibration control points.
pub struct ControlPointsContainer<'a> {
    viewport: Viewport,
    props: ControlPointsProps<'a>,
}

impl<'a> ControlPointsContainer<'a> {
    pub fn new(viewport: Viewport, props: ControlPointsProps<'a>) -> Self {
        Self { viewport, props }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn is_one_vanishing_point_mode(&self) -> bool {
        self.props.calibration_mode.is_one_vanishing_point()
    }

    pub fn render(&self) -> ControlSet {
        let (principal_point, origin) = if self.is_one_vanishing_point_mode() {
            self.render_common_controls(self.props.control_points_state_1vp)
        } else {
            self.render_common_controls(self.props.control_points_state_2vp)
        };
        let mode_controls = match self.props.calibration_mode {
            CalibrationMode::OneVanishingPoint => self.render_1vp_controls(),
            CalibrationMode::TwoVanishingPoint => self.render_2vp_controls(),
        };
        ControlSet {
            principal_point,
            origin,
            mode_controls,
        }
    }

    fn render_common_controls(
        &self,
        state: &impl ControlPointsStateBase,
    ) -> (PrincipalPointControl, OriginControl) {
        (
            PrincipalPointControl::new(self.rel_to_abs(state.principal_point())),
            OriginControl::new(self.rel_to_abs(state.origin())),
        )
    }

    fn render_1vp_controls(&self) -> ModeControls {
        let state = self.props.control_points_state_1vp;
        ModeControls::OneVanishingPoint {
            horizon: HorizonControl::new(
                self.rel_to_abs(state.horizon_start),
                self.rel_to_abs(state.horizon_end),
                true,
            ),
        }
    }

    fn render_2vp_controls(&self) -> ModeControls {
        ModeControls::NotImplemented(CalibrationMode::TwoVanishingPoint)
    }

    fn rel_to_abs(&self, relative: RelativePoint) -> Point {
        to_absolute(relative, &self.viewport).into()
    }

    pub fn drag_intent(&self, handle: ControlHandle, absolute: AbsolutePoint) -> DragIntent {
        let position = to_relative(absolute, &self.viewport);
        trace!(
            "drag {handle:?} to {:.3},{:.3} ({:.1},{:.1} px)",
            position.x, position.y, absolute.x, absolute.y
        );
        DragIntent {
            handle,
            is_one_vanishing_point_mode: self.is_one_vanishing_point_mode(),
            position,
        }
    }

    /// Converts a drag reported in pixels and hands it to `callbacks`.
    pub fn forward_drag<C>(
        &self,
        handle: ControlHandle,
        absolute: AbsolutePoint,
        callbacks: &mut C,
    ) -> Result<()>
    where
        C: DragCallbacks + ?Sized,
    {
        self.drag_intent(handle, absolute).dispatch(callbacks)
    }
}
