use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    CalibrationMode, ControlPointsError, ControlPointsState1VP, ControlPointsState2VP,
    RelativePoint, Result,
    container::{ControlPointsProps, DragCallbacks},
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlPointsStates {
    #[serde(rename = "controlPointsState1VP")]
    pub control_points_state_1vp: ControlPointsState1VP,
    #[serde(rename = "controlPointsState2VP")]
    pub control_points_state_2vp: ControlPointsState2VP,
}

/// Application state the overlay reads from and writes to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreState {
    pub calibration_mode: CalibrationMode,
    pub control_points_states: ControlPointsStates,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppAction {
    SetCalibrationMode(CalibrationMode),
    SetHorizonStartPosition(RelativePoint),
    SetHorizonEndPosition(RelativePoint),
}

impl StoreState {
    pub fn dispatch(&mut self, action: AppAction) {
        debug!("dispatch {action:?}");
        let state_1vp = &mut self.control_points_states.control_points_state_1vp;
        match action {
            AppAction::SetCalibrationMode(mode) => self.calibration_mode = mode,
            AppAction::SetHorizonStartPosition(position) => state_1vp.horizon_start = position,
            AppAction::SetHorizonEndPosition(position) => state_1vp.horizon_end = position,
        }
    }
}

pub fn map_state_to_props(state: &StoreState) -> ControlPointsProps<'_> {
    ControlPointsProps {
        calibration_mode: state.calibration_mode,
        control_points_state_1vp: &state.control_points_states.control_points_state_1vp,
        control_points_state_2vp: &state.control_points_states.control_points_state_2vp,
    }
}

/// Turns control point drags into store actions.
///
/// Principal point and origin drags have no action behind them yet: they are
/// traced and reported as [`ControlPointsError::NotImplemented`].
pub struct StoreDispatch<'a> {
    store: &'a mut StoreState,
}

impl<'a> StoreDispatch<'a> {
    pub fn new(store: &'a mut StoreState) -> Self {
        Self { store }
    }
}

impl DragCallbacks for StoreDispatch<'_> {
    fn on_principal_point_drag(
        &mut self,
        _is_one_vanishing_point_mode: bool,
        _position: RelativePoint,
    ) -> Result<()> {
        trace!("principal point drag has no store action");
        Err(ControlPointsError::NotImplemented("principal point drag"))
    }

    fn on_origin_drag(
        &mut self,
        _is_one_vanishing_point_mode: bool,
        _position: RelativePoint,
    ) -> Result<()> {
        trace!("origin drag has no store action");
        Err(ControlPointsError::NotImplemented("origin drag"))
    }

    fn on_horizon_start_drag(
        &mut self,
        _is_one_vanishing_point_mode: bool,
        position: RelativePoint,
    ) -> Result<()> {
        self.store.dispatch(AppAction::SetHorizonStartPosition(position));
        Ok(())
    }

    fn on_horizon_end_drag(
        &mut self,
        _is_one_vanishing_point_mode: bool,
        position: RelativePoint,
    ) -> Result<()> {
        self.store.dispatch(AppAction::SetHorizonEndPosition(position));
        Ok(())
    }
}
