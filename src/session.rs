use std::path::{Path, PathBuf};

use tracing::{info, trace, warn};

use crate::{
    CalibrationMode, ControlPointsError, Result,
    container::{ControlHandle, DragIntent},
    read_state::save_store_state,
    store::{AppAction, StoreDispatch, StoreState},
};

/// Store of one opened image together with the file it is saved to.
///
/// Saving is refused until a load succeeded, so a failed load never
/// replaces the file on disk with defaults.
#[derive(Debug)]
pub struct Session {
    state_file: PathBuf,
    store: StoreState,
    loaded: bool,
    rejected_drag: Option<ControlHandle>,
}

impl Session {
    pub fn new(state_file: PathBuf) -> Self {
        Self {
            state_file,
            store: StoreState::default(),
            loaded: false,
            rejected_drag: None,
        }
    }

    pub fn store(&self) -> &StoreState {
        &self.store
    }

    pub fn state_file(&self) -> &Path {
        &self.state_file
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Handle whose drags are currently being refused.
    pub fn rejected_drag(&self) -> Option<ControlHandle> {
        self.rejected_drag
    }

    pub fn loaded(&mut self, store: StoreState, initial_mode: Option<CalibrationMode>) {
        self.store = store;
        if let Some(mode) = initial_mode {
            self.store.dispatch(AppAction::SetCalibrationMode(mode));
        }
        self.loaded = true;
    }

    pub fn dispatch(&mut self, action: AppAction) {
        self.store.dispatch(action);
    }

    /// Applies a drag to the store. A refused drag is logged once per
    /// handle until some drag goes through again.
    pub fn drag(&mut self, intent: DragIntent) -> Result<()> {
        match intent.dispatch(&mut StoreDispatch::new(&mut self.store)) {
            Ok(()) => {
                self.rejected_drag = None;
                Ok(())
            }
            Err(err) => {
                if self.rejected_drag == Some(intent.handle) {
                    trace!("ignored {:?} drag: {err}", intent.handle);
                } else {
                    warn!("ignored {:?} drag: {err}", intent.handle);
                    self.rejected_drag = Some(intent.handle);
                }
                Err(err)
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        if !self.loaded {
            return Err(ControlPointsError::NotLoaded(self.state_file.clone()));
        }
        save_store_state(&self.state_file, &self.store)?;
        info!("saved {}", self.state_file.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ControlPointsState1VP, RelativePoint,
        read_state::{load, read_store_state},
    };

    fn drag(handle: ControlHandle, x: f32, y: f32) -> DragIntent {
        DragIntent {
            handle,
            is_one_vanishing_point_mode: true,
            position: RelativePoint::new(x, y),
        }
    }

    #[tokio::test]
    async fn failed_load_does_not_overwrite_saved_points() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("street.png");
        let state_file = dir.path().join("street.control-points");
        std::fs::write(&image, b"not an image").unwrap();
        let mut stored = StoreState::default();
        stored.dispatch(AppAction::SetHorizonStartPosition(RelativePoint::new(0.33, 0.44)));
        save_store_state(&state_file, &stored).unwrap();

        let session = Session::new(state_file.clone());
        assert!(load(image, state_file.clone()).await.is_err());
        assert!(!session.is_loaded());

        let result = session.save();
        assert!(matches!(result, Err(ControlPointsError::NotLoaded(path)) if path == state_file));

        let on_disk = read_store_state(&state_file).await.unwrap();
        assert_eq!(
            on_disk.control_points_states.control_points_state_1vp.horizon_start,
            RelativePoint::new(0.33, 0.44)
        );
    }

    #[test]
    fn loaded_session_saves_and_applies_initial_mode() {
        let dir = tempfile::tempdir().unwrap();
        let state_file = dir.path().join("street.control-points");
        let mut session = Session::new(state_file.clone());

        session.loaded(StoreState::default(), Some(CalibrationMode::TwoVanishingPoint));
        session.drag(drag(ControlHandle::HorizonEnd, 0.8, 0.4)).unwrap();
        session.save().unwrap();

        let bytes = std::fs::read(&state_file).unwrap();
        let on_disk: StoreState = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(on_disk.calibration_mode, CalibrationMode::TwoVanishingPoint);
        assert_eq!(
            on_disk.control_points_states.control_points_state_1vp.horizon_end,
            RelativePoint::new(0.8, 0.4)
        );
    }

    #[test]
    fn refused_drags_are_remembered_until_one_succeeds() {
        let mut session = Session::new(PathBuf::from("street.control-points"));
        session.loaded(StoreState::default(), None);

        for _ in 0..2 {
            let result = session.drag(drag(ControlHandle::PrincipalPoint, 0.2, 0.2));
            assert!(matches!(result, Err(ControlPointsError::NotImplemented(_))));
        }
        assert_eq!(session.rejected_drag(), Some(ControlHandle::PrincipalPoint));
        assert_eq!(
            session.store().control_points_states.control_points_state_1vp,
            ControlPointsState1VP::default()
        );

        assert!(session.drag(drag(ControlHandle::Origin, 0.3, 0.3)).is_err());
        assert_eq!(session.rejected_drag(), Some(ControlHandle::Origin));

        session.drag(drag(ControlHandle::HorizonStart, 0.2, 0.6)).unwrap();
        assert_eq!(session.rejected_drag(), None);
    }
}
