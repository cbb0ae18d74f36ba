use ::image::ImageReader;
use iced::Size;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::store::StoreState;

/// `<dir>/<stem>.control-points` next to the image.
pub fn default_state_path(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    image.with_file_name(format!("{stem}.control-points"))
}

pub async fn read_store_state(state_file: impl AsRef<Path>) -> crate::Result<StoreState> {
    let bytes = tokio::fs::read(state_file.as_ref()).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

pub fn save_store_state(state_file: impl AsRef<Path>, state: &StoreState) -> crate::Result<()> {
    let state_file = state_file.as_ref();
    if !state_file.exists() {
        info!("create file {}", state_file.display());
    }
    let mut file = File::create(state_file)?;
    file.write_all(&serde_json::to_vec_pretty(state)?)?;
    Ok(())
}

/// Loads the stored control points, falling back to defaults when the file
/// does not exist yet, and reads the pixel size of the image.
pub async fn load(image: PathBuf, state_file: PathBuf) -> anyhow::Result<(StoreState, Size<u32>)> {
    let state = if state_file.exists() {
        read_store_state(&state_file).await?
    } else {
        warn!("could not read control points for {}", state_file.display());
        StoreState::default()
    };

    let (width, height) = ImageReader::open(&image)?
        .with_guessed_format()?
        .into_dimensions()?;
    Ok((state, Size::new(width, height)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CalibrationMode, ControlPointsError, RelativePoint, store::AppAction};

    #[test]
    fn state_path_sits_next_to_image() {
        assert_eq!(
            default_state_path(Path::new("/photos/street.jpg")),
            PathBuf::from("/photos/street.control-points")
        );
        assert_eq!(
            default_state_path(Path::new("street.png")),
            PathBuf::from("street.control-points")
        );
    }

    #[tokio::test]
    async fn saved_state_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("street.control-points");
        let mut state = StoreState::default();
        state.dispatch(AppAction::SetCalibrationMode(CalibrationMode::TwoVanishingPoint));
        state.dispatch(AppAction::SetHorizonStartPosition(RelativePoint::new(0.2, 0.3)));

        save_store_state(&path, &state).unwrap();
        let restored = read_store_state(&path).await.unwrap();

        assert_eq!(restored, state);
    }

    #[tokio::test]
    async fn malformed_state_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.control-points");
        std::fs::write(&path, b"{\"calibrationMode\": 3}").unwrap();

        let result = read_store_state(&path).await;
        assert!(matches!(result, Err(ControlPointsError::Json(_))));
    }

    #[tokio::test]
    async fn load_falls_back_to_defaults_and_reads_image_size() {
        let dir = tempfile::tempdir().unwrap();
        let image_path = dir.path().join("blank.png");
        ::image::RgbImage::new(64, 48).save(&image_path).unwrap();

        let (state, size) = load(image_path.clone(), default_state_path(&image_path))
            .await
            .unwrap();

        assert_eq!(state, StoreState::default());
        assert_eq!(size, Size::new(64, 48));
    }

    #[tokio::test]
    async fn load_reports_missing_image() {
        let dir = tempfile::tempdir().unwrap();
        let image_path = dir.path().join("missing.png");
        assert!(load(image_path.clone(), default_state_path(&image_path)).await.is_err());
    }
}
