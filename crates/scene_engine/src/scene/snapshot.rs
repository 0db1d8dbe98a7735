//! Settings snapshot
//!
//! Plain key-per-line numeric persistence for the handful of values that
//! survive a restart: clear color, overlay flag, camera position, and camera
//! facing, in that fixed line order. A missing file keeps the compiled-in
//! defaults; a malformed file is an error the caller logs, and the state is
//! left untouched.

use crate::foundation::math::Vec3;
use crate::scene::state::AppState;
use std::path::Path;
use thiserror::Error;

/// Snapshot persistence errors
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The file could not be read or written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file did not contain the expected ten values
    #[error("malformed snapshot: {0}")]
    Malformed(String),
}

/// Number of whitespace-separated values in a snapshot
const VALUE_COUNT: usize = 10;

/// Write the snapshot for the current state
pub fn save<P: AsRef<Path>>(state: &AppState, path: P) -> Result<(), SnapshotError> {
    let camera = &state.camera;
    let contents = format!(
        "{}\n{}\n{}\n{}\n{}\n{}\n{}\n{}\n{}\n{}\n",
        state.clear_color.x,
        state.clear_color.y,
        state.clear_color.z,
        u8::from(state.overlay_enabled),
        camera.position.x,
        camera.position.y,
        camera.position.z,
        camera.front.x,
        camera.front.y,
        camera.front.z,
    );
    std::fs::write(path, contents)?;
    Ok(())
}

/// Apply a snapshot to the state, if one exists
///
/// Returns `Ok(false)` when the file is absent (defaults retained). All ten
/// values are parsed before any of them is applied, so a malformed file
/// never leaves the state half-updated.
pub fn load<P: AsRef<Path>>(state: &mut AppState, path: P) -> Result<bool, SnapshotError> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        log::debug!("No snapshot at {:?}, keeping defaults", path_ref);
        return Ok(false);
    }

    let text = std::fs::read_to_string(path_ref)?;
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() < VALUE_COUNT {
        return Err(SnapshotError::Malformed(format!(
            "expected {VALUE_COUNT} values, found {}",
            tokens.len()
        )));
    }

    let mut values = [0.0f32; VALUE_COUNT];
    for (index, token) in tokens[..VALUE_COUNT].iter().enumerate() {
        values[index] = token.parse().map_err(|_| {
            SnapshotError::Malformed(format!("value {index} is not a number: {token}"))
        })?;
    }
    let overlay = match tokens[3] {
        "0" => false,
        "1" => true,
        other => {
            return Err(SnapshotError::Malformed(format!(
                "overlay flag must be 0 or 1, found {other}"
            )))
        }
    };

    state.clear_color = Vec3::new(values[0], values[1], values[2]);
    state.overlay_enabled = overlay;
    state.mouse_look_enabled = !overlay;
    state.camera.position = Vec3::new(values[4], values[5], values[6]);
    state
        .camera
        .set_facing(Vec3::new(values[7], values[8], values[9]));

    log::info!("Restored snapshot from {:?}", path_ref);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("diorama_{}_{}", std::process::id(), name))
    }

    #[test]
    fn round_trip_preserves_the_ten_values_in_order() {
        let path = temp_path("roundtrip.txt");
        let mut state = AppState::default();
        state.clear_color = Vec3::new(0.1, 0.2, 0.3);
        state.overlay_enabled = true;
        state.camera.position = Vec3::new(4.0, 5.0, 6.0);
        state.camera.set_facing(Vec3::new(0.0, 0.0, -1.0));

        save(&state, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 10);
        assert_eq!(text.lines().nth(3), Some("1"));

        let mut restored = AppState::default();
        assert!(load(&mut restored, &path).unwrap());
        assert_relative_eq!(restored.clear_color, state.clear_color);
        assert!(restored.overlay_enabled);
        assert!(!restored.mouse_look_enabled);
        assert_relative_eq!(restored.camera.position, state.camera.position);
        assert_relative_eq!(restored.camera.front, state.camera.front, epsilon = 1e-5);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_keeps_defaults() {
        let mut state = AppState::default();
        let loaded = load(&mut state, temp_path("never_written.txt")).unwrap();
        assert!(!loaded);
        assert_relative_eq!(state.clear_color, Vec3::zeros());
    }

    #[test]
    fn malformed_file_leaves_state_untouched() {
        let path = temp_path("malformed.txt");
        std::fs::write(&path, "0.5 0.5 not_a_number").unwrap();

        let mut state = AppState::default();
        let result = load(&mut state, &path);
        assert!(matches!(result, Err(SnapshotError::Malformed(_))));
        assert_relative_eq!(state.clear_color, Vec3::zeros());
        assert!(state.mouse_look_enabled);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn overlay_flag_must_be_binary() {
        let path = temp_path("badflag.txt");
        std::fs::write(&path, "0 0 0 2 0 0 0 0 0 -1").unwrap();

        let mut state = AppState::default();
        assert!(matches!(
            load(&mut state, &path),
            Err(SnapshotError::Malformed(_))
        ));

        std::fs::remove_file(&path).ok();
    }
}
