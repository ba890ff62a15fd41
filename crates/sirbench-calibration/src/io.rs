//! Where calibration profiles live on disk.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::profile::CalibrationProfile;

/// A single profile file.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    /// Store backed by an explicit file.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$XDG_CONFIG_HOME/sirbench/calibration.json`, then
    /// `$HOME/.config/sirbench/calibration.json`, then
    /// `./.sirbench-calibration.json`.
    #[must_use]
    pub fn user_default() -> Self {
        let config_home = std::env::var_os("XDG_CONFIG_HOME")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")));
        match config_home {
            Some(dir) => Self::at(dir.join("sirbench").join("calibration.json")),
            None => Self::at(".sirbench-calibration.json"),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored profile.
    ///
    /// A missing file is `None`. An unreadable or malformed file is also
    /// `None`, with a warning, so a stale profile never blocks a benchmark.
    #[must_use]
    pub fn load(&self) -> Option<CalibrationProfile> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "cannot read calibration profile");
                return None;
            }
        };
        match serde_json::from_reader(BufReader::new(file)) {
            Ok(profile) => Some(profile),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring malformed calibration profile");
                None
            }
        }
    }

    /// Write `profile`, creating parent directories as needed.
    pub fn save(&self, profile: &CalibrationProfile) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut out = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut out, profile)?;
        out.write_all(b"\n")?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sirbench_core::ModelParams;
    use tempfile::TempDir;

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = ProfileStore::at(dir.path().join("nested").join("calibration.json"));
        let profile = CalibrationProfile::new(1_234, ModelParams::new(200, 0.4, 0.2), 5_000, 3);
        store.save(&profile).unwrap();
        assert_eq!(store.load(), Some(profile));
    }

    #[test]
    fn missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(ProfileStore::at(dir.path().join("absent.json")).load().is_none());
    }

    #[test]
    fn malformed_file_is_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("calibration.json");
        std::fs::write(&path, "{\"split_threshold\": \"many\"}").unwrap();
        assert!(ProfileStore::at(&path).load().is_none());
    }

    #[test]
    fn save_into_a_file_path_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let store = ProfileStore::at(blocker.join("calibration.json"));
        let profile = CalibrationProfile::new(10, ModelParams::default(), 100, 1);
        assert!(store.save(&profile).is_err());
    }

    #[test]
    fn default_location_is_named_for_the_tool() {
        let path = ProfileStore::user_default().path().to_string_lossy().into_owned();
        assert!(path.contains("sirbench"));
        assert!(path.ends_with(".json"));
    }
}
