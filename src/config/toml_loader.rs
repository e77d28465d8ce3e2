//! TOML configuration file loading.
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::SettingsError;

/// Load and deserialize a TOML file.
///
/// A missing file is not an error: it deserializes from empty TOML, so every
/// `#[serde(default)]` field takes its default value.
///
/// # Errors
///
/// Returns [`SettingsError::Read`] if the file exists but cannot be read, or
/// [`SettingsError::Parse`] if its content does not deserialize into `T`.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T, SettingsError> {
    let content = if path.exists() {
        std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        String::new()
    };

    toml::from_str(&content).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq, Eq)]
    #[serde(default)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let sample: Sample = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(sample, Sample::default());
    }

    #[test]
    fn reads_values_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.toml");
        std::fs::write(&path, "name = \"core\"\ncount = 3\n").unwrap();
        let sample: Sample = load_config(&path).unwrap();
        assert_eq!(sample.name, "core");
        assert_eq!(sample.count, 3);
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "name = \n").unwrap();
        let err = load_config::<Sample>(&path).expect_err("invalid toml should fail");
        assert!(matches!(err, SettingsError::Parse { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn directory_path_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config::<Sample>(dir.path()).expect_err("directory is not a file");
        assert!(matches!(err, SettingsError::Read { .. }));
    }
}
