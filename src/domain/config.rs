use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration for the record keeper.
///
/// This struct holds settings that control where records are persisted and
/// how the interactive session behaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The flat file that student records are saved to and loaded from.
    data_file: PathBuf,

    /// Whether to offer saving to file straight after a record is added.
    pub confirm_save_after_add: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            confirm_save_after_add: true,
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Returns the path of the data file.
    #[must_use]
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Sets the path of the data file.
    pub fn set_data_file(&mut self, path: PathBuf) {
        self.data_file = path;
    }
}

fn default_data_file() -> PathBuf {
    PathBuf::from("student_records.dat")
}

const fn default_true() -> bool {
    true
}

/// The serialized versions of the configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_data_file")]
        data_file: PathBuf,

        #[serde(default = "default_true")]
        confirm_save_after_add: bool,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                data_file,
                confirm_save_after_add,
            } => Self {
                data_file,
                confirm_save_after_add,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            data_file: config.data_file,
            confirm_save_after_add: config.confirm_save_after_add,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"_version = \"1\"\ndata_file = \"records/class-a.dat\"\nconfirm_save_after_add = false\n",
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.data_file(), Path::new("records/class-a.dat"));
        assert!(!config.confirm_save_after_add);
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(error.starts_with("Failed to read config file:"));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nconfirm_save_after_add = \"maybe\"\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.starts_with("Failed to parse config file:"));
    }

    #[test]
    fn empty_file_returns_default() {
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn serialized_config_loads_back() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("roster.toml");
        let mut config = Config::default();
        config.set_data_file(PathBuf::from("other.dat"));
        config.confirm_save_after_add = false;

        let content = toml::to_string_pretty(&config).unwrap();
        assert!(content.contains("_version = \"1\""));
        std::fs::write(&path, content).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }
}
