use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs::read;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_FILE: &str = "data/WATA_SEGMENTS2.csv";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8050;
pub const DEFAULT_EXPORT_FILE: &str = "dashboard.html";

/// Dashboard settings; defines the TOML schema for config files.
/// Every field is optional in the file and falls back to its default.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Ridership records; `.xlsx`/`.xlsm` are read as workbooks, anything else as CSV.
    pub data_file: PathBuf,

    pub host: String,

    pub port: u16,

    /// Where the static dashboard is written after the server stops.
    pub export_file: PathBuf,

    pub map: MapSettings,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct MapSettings {
    pub zoom: f64,
    pub marker_size: u32,
    /// Mapbox base style; `open-street-map` needs no access token.
    pub style: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_file: DEFAULT_DATA_FILE.into(),
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            export_file: DEFAULT_EXPORT_FILE.into(),
            map: MapSettings::default(),
        }
    }
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            zoom: 10.0,
            marker_size: 10,
            style: "open-street-map".to_owned(),
        }
    }
}

impl DashboardConfig {
    pub fn from_file(file_path: impl AsRef<Path>) -> Result<Self> {
        let file_contents_str = String::from_utf8_lossy(&read(file_path)?).to_string();
        let config: DashboardConfig = toml::from_str(&file_contents_str)?;
        Ok(config)
    }

    pub fn encode_toml(&self) -> Result<String> {
        let encoded = toml::to_string(self)?;
        Ok(encoded)
    }

    pub fn save_toml(&self, file_path: impl AsRef<Path>) -> Result<()> {
        let encoded = self.encode_toml()?;
        std::fs::write(file_path, encoded)?;
        Ok(())
    }

    /// `host:port` for the HTTP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use tempfile::NamedTempFile;

    #[test]
    fn partial_file_uses_defaults() {
        let config: DashboardConfig = toml::from_str(
            r#"
port = 9000

[map]
zoom = 12.5
"#,
        )
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.map.zoom, 12.5);
        assert_eq!(config.map.marker_size, 10);
        assert_eq!(config.data_file, PathBuf::from(DEFAULT_DATA_FILE));
        assert_eq!(config.bind_address(), "127.0.0.1:9000");
    }

    #[test]
    fn save_and_reload() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let file = NamedTempFile::new()?;
        let config = DashboardConfig {
            data_file: "rides.csv".into(),
            port: 8123,
            ..Default::default()
        };
        config.save_toml(file.path())?;

        let reloaded = DashboardConfig::from_file(file.path())?;
        assert_eq!(reloaded, config);
        Ok(())
    }

    #[test]
    fn invalid_toml() {
        let err = toml::from_str::<DashboardConfig>("port = \"eighty\"").unwrap_err();
        assert!(matches!(Error::from(err), Error::TomlDe(_)));
    }
}
