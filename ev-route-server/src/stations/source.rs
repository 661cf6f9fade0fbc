//! JSON inventory file.
//!
//! The inventory is exported from the operator database as two tables:
//! stations and their chargers. Chargers are aggregated per station into
//! the maximum power and the charger count the ranker uses.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{Coordinate, Station};

use super::error::InventoryError;

/// One row of the stations table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationRow {
    pub station_id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// One row of the chargers table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargerRow {
    pub charger_id: i64,
    pub station_id: i64,
    #[serde(default)]
    pub power_kw: Option<f64>,
}

/// On-disk inventory layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryFile {
    #[serde(default)]
    pub stations: Vec<StationRow>,
    #[serde(default)]
    pub chargers: Vec<ChargerRow>,
}

impl InventoryFile {
    /// Read an inventory file.
    pub fn read(path: &Path) -> Result<Self, InventoryError> {
        let contents = std::fs::read_to_string(path).map_err(|source| InventoryError::Io {
            path: path.display().to_string(),
            source,
        })?;

        serde_json::from_str(&contents).map_err(|e| InventoryError::Json {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Join stations with their charger aggregates.
    ///
    /// Stations without chargers get zero power and count. Stations with
    /// out-of-range coordinates are skipped with a warning.
    pub fn into_stations(self) -> Vec<Station> {
        let mut aggregates: HashMap<i64, (f64, u32)> = HashMap::new();
        for charger in &self.chargers {
            let agg = aggregates.entry(charger.station_id).or_insert((0.0, 0));
            agg.0 = agg.0.max(charger.power_kw.unwrap_or(0.0));
            agg.1 += 1;
        }

        self.stations
            .into_iter()
            .filter_map(|row| {
                let location = match Coordinate::new(row.latitude, row.longitude) {
                    Ok(c) => c,
                    Err(e) => {
                        warn!(station_id = row.station_id, error = %e, "skipping station");
                        return None;
                    }
                };

                let (max_power_kw, charger_count) =
                    aggregates.get(&row.station_id).copied().unwrap_or((0.0, 0));

                Some(Station {
                    id: row.station_id,
                    name: row.name,
                    address: row.address,
                    location,
                    max_power_kw,
                    charger_count,
                    distance_to_route_km: None,
                })
            })
            .collect()
    }
}

/// Where the inventory is loaded from.
#[derive(Debug, Clone)]
pub struct InventorySource {
    path: PathBuf,
}

impl InventorySource {
    /// Read from a JSON file at `path`.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load and aggregate all stations.
    pub fn load(&self) -> Result<Vec<Station>, InventoryError> {
        Ok(InventoryFile::read(&self.path)?.into_stations())
    }

    /// Path of the inventory file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const INVENTORY: &str = r#"{
        "stations": [
            { "station_id": 1, "name": "Colombo Fort", "address": "Fort", "latitude": 6.9344, "longitude": 79.8428 },
            { "station_id": 2, "latitude": 7.2906, "longitude": 80.6337 },
            { "station_id": 3, "name": "Broken", "latitude": 120.0, "longitude": 0.0 }
        ],
        "chargers": [
            { "charger_id": 10, "station_id": 1, "power_kw": 50.0 },
            { "charger_id": 11, "station_id": 1, "power_kw": 150.0 },
            { "charger_id": 12, "station_id": 1 },
            { "charger_id": 13, "station_id": 99, "power_kw": 22.0 }
        ]
    }"#;

    #[test]
    fn aggregates_chargers_per_station() {
        let file: InventoryFile = serde_json::from_str(INVENTORY).unwrap();
        let stations = file.into_stations();

        assert_eq!(stations.len(), 2);

        let fort = &stations[0];
        assert_eq!(fort.id, 1);
        assert_eq!(fort.name.as_deref(), Some("Colombo Fort"));
        assert_eq!(fort.max_power_kw, 150.0);
        assert_eq!(fort.charger_count, 3);

        let kandy = &stations[1];
        assert_eq!(kandy.id, 2);
        assert_eq!(kandy.name, None);
        assert_eq!(kandy.max_power_kw, 0.0);
        assert_eq!(kandy.charger_count, 0);
    }

    #[test]
    fn load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stations.json");
        std::fs::write(&path, INVENTORY).unwrap();

        let source = InventorySource::file(&path);
        let stations = source.load().unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(source.path(), path.as_path());
    }

    #[test]
    fn missing_file_is_io_error() {
        let source = InventorySource::file("/nonexistent/stations.json");
        assert!(matches!(source.load(), Err(InventoryError::Io { .. })));
    }

    #[test]
    fn invalid_json_is_json_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stations.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = InventorySource::file(&path).load().unwrap_err();
        assert!(matches!(err, InventoryError::Json { .. }));
        assert!(err.to_string().contains("stations.json"));
    }

    #[test]
    fn empty_file_object_is_empty_inventory() {
        let file: InventoryFile = serde_json::from_str("{}").unwrap();
        assert!(file.into_stations().is_empty());
    }
}
