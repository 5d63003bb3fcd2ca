// SPDX-License-Identifier: MIT

//! Static parking directory: display name to parking id.
//!
//! Generated offline by the `build_parking_directory` binary sweeping the
//! parking-list event across the area table, then consumed read-only by
//! the polling flow. Immutable once written.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::error::Result as PortalResult;
use crate::services::PortalClient;

/// Name → parking-id map, persisted as a JSON object.
#[derive(Debug, Default, Clone, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ParkingDirectory {
    entries: BTreeMap<String, String>,
}

impl ParkingDirectory {
    /// Load the generated directory from disk.
    pub fn load_from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading parking directory {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing parking directory {}", path.display()))
    }

    /// Write the directory as pretty-printed JSON.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(self)?;
        fs::write(path, raw)
            .with_context(|| format!("writing parking directory {}", path.display()))
    }

    /// Parking id for a station name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sweep the given areas and build the directory.
    ///
    /// One known anomaly in the portal data: for the H1-Area stations the
    /// `ParkingID` field holds the service id and the real parking id is
    /// carried in `ParkingLat`. That swap is confined to this exception
    /// branch; runtime parsing stays uniform. Stations missing the swapped
    /// field are skipped with a warning rather than failing the sweep.
    pub async fn generate(
        portal: &mut PortalClient,
        area_ids: impl IntoIterator<Item = String>,
    ) -> PortalResult<Self> {
        let mut entries = BTreeMap::new();
        for area_id in area_ids {
            let Some(stations) = portal.fetch_parking_list(&area_id).await? else {
                tracing::warn!(area = %area_id, "No parking forms for area");
                continue;
            };
            tracing::info!(area = %area_id, stations = stations.len(), "Area swept");
            for station in stations {
                let id = if station.id == portal.service_id() {
                    match station.form.hidden_field("ParkingLat") {
                        Some(lat) => lat,
                        None => {
                            tracing::warn!(name = %station.name, "H1-Area station without ParkingLat, skipped");
                            continue;
                        }
                    }
                } else {
                    station.id
                };
                entries.insert(station.name, id);
            }
        }
        Ok(Self { entries })
    }
}
