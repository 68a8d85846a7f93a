// Persistence and import/export - the durable slot is a single JSON
// array of plant records, read leniently and written as a full snapshot.

use crate::error::{PlantDbError, Result};
use crate::plant::{Plant, Status};
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Read the durable slot. A missing file is a normal first boot; content
/// that is not a JSON array is logged and discarded. Individual entries
/// get the same per-field coercion as import, so a record written by an
/// older schema hydrates instead of taking the whole collection with it.
pub fn hydrate(path: &Path) -> Vec<Plant> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            log::warn!("Failed to read {}: {e}", path.display());
            return Vec::new();
        }
    };

    let value: Value = match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            log::warn!(
                "Discarding corrupt collection data in {}: {e}",
                path.display()
            );
            return Vec::new();
        }
    };

    match value.as_array() {
        Some(entries) => entries.iter().map(coerce_plant).collect(),
        None => {
            log::warn!(
                "Discarding corrupt collection data in {}: expected a JSON array",
                path.display()
            );
            Vec::new()
        }
    }
}

/// Write the full snapshot to the durable slot. Failures are logged and
/// swallowed: losing persistence must not block in-memory use.
pub fn persist(path: &Path, plants: &[Plant]) {
    let json = match serde_json::to_string(plants) {
        Ok(json) => json,
        Err(e) => {
            log::error!("Failed to serialize collection: {e}");
            return;
        }
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            let _ = std::fs::create_dir_all(parent);
        }
    }
    if let Err(e) = std::fs::write(path, json) {
        log::error!("Failed to write {}: {e}", path.display());
    }
}

/// Pretty-printed export of the collection: the exact current record
/// shape, no envelope.
pub fn export_pretty(plants: &[Plant]) -> Result<String> {
    Ok(serde_json::to_string_pretty(plants)?)
}

/// Backup artifact name for a given date.
pub fn backup_filename(date: NaiveDate) -> String {
    format!("plant-care-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Write a dated backup of the collection into `dir`. Returns the path
/// of the file written.
pub fn write_backup(plants: &[Plant], dir: &Path) -> Result<PathBuf> {
    let path = dir.join(backup_filename(Utc::now().date_naive()));
    std::fs::write(&path, export_pretty(plants)?)?;
    Ok(path)
}

/// Parse an untrusted import payload. The top-level value must be a JSON
/// array; anything else fails the whole import so the caller keeps its
/// existing collection. Entries are coerced field by field rather than
/// rejected -- this is user data recovery.
pub fn import(input: &str) -> Result<Vec<Plant>> {
    let value: Value = serde_json::from_str(input)
        .map_err(|e| PlantDbError::Import(format!("Not valid JSON: {e}")))?;

    let entries = value
        .as_array()
        .ok_or_else(|| PlantDbError::Import("Expected a JSON array of plant records".into()))?;

    Ok(entries.iter().map(coerce_plant).collect())
}

/// Coerce one untrusted entry into a well-formed record, substituting
/// defaults for anything absent or of the wrong type.
fn coerce_plant(entry: &Value) -> Plant {
    Plant {
        id: match non_blank_str(entry, "id") {
            Some(id) => id.to_string(),
            None => Uuid::new_v4().to_string(),
        },
        name: text_field(entry, "name"),
        species: non_blank_str(entry, "species").map(str::to_string),
        variety: non_blank_str(entry, "variety").map(str::to_string),
        category: entry
            .get("category")
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
            .unwrap_or_default(),
        image_url: text_field(entry, "imageUrl"),
        watering_frequency: text_field(entry, "wateringFrequency"),
        sunlight_requirement: text_field(entry, "sunlightRequirement"),
        description: text_field(entry, "description"),
        date_added: entry
            .get("dateAdded")
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(Utc::now),
        // Only the exact string "wishlist" lands on the wishlist
        status: match entry.get("status").and_then(Value::as_str) {
            Some("wishlist") => Status::Wishlist,
            _ => Status::Owned,
        },
    }
}

fn text_field(entry: &Value, key: &str) -> String {
    entry
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

fn non_blank_str<'a>(entry: &'a Value, key: &str) -> Option<&'a str> {
    entry
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}
