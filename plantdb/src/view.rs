// Read-side projections. Everything here is a pure function over the
// current snapshot; no projection holds state of its own.

use crate::plant::{Category, Plant, Status};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_plants: usize,
    pub categories: usize,
    pub needs_water_today: usize,
}

/// Per-species aggregate for the species index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeciesStat {
    pub species: String,
    pub count: usize,
    pub varieties: Vec<String>,
}

/// Group the collection by species (falling back to plant name), with a
/// sorted, deduplicated variety list per group. Results come back sorted
/// by species.
pub fn species_stats(plants: &[Plant]) -> Vec<SpeciesStat> {
    let mut groups: BTreeMap<String, (usize, BTreeSet<String>)> = BTreeMap::new();

    for p in plants {
        let entry = groups.entry(p.species_key().to_string()).or_default();
        entry.0 += 1;
        if let Some(v) = p.variety.as_deref() {
            let v = v.trim();
            if !v.is_empty() {
                entry.1.insert(v.to_string());
            }
        }
    }

    groups
        .into_iter()
        .map(|(species, (count, varieties))| SpeciesStat {
            species,
            count,
            varieties: varieties.into_iter().collect(),
        })
        .collect()
}

/// Display label for the bucket of plants with no variety.
const UNSPECIFIED_VARIETY: &str = "Unspecified variety";

/// The records of one species, grouped by variety and sorted by group
/// label. Blank varieties are collected under `None`, which sorts under
/// the label "Unspecified variety" like any named group.
pub fn plants_of_species<'a>(
    plants: &'a [Plant],
    species: &str,
) -> Vec<(Option<String>, Vec<&'a Plant>)> {
    let mut named: BTreeMap<String, Vec<&Plant>> = BTreeMap::new();
    let mut unspecified: Vec<&Plant> = Vec::new();

    for p in plants.iter().filter(|p| p.species_key() == species) {
        match p.variety.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => named.entry(v.to_string()).or_default().push(p),
            None => unspecified.push(p),
        }
    }

    let mut groups: Vec<(Option<String>, Vec<&Plant>)> =
        named.into_iter().map(|(v, ps)| (Some(v), ps)).collect();
    if !unspecified.is_empty() {
        groups.push((None, unspecified));
    }
    groups.sort_by(|a, b| group_label(&a.0).cmp(group_label(&b.0)));
    groups
}

fn group_label(variety: &Option<String>) -> &str {
    variety.as_deref().unwrap_or(UNSPECIFIED_VARIETY)
}

/// Plant count per category, every category present even at zero.
pub fn category_counts(plants: &[Plant]) -> Vec<(Category, usize)> {
    Category::ALL
        .iter()
        .map(|&c| (c, plants.iter().filter(|p| p.category == c).count()))
        .collect()
}

/// The wishlist slice of the collection, in insertion order.
pub fn wishlist(plants: &[Plant]) -> Vec<&Plant> {
    plants
        .iter()
        .filter(|p| p.status == Status::Wishlist)
        .collect()
}

/// Everything currently owned, in insertion order.
pub fn owned(plants: &[Plant]) -> Vec<&Plant> {
    plants.iter().filter(|p| p.status == Status::Owned).collect()
}

/// Dashboard stats: totals plus the count of plants whose watering
/// frequency mentions "daily".
pub fn dashboard_stats(plants: &[Plant]) -> DashboardStats {
    let categories = plants
        .iter()
        .map(|p| p.category)
        .collect::<HashSet<_>>()
        .len();
    let needs_water_today = plants
        .iter()
        .filter(|p| p.watering_frequency.to_lowercase().contains("daily"))
        .count();

    DashboardStats {
        total_plants: plants.len(),
        categories,
        needs_water_today,
    }
}
