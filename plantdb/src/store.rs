use crate::codec;
use crate::error::{PlantDbError, Result};
use crate::plant::{IdentityKey, Plant, Status};
use crate::validation;
use std::path::PathBuf;

/// Outcome of a successful `add`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The record was appended to the collection.
    Added { id: String },
    /// An existing wishlist record with the same identity was promoted
    /// to owned in place; no new record was created.
    Promoted { id: String },
}

impl AddOutcome {
    /// The id of the record that now represents this plant.
    pub fn id(&self) -> &str {
        match self {
            AddOutcome::Added { id } | AddOutcome::Promoted { id } => id,
        }
    }
}

/// Single source of truth for the plant collection.
/// Owns the in-memory snapshot and writes the full collection back to
/// the durable slot after every mutation.
pub struct Store {
    plants: Vec<Plant>,
    slot: PathBuf,
}

impl Store {
    /// Open a store backed by the given slot file, hydrating whatever is
    /// there. A missing or corrupt slot starts the collection empty.
    pub fn open(slot: impl Into<PathBuf>) -> Self {
        let slot = slot.into();
        let plants = codec::hydrate(&slot);
        Store { plants, slot }
    }

    /// The current snapshot, in insertion order.
    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    /// Insert a new record. Runs field validation, then the duplicate
    /// check: an existing wishlist record with the same identity absorbs
    /// an owned candidate (you already wished for this plant and now you
    /// own it); any other identity match is a duplicate conflict.
    pub fn add(&mut self, plant: Plant) -> Result<AddOutcome> {
        validation::ensure_valid(&plant)?;

        let key = IdentityKey::of(&plant);
        match self.plants.iter().position(|p| IdentityKey::of(p) == key) {
            Some(pos) => {
                if self.plants[pos].status == Status::Wishlist && plant.status == Status::Owned {
                    self.plants[pos].status = Status::Owned;
                    let id = self.plants[pos].id.clone();
                    self.persist();
                    Ok(AddOutcome::Promoted { id })
                } else {
                    Err(PlantDbError::Duplicate {
                        species: plant.species_key().to_string(),
                        variety: plant.variety.unwrap_or_default(),
                    })
                }
            }
            None => {
                let id = plant.id.clone();
                self.plants.push(plant);
                self.persist();
                Ok(AddOutcome::Added { id })
            }
        }
    }

    /// Replace the record with a matching id, field for field. Returns
    /// `Ok(false)` when no record has that id. Identity is not re-checked
    /// against the rest of the collection; the edit flow is trusted not
    /// to steer a record into an existing identity.
    pub fn update(&mut self, plant: Plant) -> Result<bool> {
        validation::ensure_valid(&plant)?;

        match self.plants.iter().position(|p| p.id == plant.id) {
            Some(pos) => {
                self.plants[pos] = plant;
                self.persist();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Flip a record's status to owned in place (the wishlist page's
    /// "Mark as Owned"). Returns `false` when the id is unknown.
    pub fn mark_owned(&mut self, id: &str) -> bool {
        match self.plants.iter().position(|p| p.id == id) {
            Some(pos) => {
                self.plants[pos].status = Status::Owned;
                self.persist();
                true
            }
            None => false,
        }
    }

    /// Remove the record with the given id. Deleting an unknown id is a
    /// no-op and does not touch the slot.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.plants.len();
        self.plants.retain(|p| p.id != id);
        if self.plants.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Look up a record by id.
    pub fn get(&self, id: &str) -> Option<&Plant> {
        self.plants.iter().find(|p| p.id == id)
    }

    /// Look up a record by id, failing with `NotFound` when absent.
    pub fn require(&self, id: &str) -> Result<&Plant> {
        self.get(id).ok_or_else(|| PlantDbError::NotFound {
            id: id.to_string(),
        })
    }

    /// Discard the whole collection and substitute `plants` verbatim.
    /// No duplicate checking is performed; bulk replacement trusts its
    /// input.
    pub fn replace_all(&mut self, plants: Vec<Plant>) {
        self.plants = plants;
        self.persist();
    }

    /// Restore the collection from an exported artifact. On a shape
    /// failure the existing collection is left untouched. Returns the
    /// number of records installed.
    pub fn import(&mut self, input: &str) -> Result<usize> {
        let plants = codec::import(input)?;
        let count = plants.len();
        self.replace_all(plants);
        Ok(count)
    }

    /// Pretty-printed export of the current snapshot.
    pub fn export(&self) -> Result<String> {
        codec::export_pretty(&self.plants)
    }

    fn persist(&self) {
        codec::persist(&self.slot, &self.plants);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plant::Category;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample_plant(name: &str) -> Plant {
        let mut p = Plant::new(name, Category::Tropical);
        p.image_url = "https://example.com/p.jpg".into();
        p.watering_frequency = "Once a week".into();
        p.sunlight_requirement = "Bright indirect light".into();
        p.description = "A very pleasant plant to have around.".into();
        p
    }

    fn open_store(tmp: &TempDir) -> Store {
        Store::open(tmp.path().join("plants.json"))
    }

    #[test]
    fn test_add_and_get() {
        let tmp = TempDir::new().unwrap();
        let mut store = open_store(&tmp);

        let plant = sample_plant("Monstera");
        let outcome = store.add(plant.clone()).unwrap();
        assert_eq!(outcome, AddOutcome::Added { id: plant.id.clone() });

        assert_eq!(store.plants().len(), 1);
        assert_eq!(store.get(&plant.id), Some(&plant));
        assert!(store.get("nope").is_none());
        assert!(store.require("nope").is_err());
    }

    #[test]
    fn test_add_rejects_invalid() {
        let tmp = TempDir::new().unwrap();
        let mut store = open_store(&tmp);

        let mut plant = sample_plant("Monstera");
        plant.description = "short".into();

        assert!(matches!(
            store.add(plant),
            Err(PlantDbError::Validation(_))
        ));
        assert!(store.plants().is_empty());
    }

    #[test]
    fn test_add_rejects_duplicate_identity() {
        let tmp = TempDir::new().unwrap();
        let mut store = open_store(&tmp);

        let mut first = sample_plant("Monstera");
        first.species = Some("Monstera deliciosa".into());
        first.variety = Some("Albo".into());
        store.add(first).unwrap();

        // Same identity under normalization, different everything else
        let mut second = sample_plant("My other monstera");
        second.species = Some("  MONSTERA DELICIOSA ".into());
        second.variety = Some("albo".into());

        assert!(matches!(
            store.add(second),
            Err(PlantDbError::Duplicate { .. })
        ));
        assert_eq!(store.plants().len(), 1);
    }

    #[test]
    fn test_duplicate_by_name_when_species_absent() {
        let tmp = TempDir::new().unwrap();
        let mut store = open_store(&tmp);

        store.add(sample_plant("Jade Plant")).unwrap();
        let result = store.add(sample_plant("jade plant  "));
        assert!(matches!(result, Err(PlantDbError::Duplicate { .. })));
    }

    #[test]
    fn test_wishlist_promotion() {
        let tmp = TempDir::new().unwrap();
        let mut store = open_store(&tmp);

        let mut wished = sample_plant("Pink Princess");
        wished.status = Status::Wishlist;
        let wished_id = wished.id.clone();
        store.add(wished).unwrap();

        // Now I own it: same identity, owned status
        let owned = sample_plant("Pink Princess");
        let outcome = store.add(owned).unwrap();

        assert_eq!(outcome, AddOutcome::Promoted { id: wished_id.clone() });
        assert_eq!(store.plants().len(), 1);
        assert_eq!(store.get(&wished_id).unwrap().status, Status::Owned);
    }

    #[test]
    fn test_wishlist_add_onto_owned_conflicts() {
        let tmp = TempDir::new().unwrap();
        let mut store = open_store(&tmp);

        store.add(sample_plant("Aloe")).unwrap();

        // Wishing for a plant you already own is still a duplicate
        let mut wished = sample_plant("Aloe");
        wished.status = Status::Wishlist;
        assert!(store.add(wished).is_err());
    }

    #[test]
    fn test_update_replaces_fields() {
        let tmp = TempDir::new().unwrap();
        let mut store = open_store(&tmp);

        let plant = sample_plant("Fern");
        let id = plant.id.clone();
        store.add(plant).unwrap();

        let mut edited = store.get(&id).unwrap().clone();
        edited.watering_frequency = "Daily misting".into();
        edited.category = Category::Ferns;

        assert!(store.update(edited).unwrap());
        let current = store.get(&id).unwrap();
        assert_eq!(current.watering_frequency, "Daily misting");
        assert_eq!(current.category, Category::Ferns);
    }

    #[test]
    fn test_update_unknown_id_is_a_noop() {
        let tmp = TempDir::new().unwrap();
        let mut store = open_store(&tmp);
        store.add(sample_plant("Fern")).unwrap();

        let stranger = sample_plant("Stranger");
        assert!(!store.update(stranger).unwrap());
        assert_eq!(store.plants().len(), 1);
        assert_eq!(store.plants()[0].name, "Fern");
    }

    #[test]
    fn test_update_does_not_check_identity() {
        // Editing a record into an identity that add() would reject is
        // allowed; callers are trusted not to collide.
        let tmp = TempDir::new().unwrap();
        let mut store = open_store(&tmp);

        store.add(sample_plant("Aloe")).unwrap();
        let other = sample_plant("Jade");
        let other_id = other.id.clone();
        store.add(other).unwrap();

        let mut edited = store.get(&other_id).unwrap().clone();
        edited.name = "Aloe".into();
        assert!(store.update(edited).unwrap());
        assert_eq!(store.plants().len(), 2);
    }

    #[test]
    fn test_mark_owned() {
        let tmp = TempDir::new().unwrap();
        let mut store = open_store(&tmp);

        let mut wished = sample_plant("Hoya");
        wished.status = Status::Wishlist;
        let id = wished.id.clone();
        store.add(wished).unwrap();

        assert!(store.mark_owned(&id));
        assert_eq!(store.get(&id).unwrap().status, Status::Owned);
        assert!(!store.mark_owned("nope"));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let mut store = open_store(&tmp);

        let plant = sample_plant("Cactus");
        let id = plant.id.clone();
        store.add(plant).unwrap();
        store.add(sample_plant("Aloe")).unwrap();

        assert!(store.delete(&id));
        assert_eq!(store.plants().len(), 1);
        // Second delete of the same id changes nothing
        assert!(!store.delete(&id));
        assert_eq!(store.plants().len(), 1);
    }

    #[test]
    fn test_mutations_survive_reopen() {
        let tmp = TempDir::new().unwrap();
        let slot = tmp.path().join("plants.json");

        let plant = sample_plant("Monstera");
        {
            let mut store = Store::open(&slot);
            store.add(plant.clone()).unwrap();
        }

        // Fresh hydration from the same slot
        let store = Store::open(&slot);
        assert_eq!(store.plants(), &[plant]);
    }

    #[test]
    fn test_open_keeps_records_with_unrecognized_fields() {
        let tmp = TempDir::new().unwrap();
        let slot = tmp.path().join("plants.json");
        std::fs::write(&slot, r#"[{"name": "X", "category": "Weird"}]"#).unwrap();

        let store = Store::open(&slot);
        assert_eq!(store.plants().len(), 1);
        assert_eq!(store.plants()[0].name, "X");
        assert_eq!(store.plants()[0].category, Category::Indoor);
    }

    #[test]
    fn test_replace_all_discards_prior_collection() {
        let tmp = TempDir::new().unwrap();
        let mut store = open_store(&tmp);

        store.add(sample_plant("Old")).unwrap();
        let replacement = vec![sample_plant("New A"), sample_plant("New B")];
        store.replace_all(replacement.clone());

        assert_eq!(store.plants(), replacement.as_slice());
    }

    #[test]
    fn test_failed_import_preserves_collection() {
        let tmp = TempDir::new().unwrap();
        let mut store = open_store(&tmp);

        let plant = sample_plant("Keeper");
        store.add(plant.clone()).unwrap();

        assert!(store.import(r#"{"oops": true}"#).is_err());
        assert_eq!(store.plants(), &[plant.clone()]);

        // The slot was not touched either
        let reopened = Store::open(tmp.path().join("plants.json"));
        assert_eq!(reopened.plants(), &[plant]);
    }

    #[test]
    fn test_export_then_import_round_trips() {
        let tmp = TempDir::new().unwrap();
        let mut store = open_store(&tmp);

        let mut a = sample_plant("Monstera");
        a.species = Some("Monstera deliciosa".into());
        a.variety = Some("Thai Constellation".into());
        store.add(a).unwrap();
        let mut b = sample_plant("Hoya");
        b.status = Status::Wishlist;
        store.add(b).unwrap();

        let before = store.plants().to_vec();
        let exported = store.export().unwrap();
        let count = store.import(&exported).unwrap();

        assert_eq!(count, 2);
        assert_eq!(store.plants(), before.as_slice());
    }
}
