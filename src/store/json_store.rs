//! Generic keyed in-memory collection with JSON file persistence.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::domain::foundation::DomainError;

/// Keyed in-memory collection.
///
/// The key-extraction function is injected at construction; the store never
/// derives keys itself and does not enforce uniqueness (callers construct
/// entities with fresh unique ids).
///
/// `save_to_file` writes the whole collection as indented JSON;
/// `load_from_file` is best-effort and resets to an empty collection when
/// the file is missing, empty or unparsable, so a first run with no prior
/// data never fails.
pub struct JsonStore<T, K> {
    items: Vec<T>,
    key_of: fn(&T) -> K,
}

impl<T, K> JsonStore<T, K>
where
    T: Clone + Serialize + DeserializeOwned,
    K: PartialEq,
{
    /// Creates an empty store around a key-extraction function.
    pub fn new(key_of: fn(&T) -> K) -> Self {
        Self {
            items: Vec::new(),
            key_of,
        }
    }

    /// Appends an entity to the collection.
    pub fn add(&mut self, entity: T) {
        self.items.push(entity);
    }

    /// Returns a clone of the first entity with the given key, if any.
    pub fn get(&self, key: &K) -> Option<T> {
        self.items.iter().find(|e| (self.key_of)(e) == *key).cloned()
    }

    /// Returns a snapshot copy of the whole collection. Mutating the
    /// returned vector does not affect the store.
    pub fn all(&self) -> Vec<T> {
        self.items.clone()
    }

    /// Replaces the stored entity whose key matches the given entity's key.
    ///
    /// # Errors
    ///
    /// Not-found error when no stored entity has that key.
    pub fn update(&mut self, entity: T, entity_name: &'static str) -> Result<(), DomainError>
    where
        K: ToString,
    {
        let key = (self.key_of)(&entity);
        match self.items.iter_mut().find(|e| (self.key_of)(e) == key) {
            Some(slot) => {
                *slot = entity;
                Ok(())
            }
            None => Err(DomainError::not_found(entity_name, key.to_string())),
        }
    }

    /// Removes the entity with the given key. Silent no-op when absent.
    pub fn remove(&mut self, key: &K) {
        self.items.retain(|e| (self.key_of)(e) != *key);
    }

    /// Number of entities in the collection.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Borrowing iterator for repository filters.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Serializes the full collection to indented JSON at `path`.
    ///
    /// # Errors
    ///
    /// Validation error on a blank path; storage error when serialization
    /// or the file write fails. In-memory state is untouched either way.
    pub fn save_to_file(&self, path: &Path) -> Result<(), DomainError> {
        if path.as_os_str().is_empty() {
            return Err(DomainError::validation("path", "file path cannot be empty"));
        }

        let json = serde_json::to_string_pretty(&self.items)
            .map_err(|e| DomainError::storage(format!("serialization failed: {}", e)))?;
        fs::write(path, json)
            .map_err(|e| DomainError::storage(format!("write to {} failed: {}", path.display(), e)))
    }

    /// Replaces the in-memory contents with the file's deserialized
    /// contents, best-effort: a missing, empty or unparsable file resets
    /// the store to an empty collection instead of failing the caller.
    /// A blank path leaves the store untouched.
    pub fn load_from_file(&mut self, path: &Path) {
        if path.as_os_str().is_empty() {
            return;
        }

        if !path.exists() {
            self.items = Vec::new();
            return;
        }

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "load failed, starting empty");
                self.items = Vec::new();
                return;
            }
        };

        if text.trim().is_empty() {
            self.items = Vec::new();
            return;
        }

        match serde_json::from_str::<Vec<T>>(&text) {
            Ok(items) => self.items = items,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unparsable file, starting empty");
                self.items = Vec::new();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Widget {
        id: String,
        label: String,
    }

    fn widget(id: &str, label: &str) -> Widget {
        Widget {
            id: id.to_string(),
            label: label.to_string(),
        }
    }

    fn store() -> JsonStore<Widget, String> {
        JsonStore::new(|w| w.id.clone())
    }

    #[test]
    fn add_then_get_returns_the_entity() {
        let mut s = store();
        s.add(widget("a", "first"));
        assert_eq!(s.get(&"a".to_string()), Some(widget("a", "first")));
        assert_eq!(s.get(&"missing".to_string()), None);
    }

    #[test]
    fn all_returns_an_independent_snapshot() {
        let mut s = store();
        s.add(widget("a", "first"));
        s.add(widget("b", "second"));

        let mut snapshot = s.all();
        snapshot.clear();

        assert_eq!(s.len(), 2);
    }

    #[test]
    fn update_replaces_matching_entity_in_place() {
        let mut s = store();
        s.add(widget("a", "before"));
        s.update(widget("a", "after"), "Widget").unwrap();
        assert_eq!(s.get(&"a".to_string()).unwrap().label, "after");
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn update_unknown_key_is_a_not_found_error() {
        let mut s = store();
        let err = s.update(widget("ghost", "x"), "Widget").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn remove_unknown_key_is_a_silent_no_op() {
        let mut s = store();
        s.add(widget("a", "first"));
        s.remove(&"ghost".to_string());
        assert_eq!(s.len(), 1);

        s.remove(&"a".to_string());
        assert!(s.is_empty());
    }

    #[test]
    fn save_then_load_round_trips_the_collection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("widgets.json");

        let mut s = store();
        s.add(widget("a", "first"));
        s.add(widget("b", "second"));
        s.save_to_file(&path).unwrap();

        let mut restored = store();
        restored.load_from_file(&path);
        assert_eq!(restored.all(), s.all());
    }

    #[test]
    fn save_writes_indented_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("widgets.json");

        let mut s = store();
        s.add(widget("a", "first"));
        s.save_to_file(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  "));
    }

    #[test]
    fn save_rejects_blank_path() {
        let s = store();
        let err = s.save_to_file(Path::new("")).unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[test]
    fn load_missing_file_resets_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = store();
        s.add(widget("a", "first"));
        s.load_from_file(&dir.path().join("nope.json"));
        assert!(s.is_empty());
    }

    #[test]
    fn load_empty_or_corrupt_file_resets_to_empty() {
        let dir = tempfile::tempdir().unwrap();

        for contents in ["", "   ", "{not json"] {
            let path = dir.path().join("widgets.json");
            fs::write(&path, contents).unwrap();

            let mut s = store();
            s.add(widget("a", "first"));
            s.load_from_file(&path);
            assert!(s.is_empty(), "contents {:?} should reset the store", contents);
        }
    }

    #[test]
    fn load_blank_path_leaves_store_untouched() {
        let mut s = store();
        s.add(widget("a", "first"));
        s.load_from_file(Path::new(""));
        assert_eq!(s.len(), 1);
    }

    proptest! {
        #[test]
        fn adding_n_entities_keeps_all_of_them(labels in prop::collection::vec("[a-z]{1,8}", 0..32)) {
            let mut s = store();
            for (i, label) in labels.iter().enumerate() {
                s.add(widget(&format!("id-{}", i), label));
            }
            let all = s.all();
            prop_assert_eq!(all.len(), labels.len());
            for (i, label) in labels.iter().enumerate() {
                prop_assert_eq!(&all[i].label, label);
            }
        }
    }
}
