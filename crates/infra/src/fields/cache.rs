use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{FieldKey, SelectField};

/// Memo of introspected field lists, keyed by `(table, alias)`.
///
/// Entries are never invalidated: the extension-table schema is assumed stable
/// for the lifetime of the owner. Lists are stored whole, so a reader sees
/// either no entry or a complete one.
#[derive(Debug, Default)]
pub struct FieldCache {
    entries: RwLock<HashMap<FieldKey, Arc<[SelectField]>>>,
}

impl FieldCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &FieldKey) -> Option<Arc<[SelectField]>> {
        let entries = self.entries.read().ok()?;
        entries.get(key).cloned()
    }

    /// Store `fields` under `key` unless an entry already exists, and return
    /// the stored entry.
    ///
    /// Two callers racing on the same cold key both introspect; the first to
    /// insert wins and both observe the same list afterwards.
    pub fn get_or_insert(&self, key: FieldKey, fields: Vec<SelectField>) -> Arc<[SelectField]> {
        let fields: Arc<[SelectField]> = fields.into();
        match self.entries.write() {
            Ok(mut entries) => entries.entry(key).or_insert(fields).clone(),
            Err(_) => fields,
        }
    }

    pub fn contains(&self, key: &FieldKey) -> bool {
        self.entries
            .read()
            .map(|entries| entries.contains_key(key))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_insert_wins() {
        let cache = FieldCache::new();
        let key = FieldKey::new("s_articles_attributes", "attribute");

        let first = cache.get_or_insert(key.clone(), vec![SelectField::new("attribute", "id")]);
        let second = cache.get_or_insert(key.clone(), vec![SelectField::new("attribute", "other")]);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second[0].column(), "id");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn keys_distinguish_alias() {
        let cache = FieldCache::new();
        cache.get_or_insert(FieldKey::new("t", "a"), vec![]);

        assert!(cache.contains(&FieldKey::new("t", "a")));
        assert!(!cache.contains(&FieldKey::new("t", "b")));
        assert!(cache.get(&FieldKey::new("t", "b")).is_none());
    }
}
