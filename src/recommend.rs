use std::sync::{Arc, RwLock};

use fnv::FnvHashMap;

use crate::errors::Error;
use crate::rankings::RankingTable;
use crate::stats::DataDictionary;

/// Immutable serving snapshot: the item id mappings plus the precomputed
/// ranking table. Lookups never touch the interaction or similarity matrices,
/// a request costs one hash lookup plus `top_n` decodes.
pub struct Recommender {
    item_indices: FnvHashMap<String, u32>,
    item_ids: Vec<String>,
    table: RankingTable,
}

impl Recommender {

    pub fn new(data_dict: &DataDictionary, table: RankingTable) -> Self {

        let mut item_indices: FnvHashMap<String, u32> =
            FnvHashMap::with_capacity_and_hasher(data_dict.num_items(), Default::default());
        let mut item_ids = vec![String::new(); data_dict.num_items()];

        for (name, index) in data_dict.item_entries() {
            item_indices.insert(name.to_string(), index);
            item_ids[index as usize] = name.to_string();
        }

        Recommender { item_indices, item_ids, table }
    }

    /// Rebuilds the snapshot from its persisted parts: the item ids in index
    /// order and the ranking table.
    pub fn from_parts(item_ids: Vec<String>, table: RankingTable) -> Self {

        let mut item_indices: FnvHashMap<String, u32> =
            FnvHashMap::with_capacity_and_hasher(item_ids.len(), Default::default());

        for (index, name) in item_ids.iter().enumerate() {
            item_indices.insert(name.clone(), index as u32);
        }

        Recommender { item_indices, item_ids, table }
    }

    pub fn num_items(&self) -> usize {
        self.item_ids.len()
    }

    pub fn item_ids(&self) -> &[String] {
        &self.item_ids
    }

    pub fn table(&self) -> &RankingTable {
        &self.table
    }

    pub fn item_name(&self, item_index: u32) -> Result<&str, Error> {
        self.item_ids
            .get(item_index as usize)
            .map(String::as_str)
            .ok_or(Error::UnknownIndex(item_index))
    }

    /// Returns the up to `top_n` items most similar to `item`, most similar
    /// first. The result never contains `item` itself and has no duplicates.
    pub fn recommend(&self, item: &str, top_n: usize) -> Result<Vec<String>, Error> {

        if top_n == 0 {
            return Err(Error::InvalidArgument(
                "top_n must be positive".to_string(),
            ));
        }

        let item_index = *self
            .item_indices
            .get(item)
            .ok_or_else(|| Error::UnknownItem(item.to_string()))?;

        let ranking = self.table.ranking(item_index as usize);
        let num_results = top_n.min(ranking.len());

        ranking[..num_results]
            .iter()
            .map(|&other_item| self.item_name(other_item).map(str::to_string))
            .collect()
    }
}

/// Swappable handle to the currently served snapshot. Readers clone the
/// `Arc` once per request and are then unaffected by a concurrent
/// [publish](ServingHandle::publish); they see either the full old snapshot
/// or the full new one, never a mix.
pub struct ServingHandle {
    current: RwLock<Arc<Recommender>>,
}

impl ServingHandle {

    pub fn new(recommender: Recommender) -> Self {
        ServingHandle {
            current: RwLock::new(Arc::new(recommender)),
        }
    }

    pub fn snapshot(&self) -> Arc<Recommender> {
        self.current.read().unwrap().clone()
    }

    /// Replaces the served snapshot. In-flight requests keep the snapshot
    /// they already hold.
    pub fn publish(&self, recommender: Recommender) {
        *self.current.write().unwrap() = Arc::new(recommender);
    }

    pub fn recommend(&self, item: &str, top_n: usize) -> Result<Vec<String>, Error> {
        self.snapshot().recommend(item, top_n)
    }
}
