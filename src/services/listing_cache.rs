use std::sync::Arc;

use tokio::sync::RwLock;

pub enum Lookup {
    Hit(Arc<str>),
    /// Nothing cached; pass `generation` to [`ListingCache::store`].
    Miss { generation: u64 },
}

#[derive(Default)]
struct Slot {
    generation: u64,
    page: Option<Arc<str>>,
}

/// Rendered HTML of the unfiltered public listing.
///
/// Every successful upload calls [`ListingCache::invalidate`]. A render that
/// started before an invalidation is discarded by [`ListingCache::store`], so
/// a stale page never outlives the upload that made it stale.
#[derive(Clone, Default)]
pub struct ListingCache {
    slot: Arc<RwLock<Slot>>,
}

impl ListingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self) -> Lookup {
        let slot = self.slot.read().await;
        match &slot.page {
            Some(page) => Lookup::Hit(page.clone()),
            None => Lookup::Miss {
                generation: slot.generation,
            },
        }
    }

    pub async fn store(&self, generation: u64, page: Arc<str>) -> bool {
        let mut slot = self.slot.write().await;
        if slot.generation != generation {
            return false;
        }
        slot.page = Some(page);
        true
    }

    pub async fn invalidate(&self) {
        let mut slot = self.slot.write().await;
        slot.generation += 1;
        slot.page = None;
    }
}
