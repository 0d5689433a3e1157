//! S3-FIFO cache simulator
//!
//! Three FIFO queues over object ids:
//!
//! - **small**: admission queue, about 10% of capacity; new objects land here
//! - **main**: the bulk of capacity; objects re-accessed while in small move here
//! - **ghost**: ids only (no slot), remembers recent evictions from small
//!
//! An object seen only once leaves through the small queue without ever
//! touching main, which is what makes the policy resistant to scans. A miss on
//! an id still in the ghost goes straight to main.
//!
//! Each cached object carries a 2-bit access frequency (capped at 3). Main
//! eviction is CLOCK-like: an object with frequency > 0 is reinserted with
//! its frequency decremented instead of being dropped.
//!
//! Only hit/miss behaviour is modelled; there are no values.

use std::collections::{HashMap, VecDeque};

const MAX_FREQ: u8 = 3;

/// Upper bound on slots reserved up front; queues grow on demand past it
const PREALLOC_LIMIT: usize = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Queue {
    Small,
    Main,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    freq: u8,
    queue: Queue,
}

/// Snapshot of cache statistics
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Objects dropped from the cache
    pub evictions: u64,
    /// Objects moved from small to main
    pub promotions: u64,
    /// Misses admitted straight to main because the id was in the ghost
    pub ghost_hits: u64,
}

/// S3-FIFO cache over `u64` object ids
pub struct S3FifoCache {
    small: VecDeque<u64>,
    main: VecDeque<u64>,
    /// (id, generation); entries whose generation no longer matches are stale
    ghost: VecDeque<(u64, u64)>,
    ghost_index: HashMap<u64, u64>,
    ghost_generation: u64,
    entries: HashMap<u64, Entry>,
    small_capacity: usize,
    main_capacity: usize,
    stats: CacheStats,
}

impl S3FifoCache {
    /// Create a cache holding `capacity` objects, `small_ratio` of them in the small queue
    ///
    /// The small queue gets `max(1, round(capacity * small_ratio))` slots and
    /// main gets the rest, at least one. The ghost remembers as many ids as
    /// main holds.
    ///
    /// # Panics
    /// Panics if `capacity < 2` or `small_ratio` is not in `(0, 1)`.
    pub fn new(capacity: usize, small_ratio: f64) -> Self {
        assert!(capacity >= 2, "cache capacity must be >= 2");
        assert!(
            small_ratio > 0.0 && small_ratio < 1.0,
            "small_ratio must be in (0, 1)"
        );

        let small_capacity = ((capacity as f64 * small_ratio).round() as usize).clamp(1, capacity - 1);
        let main_capacity = capacity - small_capacity;

        let reserve = |n: usize| n.min(PREALLOC_LIMIT);
        Self {
            small: VecDeque::with_capacity(reserve(small_capacity + 1)),
            main: VecDeque::with_capacity(reserve(main_capacity + 1)),
            ghost: VecDeque::with_capacity(reserve(main_capacity)),
            ghost_index: HashMap::with_capacity(reserve(main_capacity)),
            ghost_generation: 0,
            entries: HashMap::with_capacity(reserve(capacity)),
            small_capacity,
            main_capacity,
            stats: CacheStats::default(),
        }
    }

    /// Access `id`; returns true on a hit
    ///
    /// A miss admits the object, evicting as needed.
    pub fn access(&mut self, id: u64) -> bool {
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.freq = (entry.freq + 1).min(MAX_FREQ);
            self.stats.hits += 1;
            return true;
        }
        self.stats.misses += 1;
        self.admit(id);
        false
    }

    /// Whether `id` is currently cached (does not count as an access)
    pub fn contains(&self, id: u64) -> bool {
        self.entries.contains_key(&id)
    }

    /// Whether `id` is cached in the main queue
    pub fn in_main(&self, id: u64) -> bool {
        matches!(self.entries.get(&id), Some(e) if e.queue == Queue::Main)
    }

    /// Whether `id` is remembered by the ghost queue
    pub fn in_ghost(&self, id: u64) -> bool {
        self.ghost_index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.small_capacity + self.main_capacity
    }

    pub fn small_capacity(&self) -> usize {
        self.small_capacity
    }

    pub fn main_capacity(&self) -> usize {
        self.main_capacity
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.clone()
    }

    fn admit(&mut self, id: u64) {
        // Checked before evicting, which may push this id out of a full ghost
        let from_ghost = self.ghost_index.remove(&id).is_some();

        while self.entries.len() >= self.capacity() {
            self.evict();
        }

        // The first access counts, so a later hit makes freq 2 and earns promotion
        if from_ghost {
            self.stats.ghost_hits += 1;
            self.main.push_back(id);
            self.entries.insert(id, Entry { freq: 1, queue: Queue::Main });
        } else {
            self.small.push_back(id);
            self.entries.insert(id, Entry { freq: 1, queue: Queue::Small });
        }
    }

    fn evict(&mut self) {
        if self.small.len() >= self.small_capacity {
            self.evict_small();
        } else {
            self.evict_main();
        }
    }

    /// Evict from small until one object has left the cache or small is empty
    fn evict_small(&mut self) {
        while let Some(id) = self.small.pop_front() {
            let Some(entry) = self.entries.get_mut(&id) else {
                continue;
            };
            if entry.freq > 1 {
                entry.freq = 0;
                entry.queue = Queue::Main;
                self.stats.promotions += 1;
                if self.main.len() >= self.main_capacity {
                    self.evict_main();
                }
                self.main.push_back(id);
            } else {
                self.entries.remove(&id);
                self.stats.evictions += 1;
                self.remember(id);
                return;
            }
        }
    }

    /// Evict the oldest main object with no remaining frequency
    fn evict_main(&mut self) {
        while let Some(id) = self.main.pop_front() {
            let Some(entry) = self.entries.get_mut(&id) else {
                continue;
            };
            if entry.freq > 0 {
                entry.freq -= 1;
                self.main.push_back(id);
            } else {
                self.entries.remove(&id);
                self.stats.evictions += 1;
                return;
            }
        }
    }

    fn remember(&mut self, id: u64) {
        while self.ghost_index.len() >= self.main_capacity {
            match self.ghost.pop_front() {
                Some((old, generation)) => {
                    if self.ghost_index.get(&old) == Some(&generation) {
                        self.ghost_index.remove(&old);
                    }
                }
                None => break,
            }
        }

        self.ghost_generation += 1;
        self.ghost.push_back((id, self.ghost_generation));
        self.ghost_index.insert(id, self.ghost_generation);

        // Ghost hits leave stale deque entries behind; drop them once they dominate
        if self.ghost.len() > 2 * self.main_capacity.max(1) {
            let index = &self.ghost_index;
            self.ghost.retain(|(key, generation)| index.get(key) == Some(generation));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_sizing() {
        let cache = S3FifoCache::new(100, 0.1);
        assert_eq!(cache.small_capacity(), 10);
        assert_eq!(cache.main_capacity(), 90);
        assert_eq!(cache.capacity(), 100);

        let tiny = S3FifoCache::new(2, 0.01);
        assert_eq!(tiny.small_capacity(), 1);
        assert_eq!(tiny.main_capacity(), 1);

        let lopsided = S3FifoCache::new(4, 0.99);
        assert_eq!(lopsided.small_capacity(), 3);
        assert_eq!(lopsided.main_capacity(), 1);
    }

    #[test]
    fn test_hit_after_miss() {
        let mut cache = S3FifoCache::new(10, 0.1);
        assert!(!cache.access(7));
        assert!(cache.access(7));
        assert!(cache.contains(7));
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let mut cache = S3FifoCache::new(10, 0.2);
        for i in 0..1000u64 {
            cache.access(i % 37);
            cache.access(i % 5);
            assert!(cache.len() <= 10, "len {} at step {}", cache.len(), i);
        }
    }

    #[test]
    fn test_one_hit_wonders_skip_main() {
        let mut cache = S3FifoCache::new(10, 0.1);
        for id in 0..100u64 {
            cache.access(id);
        }
        for id in 0..100u64 {
            assert!(!cache.in_main(id), "one-time id {id} reached main");
        }
        assert_eq!(cache.stats().promotions, 0);
    }

    #[test]
    fn test_reaccessed_object_is_promoted_and_survives_scan() {
        let mut cache = S3FifoCache::new(10, 0.1);
        cache.access(1000);
        cache.access(1000);

        // Scan pushes 1000 out of small; its second access earns main
        for id in 0..50u64 {
            cache.access(id);
        }
        assert!(cache.in_main(1000));
        assert!(cache.access(1000));
        assert_eq!(cache.stats().promotions, 1);
    }

    #[test]
    fn test_ghost_readmits_to_main() {
        let mut cache = S3FifoCache::new(10, 0.1);
        // Ten ids fill the cache; the eleventh pushes 0 out of small into the ghost
        for id in 0..=10u64 {
            cache.access(id);
        }
        assert!(!cache.contains(0));
        assert!(cache.in_ghost(0));

        assert!(!cache.access(0));
        assert!(cache.in_main(0));
        assert!(!cache.in_ghost(0));
        assert_eq!(cache.stats().ghost_hits, 1);
    }

    #[test]
    fn test_ghost_is_bounded() {
        let mut cache = S3FifoCache::new(10, 0.1);
        for id in 0..10_000u64 {
            cache.access(id);
            // Re-touch ghosts now and then to create stale entries
            if id % 3 == 0 && id > 2 {
                cache.access(id - 2);
            }
        }
        assert!(cache.ghost_index.len() <= cache.main_capacity());
        assert!(cache.ghost.len() <= 2 * cache.main_capacity() + 1);
    }

    #[test]
    fn test_main_reinserts_frequent_objects() {
        // small = 1, main = 3
        let mut cache = S3FifoCache::new(4, 0.25);
        let mut next_filler = 100u64;
        let mut fill = |cache: &mut S3FifoCache, count: usize| {
            for _ in 0..count {
                cache.access(next_filler);
                next_filler += 1;
            }
        };

        // Each hot id is hit twice, then fillers push it out of small into main
        cache.access(1);
        cache.access(1);
        fill(&mut cache, 3);
        cache.access(2);
        cache.access(2);
        fill(&mut cache, 2);
        cache.access(3);
        cache.access(3);
        fill(&mut cache, 2);
        assert!(cache.in_main(1) && cache.in_main(2) && cache.in_main(3));

        // 1 gets one more hit, so the next main eviction spares it and drops 2
        cache.access(1);
        cache.access(4);
        cache.access(4);
        cache.access(5);
        assert!(cache.in_main(1));
        assert!(!cache.contains(2));
        assert!(cache.in_main(3));
        assert!(cache.in_main(4));
        assert!(cache.contains(5));
    }

    #[test]
    fn test_huge_capacity_allocates_lazily() {
        let mut cache = S3FifoCache::new(usize::MAX / 4, 0.1);
        assert_eq!(cache.capacity(), usize::MAX / 4);
        assert!(!cache.access(1));
        assert!(cache.access(1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    #[should_panic(expected = "cache capacity must be >= 2")]
    fn test_capacity_too_small() {
        let _ = S3FifoCache::new(1, 0.1);
    }

    #[test]
    #[should_panic(expected = "small_ratio must be in (0, 1)")]
    fn test_bad_ratio() {
        let _ = S3FifoCache::new(10, 1.0);
    }
}
