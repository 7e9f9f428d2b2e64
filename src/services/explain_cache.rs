//! Bounded TTL cache for generation explanations.
//!
//! Owned by the engine and injected where needed; the engine itself stays
//! stateless apart from this diagnostic buffer and the persisted stores.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::domain::models::GenerationExplanation;

struct CacheEntry {
    stored_at: Instant,
    explanation: GenerationExplanation,
}

/// Explanations keyed by assembly id, evicted by TTL and capacity.
pub struct ExplainCache {
    entries: Mutex<CacheState>,
    ttl: Duration,
    capacity: usize,
}

struct CacheState {
    by_id: HashMap<Uuid, CacheEntry>,
    insertion_order: VecDeque<Uuid>,
}

impl ExplainCache {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: Mutex::new(CacheState {
                by_id: HashMap::new(),
                insertion_order: VecDeque::new(),
            }),
            ttl,
            capacity: capacity.max(1),
        }
    }

    pub fn insert(&self, explanation: GenerationExplanation) {
        let mut state = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let id = explanation.assembly_id;
        state.by_id.insert(
            id,
            CacheEntry {
                stored_at: Instant::now(),
                explanation,
            },
        );
        state.insertion_order.push_back(id);

        while state.insertion_order.len() > self.capacity {
            if let Some(oldest) = state.insertion_order.pop_front() {
                state.by_id.remove(&oldest);
            }
        }
    }

    pub fn get(&self, assembly_id: Uuid) -> Option<GenerationExplanation> {
        let mut state = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let fresh = state
            .by_id
            .get(&assembly_id)
            .map(|entry| entry.stored_at.elapsed() <= self.ttl)?;

        if fresh {
            state
                .by_id
                .get(&assembly_id)
                .map(|entry| entry.explanation.clone())
        } else {
            state.by_id.remove(&assembly_id);
            state.insertion_order.retain(|id| *id != assembly_id);
            None
        }
    }

    pub fn len(&self) -> usize {
        let state = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        state.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
