//! Fixed-capacity entity store with a LIFO free list.
//!
//! Slots are bump-allocated from an [`Arena<Entity>`]; the cursor is the
//! store's high-water mark. Deleting an entity only clears its kind. The
//! end-of-tick [`EntityStore::reclaim_deleted`] sweep pushes cleared
//! slots onto the free stack, and [`EntityStore::create`] pops from that
//! stack before growing the arena.
//!
//! [`EntityStore::copy_forward`] carries the previous frame's store into a
//! freshly reset one slot for slot, so every [`EntityIndex`] keeps naming
//! the same entity across ticks.

use ledge_arena::Arena;
use ledge_core::{EntityIndex, EntityKind, StepError};

use crate::entity::Entity;

/// Entity slots for one frame.
#[derive(Clone, Debug)]
pub struct EntityStore {
    /// Entity slots; `arena.used()` is the high-water mark.
    arena: Arena<Entity>,
    /// Free slots, most recently freed last.
    free: Vec<EntityIndex>,
    /// `free_mask[i]` is true iff slot `i` is on the free stack.
    free_mask: Vec<bool>,
}

impl EntityStore {
    /// An empty store with room for `capacity` slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            arena: Arena::new(capacity),
            free: Vec::with_capacity(capacity),
            free_mask: vec![false; capacity],
        }
    }

    // ── Lifecycle ───────────────────────────────────────────────

    /// Hand out a zeroed slot (kind None).
    ///
    /// Reuses the most recently freed slot if there is one, otherwise
    /// grows the store by one. Fails once the store is full.
    pub fn create(&mut self) -> Result<EntityIndex, StepError> {
        if let Some(index) = self.free.pop() {
            self.free_mask[index.as_usize()] = false;
            self.arena.as_mut_slice()[index.as_usize()] = Entity::default();
            return Ok(index);
        }
        match self.arena.alloc(1) {
            Ok(span) => Ok(EntityIndex(span.offset as u32)),
            Err(_) => Err(StepError::EntityCapacityExceeded {
                capacity: self.arena.capacity(),
            }),
        }
    }

    /// Create a slot and store `entity` in it.
    pub fn spawn(&mut self, entity: Entity) -> Result<EntityIndex, StepError> {
        let index = self.create()?;
        *self.entity_mut(index)? = entity;
        Ok(index)
    }

    /// Mark the entity at `index` deleted.
    ///
    /// The slot stays out of circulation until the next
    /// [`reclaim_deleted`](Self::reclaim_deleted).
    pub fn delete(&mut self, index: EntityIndex) -> Result<(), StepError> {
        self.entity_mut(index)?.kind = EntityKind::None;
        Ok(())
    }

    /// Fill this (empty) store from the previous frame's store.
    ///
    /// Allocates as many slots as `last` has, copies each living entity
    /// to the same index, and inherits the free stack.
    pub fn copy_forward(&mut self, last: &EntityStore) -> Result<(), StepError> {
        self.clear();
        let slots = self.arena.alloc_slice(last.high_water())?;
        for (dst, src) in slots.iter_mut().zip(last.entities()) {
            if src.is_alive() {
                *dst = *src;
            }
        }
        self.free.extend_from_slice(&last.free);
        for index in &self.free {
            self.free_mask[index.as_usize()] = true;
        }
        Ok(())
    }

    /// Push every deleted slot that is not already free onto the free
    /// stack, in ascending index order. Returns how many were pushed.
    pub fn reclaim_deleted(&mut self) -> usize {
        let mut reclaimed = 0;
        for (i, entity) in self.arena.as_slice().iter().enumerate() {
            if !entity.is_alive() && !self.free_mask[i] {
                self.free_mask[i] = true;
                self.free.push(EntityIndex(i as u32));
                reclaimed += 1;
            }
        }
        reclaimed
    }

    /// Drop every slot and the free stack.
    pub fn clear(&mut self) {
        self.arena.reset();
        self.free.clear();
        self.free_mask.fill(false);
    }

    // ── Access ──────────────────────────────────────────────────

    /// The entity at `index`, or `None` past the high-water mark.
    #[inline]
    pub fn get(&self, index: EntityIndex) -> Option<&Entity> {
        self.arena.as_slice().get(index.as_usize())
    }

    /// Mutable access to the entity at `index`.
    #[inline]
    pub fn get_mut(&mut self, index: EntityIndex) -> Option<&mut Entity> {
        self.arena.as_mut_slice().get_mut(index.as_usize())
    }

    /// The entity at `index`, or `IndexOutOfRange`.
    pub fn entity(&self, index: EntityIndex) -> Result<&Entity, StepError> {
        let high_water = self.high_water();
        self.get(index).ok_or(StepError::IndexOutOfRange {
            index: index.0,
            high_water,
        })
    }

    /// Mutable access to the entity at `index`, or `IndexOutOfRange`.
    pub fn entity_mut(&mut self, index: EntityIndex) -> Result<&mut Entity, StepError> {
        let high_water = self.high_water();
        self.get_mut(index).ok_or(StepError::IndexOutOfRange {
            index: index.0,
            high_water,
        })
    }

    /// Every slot below the high-water mark, deleted ones included.
    #[inline]
    pub fn entities(&self) -> &[Entity] {
        self.arena.as_slice()
    }

    /// Mutable access to every slot below the high-water mark.
    #[inline]
    pub fn entities_mut(&mut self) -> &mut [Entity] {
        self.arena.as_mut_slice()
    }

    /// Living entities with their slots, in index order.
    pub fn iter_live(&self) -> impl Iterator<Item = (EntityIndex, &Entity)> {
        self.arena
            .as_slice()
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_alive())
            .map(|(i, e)| (EntityIndex(i as u32), e))
    }

    /// Number of living entities.
    pub fn live_count(&self) -> usize {
        self.iter_live().count()
    }

    /// Number of living entities of `kind`.
    pub fn count_kind(&self, kind: EntityKind) -> usize {
        self.arena
            .as_slice()
            .iter()
            .filter(|e| e.kind == kind && kind.is_alive())
            .count()
    }

    /// The free stack, bottom first.
    #[inline]
    pub fn free_slots(&self) -> &[EntityIndex] {
        &self.free
    }

    /// Number of slots ever handed out in this frame's lineage.
    #[inline]
    pub fn high_water(&self) -> usize {
        self.arena.used()
    }

    /// Maximum number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }
}
