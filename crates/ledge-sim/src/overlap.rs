//! Overlap events filtered by a kind-interest table.
//!
//! Every tick, [`OverlapGraph::build`] tests each unordered pair of living
//! entities whose kinds are of interest to each other and records an
//! [`OverlapEvent`] for each side that cares. Events are stored as a flat
//! adjacency list (per-entity offsets into one event buffer) in scratch
//! regions that are reset at the start of every build, so no event
//! survives into the next tick.

use indexmap::IndexMap;
use ledge_arena::ScratchRegion;
use ledge_core::{EntityIndex, EntityKind, KindSet, Rect};
use serde::Deserialize;

use crate::collision::overlap;
use crate::store::EntityStore;

// ── InterestTable ───────────────────────────────────────────────

/// Which kinds each kind wants overlap events about.
///
/// Deserialises from a TOML table mapping a kind to the kinds it cares
/// about:
///
/// ```toml
/// monster = ["projectile", "player_attack", "spike"]
/// player = ["door"]
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "IndexMap<EntityKind, Vec<EntityKind>>")]
pub struct InterestTable {
    rows: [KindSet; EntityKind::COUNT],
}

impl InterestTable {
    /// A table in which no kind cares about anything.
    pub fn empty() -> Self {
        Self {
            rows: [KindSet::EMPTY; EntityKind::COUNT],
        }
    }

    /// Builder: make `kind` care about every kind in `others`.
    pub fn with(mut self, kind: EntityKind, others: impl IntoIterator<Item = EntityKind>) -> Self {
        let row = &mut self.rows[kind.ordinal()];
        for other in others {
            row.insert(other);
        }
        self
    }

    /// Whether `kind` wants events about overlapping `other`.
    #[inline]
    pub fn cares(&self, kind: EntityKind, other: EntityKind) -> bool {
        self.rows[kind.ordinal()].contains(other)
    }

    /// The kinds `kind` cares about.
    pub fn row(&self, kind: EntityKind) -> KindSet {
        self.rows[kind.ordinal()]
    }
}

impl Default for InterestTable {
    fn default() -> Self {
        Self::empty()
            .with(
                EntityKind::Monster,
                [EntityKind::Projectile, EntityKind::PlayerAttack, EntityKind::Spike],
            )
            .with(EntityKind::Player, [EntityKind::Door])
    }
}

impl From<IndexMap<EntityKind, Vec<EntityKind>>> for InterestTable {
    fn from(map: IndexMap<EntityKind, Vec<EntityKind>>) -> Self {
        map.into_iter()
            .fold(Self::empty(), |table, (kind, others)| table.with(kind, others))
    }
}

// ── OverlapGraph ────────────────────────────────────────────────

/// One entity's view of an overlap with another.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OverlapEvent {
    /// Kind of the other entity when the graph was built.
    pub other_kind: EntityKind,
    /// Slot of the other entity.
    pub other: EntityIndex,
    /// The intersection rectangle.
    pub overlap: Rect,
}

/// Per-tick overlap events in adjacency-list form.
#[derive(Clone, Debug)]
pub struct OverlapGraph {
    /// Events in discovery order, tagged with the slot they belong to.
    pending: ScratchRegion<(EntityIndex, OverlapEvent)>,
    /// `offsets[i]..offsets[i + 1]` is slot `i`'s range in `events`.
    offsets: ScratchRegion<u32>,
    /// Next write position per slot while scattering.
    fill: ScratchRegion<u32>,
    /// Events grouped by owning slot.
    events: ScratchRegion<OverlapEvent>,
}

impl OverlapGraph {
    /// An empty graph whose scratch starts with room for `capacity`
    /// elements per region.
    pub fn new(capacity: usize) -> Self {
        Self {
            pending: ScratchRegion::new(capacity),
            offsets: ScratchRegion::new(capacity),
            fill: ScratchRegion::new(capacity),
            events: ScratchRegion::new(capacity),
        }
    }

    /// Discard every event.
    pub fn clear(&mut self) {
        self.pending.reset();
        self.offsets.reset();
        self.fill.reset();
        self.events.reset();
    }

    /// Rebuild the graph from the living entities of `store`.
    ///
    /// For each pair `i < j` where either side cares about the other's
    /// kind, an event is recorded for `i` if `i` cares and for `j` if `j`
    /// cares. Within one slot's list, events keep discovery order.
    pub fn build(&mut self, store: &EntityStore, table: &InterestTable) {
        self.clear();
        let entities = store.entities();
        let slots = entities.len();

        for (i, a) in entities.iter().enumerate() {
            if !a.is_alive() {
                continue;
            }
            for (j, b) in entities.iter().enumerate().skip(i + 1) {
                if !b.is_alive() {
                    continue;
                }
                let a_cares = table.cares(a.kind, b.kind);
                let b_cares = table.cares(b.kind, a.kind);
                if !(a_cares || b_cares) {
                    continue;
                }
                let Some(rect) = overlap(&a.rect, &b.rect) else {
                    continue;
                };
                if a_cares {
                    self.pending.push((
                        EntityIndex(i as u32),
                        OverlapEvent {
                            other_kind: b.kind,
                            other: EntityIndex(j as u32),
                            overlap: rect,
                        },
                    ));
                }
                if b_cares {
                    self.pending.push((
                        EntityIndex(j as u32),
                        OverlapEvent {
                            other_kind: a.kind,
                            other: EntityIndex(i as u32),
                            overlap: rect,
                        },
                    ));
                }
            }
        }

        // Counting sort of the pending events by owner.
        for _ in 0..=slots {
            self.offsets.push(0);
        }
        let offsets = self.offsets.as_mut_slice();
        for (owner, _) in self.pending.as_slice() {
            offsets[owner.as_usize() + 1] += 1;
        }
        for i in 0..slots {
            offsets[i + 1] += offsets[i];
        }
        for i in 0..slots {
            self.fill.push(offsets[i]);
        }
        for _ in 0..self.pending.used() {
            self.events.push(OverlapEvent::default());
        }
        let fill = self.fill.as_mut_slice();
        let events = self.events.as_mut_slice();
        for &(owner, event) in self.pending.as_slice() {
            let at = &mut fill[owner.as_usize()];
            events[*at as usize] = event;
            *at += 1;
        }
    }

    /// Events owned by `index`, in discovery order.
    pub fn events_for(&self, index: EntityIndex) -> &[OverlapEvent] {
        let offsets = self.offsets.as_slice();
        let i = index.as_usize();
        match (offsets.get(i), offsets.get(i + 1)) {
            (Some(&start), Some(&end)) => &self.events.as_slice()[start as usize..end as usize],
            _ => &[],
        }
    }

    /// Total number of events recorded by the last build.
    pub fn event_count(&self) -> usize {
        self.events.used()
    }
}
