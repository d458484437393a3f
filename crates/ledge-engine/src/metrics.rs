//! Per-tick performance metrics.
//!
//! [`TickStats`] is filled in by [`update_game`](crate::update_game) as
//! the phases run; the driver folds it into a [`StepMetrics`] after the
//! frame is published.

/// Phase timings and counters recorded inside one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Time spent building the overlap graph, in microseconds.
    pub overlap_us: u64,
    /// Time spent running entity behaviors, in microseconds.
    pub behavior_us: u64,
    /// Number of overlap events produced.
    pub overlap_events: usize,
    /// Statics removed by the cull pass.
    pub culled: usize,
    /// Slots returned to the free list at the end of the tick.
    pub reclaimed: usize,
}

/// Timing and occupancy metrics for a single step.
///
/// All durations are in microseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Wall-clock time for the entire step, in microseconds.
    pub total_us: u64,
    /// Time spent building the overlap graph, in microseconds.
    pub overlap_us: u64,
    /// Time spent running entity behaviors, in microseconds.
    pub behavior_us: u64,
    /// Number of overlap events produced this tick.
    pub overlap_events: usize,
    /// Living entities in the published frame.
    pub live_entities: usize,
    /// Slots on the free list of the published frame.
    pub free_slots: usize,
    /// Frame generation after this step's publish.
    pub generation: u64,
}

impl StepMetrics {
    /// Combine the in-tick stats with the published frame's occupancy.
    pub fn from_tick(
        stats: TickStats,
        total_us: u64,
        live_entities: usize,
        free_slots: usize,
        generation: u64,
    ) -> Self {
        Self {
            total_us,
            overlap_us: stats.overlap_us,
            behavior_us: stats.behavior_us,
            overlap_events: stats.overlap_events,
            live_entities,
            free_slots,
            generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = StepMetrics::default();
        assert_eq!(m.total_us, 0);
        assert_eq!(m.overlap_us, 0);
        assert_eq!(m.behavior_us, 0);
        assert_eq!(m.overlap_events, 0);
        assert_eq!(m.live_entities, 0);
        assert_eq!(m.free_slots, 0);
        assert_eq!(m.generation, 0);
    }

    #[test]
    fn from_tick_copies_phase_fields() {
        let stats = TickStats {
            overlap_us: 3,
            behavior_us: 7,
            overlap_events: 2,
            culled: 1,
            reclaimed: 4,
        };
        let m = StepMetrics::from_tick(stats, 12, 9, 4, 5);
        assert_eq!(m.overlap_us, 3);
        assert_eq!(m.behavior_us, 7);
        assert_eq!(m.overlap_events, 2);
        assert_eq!(m.total_us, 12);
        assert_eq!(m.live_entities, 9);
        assert_eq!(m.free_slots, 4);
        assert_eq!(m.generation, 5);
    }
}
