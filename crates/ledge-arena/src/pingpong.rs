//! Double-buffered frame pair.
//!
//! [`FramePair`] holds two frames of identical capacity that alternate
//! between "staging" (this frame, writable) and "published" (last frame,
//! read-only) roles. On [`FramePair::publish`] the staging frame becomes
//! published and the old published frame becomes the next staging frame,
//! which is reset at the following [`FramePair::begin_tick`].
//!
//! No data is ever copied by the pair itself: carrying state forward is
//! the tick's job, done through the [`TickGuard`].

use crate::error::ArenaError;

/// A frame buffer that can be returned to its empty state.
pub trait FrameBuffer {
    /// Clear every allocation, leaving capacity untouched.
    fn reset(&mut self);
}

/// Tick guard providing write access to this frame and read access to the
/// last frame.
///
/// Created by [`FramePair::begin_tick()`] and dropped before
/// [`FramePair::publish()`]. The two references are split borrows of the
/// pair, so the last frame is statically read-only for the whole tick.
#[must_use]
pub struct TickGuard<'a, F> {
    /// The staging frame, freshly reset.
    pub this_frame: &'a mut F,
    /// The most recently published frame.
    pub last_frame: &'a F,
}

/// Two frames with ping-pong role swap.
///
/// # Buffer layout
///
/// ```text
/// frame_a  ←─── staging (even generations) / published (odd)
/// frame_b  ←─── published (even generations) / staging (odd)
/// ```
#[derive(Debug)]
pub struct FramePair<F> {
    /// Frame A.
    frame_a: F,
    /// Frame B.
    frame_b: F,
    /// Which frame is currently staging (false = A staging, true = B staging).
    b_is_staging: bool,
    /// Whether `begin_tick()` was called and `publish()` not yet.
    tick_in_progress: bool,
    /// Number of successful publishes.
    generation: u64,
}

impl<F: FrameBuffer> FramePair<F> {
    /// Create a pair from two empty frames of equal capacity.
    ///
    /// Frame B starts as the published frame, so the first tick reads an
    /// empty "last frame".
    pub fn new(frame_a: F, frame_b: F) -> Self {
        Self {
            frame_a,
            frame_b,
            b_is_staging: false,
            tick_in_progress: false,
            generation: 0,
        }
    }

    /// Begin a new tick, resetting the staging frame.
    ///
    /// Calling this again before `publish()` discards the previous staging
    /// contents.
    pub fn begin_tick(&mut self) -> TickGuard<'_, F> {
        self.tick_in_progress = true;
        if self.b_is_staging {
            Self::make_tick_guard(&mut self.frame_b, &self.frame_a)
        } else {
            Self::make_tick_guard(&mut self.frame_a, &self.frame_b)
        }
    }

    /// Helper to construct a TickGuard from split borrows.
    fn make_tick_guard<'a>(staging: &'a mut F, published: &'a F) -> TickGuard<'a, F> {
        staging.reset();
        TickGuard {
            this_frame: staging,
            last_frame: published,
        }
    }

    /// Publish the staging frame, making it the new "last frame".
    ///
    /// Returns `Err(NoTickInProgress)` if `begin_tick()` was not called
    /// first or if `publish()` is called twice in a row.
    pub fn publish(&mut self) -> Result<(), ArenaError> {
        if !self.tick_in_progress {
            return Err(ArenaError::NoTickInProgress);
        }
        self.tick_in_progress = false;
        self.b_is_staging = !self.b_is_staging;
        self.generation += 1;
        Ok(())
    }

    /// Abandon the current tick without publishing.
    ///
    /// The published frame is untouched; the staging frame will be reset
    /// by the next `begin_tick()`.
    pub fn abandon_tick(&mut self) {
        self.tick_in_progress = false;
    }

    /// The most recently published frame.
    pub fn last_frame(&self) -> &F {
        if self.b_is_staging {
            &self.frame_a
        } else {
            &self.frame_b
        }
    }

    /// Number of successful publishes.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a tick is in progress.
    pub fn is_tick_in_progress(&self) -> bool {
        self.tick_in_progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Arena;

    #[derive(Debug)]
    struct TestFrame {
        values: Arena<u32>,
        resets: u32,
    }

    impl TestFrame {
        fn new() -> Self {
            Self {
                values: Arena::new(8),
                resets: 0,
            }
        }
    }

    impl FrameBuffer for TestFrame {
        fn reset(&mut self) {
            self.values.reset();
            self.resets += 1;
        }
    }

    fn pair() -> FramePair<TestFrame> {
        FramePair::new(TestFrame::new(), TestFrame::new())
    }

    #[test]
    fn publish_without_begin_fails() {
        let mut frames = pair();
        assert_eq!(frames.publish(), Err(ArenaError::NoTickInProgress));
    }

    #[test]
    fn double_publish_fails() {
        let mut frames = pair();
        let _ = frames.begin_tick();
        frames.publish().unwrap();
        assert_eq!(frames.publish(), Err(ArenaError::NoTickInProgress));
    }

    #[test]
    fn staging_becomes_last_frame_after_publish() {
        let mut frames = pair();
        {
            let guard = frames.begin_tick();
            guard.this_frame.values.alloc_slice(1).unwrap()[0] = 42;
            assert!(guard.last_frame.values.as_slice().is_empty());
        }
        frames.publish().unwrap();
        assert_eq!(frames.last_frame().values.as_slice(), &[42]);
        assert_eq!(frames.generation(), 1);
    }

    #[test]
    fn roles_alternate_and_last_frame_is_untouched() {
        let mut frames = pair();
        for tick in 1..=6u32 {
            let guard = frames.begin_tick();
            let carried: u32 = guard.last_frame.values.as_slice().iter().sum();
            guard.this_frame.values.alloc_slice(1).unwrap()[0] = carried + tick;
            frames.publish().unwrap();
        }
        // 1 + 2 + ... + 6 accumulated through the alternating buffers.
        assert_eq!(frames.last_frame().values.as_slice(), &[21]);
        assert_eq!(frames.generation(), 6);
    }

    #[test]
    fn begin_tick_resets_only_staging() {
        let mut frames = pair();
        let _ = frames.begin_tick();
        frames.publish().unwrap();
        let _ = frames.begin_tick();
        frames.publish().unwrap();
        // Each frame was staging exactly once.
        assert_eq!(frames.frame_a.resets, 1);
        assert_eq!(frames.frame_b.resets, 1);
    }

    #[test]
    fn abandoned_tick_keeps_published_frame() {
        let mut frames = pair();
        {
            let guard = frames.begin_tick();
            guard.this_frame.values.alloc_slice(1).unwrap()[0] = 7;
        }
        frames.publish().unwrap();
        {
            let guard = frames.begin_tick();
            guard.this_frame.values.alloc_slice(1).unwrap()[0] = 99;
        }
        frames.abandon_tick();
        assert!(!frames.is_tick_in_progress());
        assert_eq!(frames.last_frame().values.as_slice(), &[7]);
        assert_eq!(frames.generation(), 1);
    }
}
