//! Staggered release of queued letters into the jar.

use std::collections::VecDeque;

use rand::Rng;

use crate::core::Vec2;
use crate::domain::{Letter, SpawnArea};

/// Spawn height above the spawn line, before scatter
const SPAWN_LIFT: f32 = 30.0;
/// Extra random height so letters do not arrive in a flat row
const SPAWN_SCATTER: f32 = 40.0;
/// Horizontal launch speed range is `-SPAWN_VX..SPAWN_VX`
const SPAWN_VX: f32 = 45.0;
/// Vertical launch speed range is `-SPAWN_VY..0` (upward)
const SPAWN_VY: f32 = 60.0;

/// Everything needed to create a body for one dequeued letter.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnRequest {
    pub letter: Letter,
    pub pos: Vec2,
    pub velocity: Vec2,
}

/// FIFO of letters waiting to drop, released one per interval.
#[derive(Clone, Debug)]
pub struct SpawnScheduler {
    queue: VecDeque<Letter>,
    interval_ms: f64,
    last_spawn_ms: Option<f64>,
}

impl SpawnScheduler {
    /// Letters past `max_slice` are dropped.
    pub fn new(letters: Vec<Letter>, max_slice: usize, interval_ms: f32) -> Self {
        let mut scheduler = Self {
            queue: VecDeque::new(),
            interval_ms: interval_ms as f64,
            last_spawn_ms: None,
        };
        scheduler.refill(letters, max_slice);
        scheduler
    }

    /// Replace the queue and restart the cadence.
    pub fn refill(&mut self, letters: Vec<Letter>, max_slice: usize) {
        let dropped = letters.len().saturating_sub(max_slice);
        if dropped > 0 {
            log::warn!("spawn queue capped at {} letters, {} dropped", max_slice, dropped);
        }
        self.queue.clear();
        self.queue.extend(letters.into_iter().take(max_slice));
        self.last_spawn_ms = None;
    }

    pub fn push(&mut self, letter: Letter) {
        self.queue.push_back(letter);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Release the front letter if a full interval has passed since the last
    /// release. The first release after construction or a refill happens on
    /// the first tick.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        now_ms: f64,
        rng: &mut R,
        area: &SpawnArea,
    ) -> Option<SpawnRequest> {
        if let Some(last) = self.last_spawn_ms {
            if now_ms - last < self.interval_ms {
                return None;
            }
        }
        let letter = self.queue.pop_front()?;
        self.last_spawn_ms = Some(now_ms);

        let x = area.left + (area.right - area.left) * rng.gen::<f32>();
        let y = area.top - SPAWN_LIFT - rng.gen::<f32>() * SPAWN_SCATTER;
        let vx = rng.gen::<f32>() * 2.0 * SPAWN_VX - SPAWN_VX;
        let vy = -rng.gen::<f32>() * SPAWN_VY;
        Some(SpawnRequest {
            letter,
            pos: Vec2::new(x, y),
            velocity: Vec2::new(vx, vy),
        })
    }
}
