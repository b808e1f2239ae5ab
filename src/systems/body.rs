use crate::core::Vec2;
use crate::domain::Letter;

/// One letter settling in the jar: physical state, cosmetic rotation and the
/// letter it draws, kept in a single record.
#[derive(Clone, Debug)]
pub struct Body {
    pub(crate) id: u32,
    pub(crate) pos: Vec2,
    pub(crate) velocity: Vec2,
    /// Fixed at spawn
    radius: f32,
    /// Resting bodies are skipped by gravity integration
    pub(crate) resting: bool,
    /// Visual only, never read by the physics
    pub(crate) rotation: f32,
    letter: Letter,
}

impl Body {
    /// `radius` must be positive; callers pass a sanitized config value.
    pub(crate) fn new(id: u32, pos: Vec2, velocity: Vec2, radius: f32, letter: Letter) -> Self {
        debug_assert!(radius > 0.0, "body radius must be positive");
        Self {
            id,
            pos,
            velocity,
            radius,
            resting: false,
            rotation: 0.0,
            letter,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn is_resting(&self) -> bool {
        self.resting
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn letter(&self) -> &Letter {
        &self.letter
    }

    #[inline]
    pub(crate) fn rest(&mut self) {
        self.velocity.y = 0.0;
        self.resting = true;
    }
}

/// Borrow two distinct bodies mutably at once.
pub(crate) fn pair_mut(bodies: &mut [Body], a: usize, b: usize) -> (&mut Body, &mut Body) {
    assert_ne!(a, b, "pair_mut needs two distinct bodies");
    if a < b {
        let (lo, hi) = bodies.split_at_mut(b);
        (&mut lo[a], &mut hi[0])
    } else {
        let (lo, hi) = bodies.split_at_mut(a);
        (&mut hi[0], &mut lo[b])
    }
}
