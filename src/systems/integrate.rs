use crate::domain::{Bounds, JarConfig};

use super::body::Body;

/// Cosmetic tilt per unit of horizontal speed
const TILT_PER_SPEED: f32 = 0.002;

/// Advance one free body by `dt` seconds: gravity, explicit Euler step,
/// horizontal drag, then floor, walls and the loose ceiling in that order.
/// Resting bodies are left untouched. Returns `true` when the body came to
/// rest on the floor.
pub fn integrate_body(body: &mut Body, bounds: &Bounds, config: &JarConfig, dt: f32) -> bool {
    if body.resting {
        return false;
    }
    let mut came_to_rest = false;
    let tuning = &config.tuning;

    body.velocity.y += config.gravity_y * tuning.gravity_damping * dt;
    body.pos += body.velocity * dt;
    // Drag applies every step, touching or not
    body.velocity.x *= config.horizontal_friction;

    if body.pos.y >= bounds.bottom {
        body.pos.y = bounds.bottom;
        body.velocity.y = -body.velocity.y.abs() * config.bounce * config.floor_damp;
        if body.velocity.y.abs() < tuning.rest_velocity {
            body.rest();
            came_to_rest = true;
        }
    }

    if body.pos.x <= bounds.left {
        body.pos.x = bounds.left;
        body.velocity.x = body.velocity.x.abs() * config.bounce;
    } else if body.pos.x >= bounds.right {
        body.pos.x = bounds.right;
        body.velocity.x = -body.velocity.x.abs() * config.bounce;
    }

    let ceiling = bounds.top - tuning.top_clamp_margin;
    if body.pos.y < ceiling {
        body.pos.y = ceiling;
    }

    body.rotation = body.velocity.x * TILT_PER_SPEED;
    came_to_rest
}

/// Integrate every free body; returns how many came to rest on the floor.
pub fn integrate_all(bodies: &mut [Body], bounds: &Bounds, config: &JarConfig, dt: f32) -> u32 {
    bodies
        .iter_mut()
        .map(|b| integrate_body(b, bounds, config, dt))
        .filter(|&came_to_rest| came_to_rest)
        .count() as u32
}
