use super::JarCore;

/// Floats per body in the frame buffer: x, y, rotation, radius, resting, id
pub const FRAME_STRIDE: usize = 6;

pub(super) fn collect_frame(jar: &mut JarCore) -> usize {
    let frame = &mut jar.render.frame;
    let colors = &mut jar.render.colors;
    frame.clear();
    colors.clear();
    frame.reserve(jar.bodies.len() * FRAME_STRIDE);
    colors.reserve(jar.bodies.len());

    for body in &jar.bodies {
        frame.extend_from_slice(&[
            body.pos.x,
            body.pos.y,
            body.rotation,
            body.radius(),
            if body.resting { 1.0 } else { 0.0 },
            // ids stay far below 2^24 in practice, so f32 holds them exactly
            body.id as f32,
        ]);
        colors.push(body.letter().color_rgb());
    }

    jar.bodies.len()
}
