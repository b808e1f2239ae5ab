//! Jar physics configuration.
//!
//! The host hands us a JSON object (the old `JAR_PHYSICS` global). Every field
//! is decoded on its own: a missing key, a string where a number belongs, NaN,
//! or an out-of-range value falls back to that field's default instead of
//! rejecting the whole record.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const DEFAULT_GRAVITY_Y: f32 = 320.0;
pub const DEFAULT_BOUNCE: f32 = 0.42;
pub const DEFAULT_FLOOR_DAMP: f32 = 0.65;
pub const DEFAULT_HORIZONTAL_FRICTION: f32 = 0.92;
pub const DEFAULT_BODY_RADIUS: f32 = 18.0;
pub const DEFAULT_MAX_SLICE: usize = 1000;
pub const DEFAULT_SPAWN_INTERVAL_MS: f32 = 36.0;

/// Narrower columns only add empty buckets to every neighbour walk
pub const MIN_BUCKET_WIDTH: f32 = 1.0;

/// Glyph size relative to the body radius when no font size is configured
const FONT_SIZE_PER_RADIUS: f32 = 1.8;

/// Empirically tuned settling constants. None of these have a physical
/// derivation; they are what makes letters stack instead of jitter.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tuning {
    /// Scales gravity down to soften stacking
    pub gravity_damping: f32,
    /// Floor bounce speed below which a body comes to rest
    pub rest_velocity: f32,
    /// Vertical speed below which a body resting on another body comes to rest
    pub contact_rest_velocity: f32,
    /// Minimum downward normal component for contact resting
    pub contact_normal_min: f32,
    /// Contact resting is only allowed this far above the floor
    pub contact_floor_clearance: f32,
    pub impulse_scale: f32,
    pub contact_damping: f32,
    /// Extra vertical slack in the support predicate
    pub support_gap_margin: f32,
    /// Fraction of the summed radii two bodies must overlap horizontally
    pub support_overlap_ratio: f32,
    /// Distance from the floor that still counts as floor contact
    pub floor_epsilon: f32,
    /// Minimum downward speed given to a demoted body
    pub demotion_nudge: f32,
    pub bucket_width: f32,
    /// How far above the top bound a body may drift before being clamped
    pub top_clamp_margin: f32,
    /// Longest frame delta integrated in one step
    pub max_step_ms: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity_damping: 0.8,
            rest_velocity: 20.0,
            contact_rest_velocity: 24.0,
            contact_normal_min: 0.55,
            contact_floor_clearance: 10.0,
            impulse_scale: 0.42,
            contact_damping: 0.98,
            support_gap_margin: 6.0,
            support_overlap_ratio: 0.85,
            floor_epsilon: 0.5,
            demotion_nudge: 30.0,
            bucket_width: 30.0,
            top_clamp_margin: 160.0,
            max_step_ms: 100.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JarConfig {
    pub gravity_y: f32,
    pub bounce: f32,
    pub floor_damp: f32,
    pub horizontal_friction: f32,
    pub body_radius: f32,
    /// Display-only glyph size; `None` derives it from the radius
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    pub max_slice: usize,
    pub spawn_interval_ms: f32,
    #[serde(flatten)]
    pub tuning: Tuning,
}

impl Default for JarConfig {
    fn default() -> Self {
        Self {
            gravity_y: DEFAULT_GRAVITY_Y,
            bounce: DEFAULT_BOUNCE,
            floor_damp: DEFAULT_FLOOR_DAMP,
            horizontal_friction: DEFAULT_HORIZONTAL_FRICTION,
            body_radius: DEFAULT_BODY_RADIUS,
            font_size: None,
            max_slice: DEFAULT_MAX_SLICE,
            spawn_interval_ms: DEFAULT_SPAWN_INTERVAL_MS,
            tuning: Tuning::default(),
        }
    }
}

impl JarConfig {
    /// Decode a config object. Only a syntactically broken document or a
    /// non-object top level is an error; bad fields fall back individually.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let raw: RawJarConfig = serde_json::from_str(json).map_err(|e| e.to_string())?;
        Ok(Self::from_raw(raw))
    }

    /// Like [`JarConfig::from_json`] but never fails: an unreadable document
    /// yields the defaults.
    pub fn from_json_lossy(json: &str) -> Self {
        if json.trim().is_empty() {
            return Self::default();
        }
        match Self::from_json(json) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("jar config unreadable ({}), using defaults", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Font size used when the run has no display override
    pub fn display_size(&self, radius: f32) -> f32 {
        self.font_size
            .unwrap_or_else(|| (radius * FONT_SIZE_PER_RADIUS).round())
    }

    fn from_raw(raw: RawJarConfig) -> Self {
        let d = Self::default();
        let t = Tuning::default();
        Self {
            gravity_y: pick(raw.gravity_y, d.gravity_y, |_| true),
            bounce: pick(raw.bounce, d.bounce, unit),
            floor_damp: pick(raw.floor_damp, d.floor_damp, unit),
            horizontal_friction: pick(raw.horizontal_friction, d.horizontal_friction, unit),
            body_radius: pick(raw.body_radius, d.body_radius, positive),
            font_size: raw.font_size.map(|v| v as f32).filter(|v| positive(*v)),
            max_slice: raw
                .max_slice
                .filter(|v| *v >= 0.0)
                .map(|v| v.floor() as usize)
                .unwrap_or(d.max_slice),
            spawn_interval_ms: pick(raw.spawn_interval_ms, d.spawn_interval_ms, non_negative),
            tuning: Tuning {
                gravity_damping: pick(raw.gravity_damping, t.gravity_damping, positive),
                rest_velocity: pick(raw.rest_velocity, t.rest_velocity, non_negative),
                contact_rest_velocity: pick(
                    raw.contact_rest_velocity,
                    t.contact_rest_velocity,
                    non_negative,
                ),
                contact_normal_min: pick(raw.contact_normal_min, t.contact_normal_min, unit),
                contact_floor_clearance: pick(
                    raw.contact_floor_clearance,
                    t.contact_floor_clearance,
                    non_negative,
                ),
                impulse_scale: pick(raw.impulse_scale, t.impulse_scale, non_negative),
                contact_damping: pick(raw.contact_damping, t.contact_damping, unit),
                support_gap_margin: pick(
                    raw.support_gap_margin,
                    t.support_gap_margin,
                    non_negative,
                ),
                support_overlap_ratio: pick(
                    raw.support_overlap_ratio,
                    t.support_overlap_ratio,
                    positive,
                ),
                floor_epsilon: pick(raw.floor_epsilon, t.floor_epsilon, positive),
                demotion_nudge: pick(raw.demotion_nudge, t.demotion_nudge, non_negative),
                bucket_width: pick(raw.bucket_width, t.bucket_width, |v| v >= MIN_BUCKET_WIDTH),
                top_clamp_margin: pick(raw.top_clamp_margin, t.top_clamp_margin, non_negative),
                max_step_ms: pick(raw.max_step_ms, t.max_step_ms, positive),
            },
        }
    }
}

/// Per-run overrides from the debug sliders. Radius drives physics; display
/// size only affects how big the glyph is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunOverrides {
    pub body_radius: Option<f32>,
    pub display_size: Option<f32>,
}

impl RunOverrides {
    /// Drop overrides that are not usable sizes
    pub fn sanitized(self) -> Self {
        Self {
            body_radius: self.body_radius.filter(|v| positive(*v)),
            display_size: self.display_size.filter(|v| positive(*v)),
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct RawJarConfig {
    #[serde(deserialize_with = "lenient_number")]
    gravity_y: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    bounce: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    floor_damp: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    horizontal_friction: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    body_radius: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    font_size: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    max_slice: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    spawn_interval_ms: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    gravity_damping: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    rest_velocity: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    contact_rest_velocity: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    contact_normal_min: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    contact_floor_clearance: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    impulse_scale: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    contact_damping: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    support_gap_margin: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    support_overlap_ratio: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    floor_epsilon: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    demotion_nudge: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    bucket_width: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    top_clamp_margin: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    max_step_ms: Option<f64>,
}

/// Accept any JSON value; keep it only if it is a finite number.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64().filter(|v| v.is_finite()))
}

fn pick(raw: Option<f64>, default: f32, valid: impl Fn(f32) -> bool) -> f32 {
    raw.map(|v| v as f32)
        .filter(|v| v.is_finite() && valid(*v))
        .unwrap_or(default)
}

fn unit(v: f32) -> bool {
    (0.0..=1.0).contains(&v)
}

fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

fn non_negative(v: f32) -> bool {
    v >= 0.0
}
