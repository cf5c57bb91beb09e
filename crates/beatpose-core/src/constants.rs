// Shared reactive tuning constants used by both web and native frontends.

// Spectrum
pub const NUM_BANDS: usize = 20; // band 0 drives the lead, bands 1.. drive spheres

// Bounce
pub const BASE_Y: f32 = 2.0; // resting height of every element
pub const JUMP_GAIN: f32 = 10.0; // band energy -> jump height
pub const JUMP_MAX: f32 = 6.0; // jump height clamp
pub const SCALE_PER_JUMP: f32 = 0.2; // scale gained per unit of jump
pub const BOUNCE_EASING: f32 = 0.2; // per-frame easing for height and scale
pub const DEPTH_EASING: f32 = 0.1; // per-frame easing for the lead depth offset
pub const DEPTH_PER_JUMP: f32 = 0.5; // lead moves toward the camera as it jumps

// Lead element
pub const LEAD_BASE_Z: f32 = 4.0; // rest depth the lead eases back to
pub const LEAD_BASE_SCALE: f32 = 1.1; // rest scale of the head model
pub const LEAD_START_SCALE: f32 = 4.0; // loaded model scale, eases down to the rest scale

// Motion
pub const MOTION_THRESHOLD: f32 = 0.15; // |vy| in normalized units per second
pub const MOTION_GAIN: f32 = 0.05; // color-mode increment per unit velocity
pub const MOTION_STEP_MAX: f32 = 0.05; // cap on a single motion increment

// Idle decay
pub const IDLE_WINDOW_MS: f64 = 300.0; // quiet time before decay starts
pub const DECAY_PERIOD_MS: f64 = 100.0; // decay timer cadence
pub const DECAY_STEP: f32 = 0.08; // color-mode decrement per decay tick

// Emissive glow of the lead materials
pub const EMISSIVE_BASE: f32 = 0.5;
pub const EMISSIVE_SPAN: f32 = 1.5;
pub const EMISSIVE_EASING: f32 = 0.1;

// Palette
pub const ORIGINAL_SATURATION: f32 = 0.8;
pub const ORIGINAL_LIGHTNESS: f32 = 0.6;
pub const ALTERNATE_SHADES: [&str; 7] = [
    "#60ab50", "#256435", "#249f45", "#266632", "#108864", "#249f44", "#0f8964",
];

// Scene layout
pub const SPHERE_SPACING: f32 = 1.2; // x distance between neighbouring spheres
pub const SPHERE_X_OFFSET: f32 = 5.0; // shifts the sphere row right of the lead
pub const SPHERE_Z_STEP: f32 = -2.0; // spheres recede from the camera along the row
pub const SPHERE_Z_OFFSET: f32 = 2.0;
pub const LEAD_X_OFFSET: f32 = 6.2;
pub const LEAD_START_Z: f32 = 2.0; // placement depth before the first eased frame

