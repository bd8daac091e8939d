// Shared scene, breathing and ambience tuning used by the web frontend.

// Camera
pub const CAMERA_FOV_DEG: f32 = 60.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 200.0;
pub const CAMERA_Z: f32 = 6.0;

// Lights
pub const AMBIENT_INTENSITY: f32 = 0.5;
pub const KEY_LIGHT_INTENSITY: f32 = 1.1;
pub const KEY_LIGHT_POSITION: [f32; 3] = [5.0, 5.0, 7.0];
pub const RIM_LIGHT_INTENSITY: f32 = 1.0;
pub const RIM_LIGHT_POSITION: [f32; 3] = [-6.0, 2.0, 6.0];

// Backdrop and haze planes
pub const PLANE_WIDTH: f32 = 50.0;
pub const PLANE_HEIGHT: f32 = 30.0;
pub const BACKDROP_Z: f32 = -12.0;
pub const HAZE_Z: f32 = -11.5;
pub const HAZE_OPACITY: f32 = 0.10;

// Orb
pub const ORB_RADIUS: f32 = 1.0;
pub const ORB_SEGMENTS: u32 = 96;
pub const ORB_ROUGHNESS: f32 = 0.25;
pub const ORB_METALNESS: f32 = 0.12;

// Ring glow under the orb
pub const RING_INNER: f32 = 1.35;
pub const RING_OUTER: f32 = 2.85;
pub const RING_SEGMENTS: u32 = 96;
pub const RING_Y: f32 = -1.35;
pub const RING_OPACITY: f32 = 0.12;
pub const RING_SCALE_FACTOR: f32 = 1.10;

// Breathing oscillator
pub const PHASE_RATE: f64 = 1.25; // radians per second at breath speed 1.0
pub const ORB_MIN_FACTOR: f32 = 0.92;
pub const ORB_MAX_FACTOR: f32 = 1.60;
pub const SPIN_RATE_X: f32 = 0.08; // rad/s
pub const SPIN_RATE_Y: f32 = 0.22; // rad/s

// Ambience
pub const NOISE_SECONDS: f32 = 2.0;
pub const NOISE_AMPLITUDE: f32 = 0.9;
pub const RAIN_CUTOFF_HZ: f32 = 950.0;
pub const RAIN_Q: f32 = 0.85;
pub const FOREST_CUTOFF_HZ: f32 = 560.0;
pub const FOREST_Q: f32 = 0.75;
pub const OCEAN_CUTOFF_HZ: f32 = 340.0;
pub const OCEAN_Q: f32 = 0.95;
pub const OCEAN_LFO_RATE_HZ: f32 = 0.10; // scaled by sound speed
pub const OCEAN_LFO_DEPTH_HZ: f32 = 180.0; // scaled by intensity

// Slider defaults, used when a widget value cannot be parsed
pub const DEFAULT_VOLUME: f32 = 0.35;
pub const DEFAULT_BREATH_SPEED: f32 = 1.0;
pub const DEFAULT_ORB_SIZE: f32 = 1.0;
pub const DEFAULT_INTENSITY: f32 = 1.0;
pub const DEFAULT_SOUND_SPEED: f32 = 1.0;
pub const VOLUME_STEP: f32 = 0.05;

// Glyphs and status lines
pub const GLYPH_PLAY: &str = "▶";
pub const GLYPH_PAUSE: &str = "⏸";
pub const GLYPH_MUTED: &str = "🔇";
pub const GLYPH_UNMUTED: &str = "🔊";

pub const STATUS_INITIAL: &str = "Tap ▶ to start. Tap 🔇 to enable audio.";
pub const STATUS_RUNNING: &str = "Running";
pub const STATUS_PAUSED: &str = "Paused";
pub const STATUS_RESET: &str = "Reset";
pub const STATUS_AUDIO_PLAYING: &str = "Audio: playing";
pub const STATUS_AUDIO_MUTED: &str = "Audio: muted";
pub const STATUS_AUDIO_UNAVAILABLE: &str = "Audio unavailable";
pub const STATUS_FULLSCREEN_ON: &str = "Fullscreen enabled";
pub const STATUS_FULLSCREEN_OFF: &str = "Fullscreen exited";
pub const STATUS_FULLSCREEN_BLOCKED: &str = "Fullscreen blocked (try Chrome/Edge)";
pub const STATUS_BACK: &str = "Back (demo button)";

pub const HELP_TEXT: &str = "MindConnect Calm Mode\n\n\
• Swipe themes, tap to select\n\
• ▶ / ⏸ to run breathing\n\
• 🔇 / 🔊 to mute/unmute ambience\n\
• Sliders control speed, size, volume & sound feel\n\
• ⛶ for fullscreen\n\
• Keys: Space start/pause, R reset, M mute, F fullscreen, 1-5 themes\n";
