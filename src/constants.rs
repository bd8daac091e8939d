// Element ids of the host page and other browser-side settings.

pub const ID_CANVAS: &str = "gl";
pub const ID_DEVICE: &str = "device";
pub const ID_ENV_ROW: &str = "envRow";
pub const ID_BREATH: &str = "breathPill";
pub const ID_TIMER: &str = "timerText";
pub const ID_STATUS: &str = "statusText";

pub const ID_BTN_FULLSCREEN: &str = "btnFullscreen";
pub const ID_BTN_HELP: &str = "btnGear";
pub const ID_BTN_BACK: &str = "btnBack";
pub const ID_BTN_RESET: &str = "btnReset";
pub const ID_BTN_START: &str = "btnStartStop";
pub const ID_BTN_MUTE: &str = "btnMute";

pub const ID_SOUND_TYPE: &str = "soundType";
pub const ID_VOLUME: &str = "volume";
pub const ID_BREATH_SPEED: &str = "speed";
pub const ID_ORB_SIZE: &str = "orbSize";
pub const ID_INTENSITY: &str = "intensity";
pub const ID_SOUND_SPEED: &str = "soundSpeed";

// Cap on devicePixelRatio for the canvas backing store
pub const MAX_PIXEL_RATIO: f64 = 2.0;

