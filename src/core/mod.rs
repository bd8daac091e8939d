pub mod ambience;
pub mod breath;
pub mod constants;
pub mod mesh;
pub mod scene;
pub mod session;
pub mod theme;

pub use ambience::*;
pub use breath::*;
pub use constants::*;
pub use scene::*;
pub use session::*;
pub use theme::*;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../../shaders/scene.wgsl");
