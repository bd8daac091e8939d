// Scene graph for the single orb screen, independent of any GPU API.
//
// The renderer reads this each frame; handlers and the frame tick mutate it
// only through `SceneTarget`, so a headless `Scene` can stand in for the GPU
// in tests.

use super::breath::BreathFrame;
use super::constants::*;
use super::theme::{hex_to_linear, Theme};
use glam::{EulerRot, Mat4, Quat, Vec3};
use smallvec::{smallvec, SmallVec};

/// Right-handed perspective camera looking down -Z at the origin.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }
}

impl Camera {
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    #[inline]
    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update the aspect ratio; sizes are clamped to at least 1x1.
    /// Returns whether anything changed.
    pub fn set_viewport(&mut self, width: u32, height: u32) -> bool {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        if (aspect - self.aspect).abs() <= f32::EPSILON {
            return false;
        }
        self.aspect = aspect;
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians, applied X then Y then Z.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        let r = self.rotation;
        Mat4::from_scale_rotation_translation(
            self.scale,
            Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z),
            self.position,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: Vec3,
    pub emissive: Vec3,
    pub opacity: f32,
    /// Unlit materials output `color` directly.
    pub lit: bool,
    pub roughness: f32,
    pub metalness: f32,
}

impl Material {
    pub fn basic(color: Vec3, opacity: f32) -> Self {
        Self {
            color,
            emissive: Vec3::ZERO,
            opacity,
            lit: false,
            roughness: 1.0,
            metalness: 0.0,
        }
    }

    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Plane,
    Sphere,
    Ring,
}

/// Addressable objects of the scene, in back-to-front order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeId {
    Backdrop,
    Haze,
    Orb,
    Ring,
}

impl NodeId {
    pub const ALL: [NodeId; 4] = [NodeId::Backdrop, NodeId::Haze, NodeId::Orb, NodeId::Ring];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Color channels a theme drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorSlot {
    Background,
    Backdrop,
    OrbBody,
    OrbGlow,
    RimLight,
    RingGlow,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneObject {
    pub id: NodeId,
    pub mesh: MeshKind,
    pub transform: Transform,
    pub material: Material,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

pub const KEY_LIGHT: usize = 0;
pub const RIM_LIGHT: usize = 1;

/// Capability the controller needs from a renderer.
pub trait SceneTarget {
    fn set_color(&mut self, slot: ColorSlot, color: Vec3);
    fn set_scale(&mut self, node: NodeId, scale: Vec3);
    fn set_rotation(&mut self, node: NodeId, rotation: Vec3);
    fn render(&mut self, dt_sec: f32) -> anyhow::Result<()>;
}

#[derive(Clone, Debug)]
pub struct Scene {
    pub camera: Camera,
    pub background: Vec3,
    pub ambient: Vec3,
    pub ambient_intensity: f32,
    pub lights: SmallVec<[PointLight; 2]>,
    pub objects: [SceneObject; 4],
    pub frames_rendered: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        let red = hex_to_linear(0xff3b30);
        let backdrop = SceneObject {
            id: NodeId::Backdrop,
            mesh: MeshKind::Plane,
            transform: Transform {
                position: Vec3::new(0.0, 0.0, BACKDROP_Z),
                ..Transform::default()
            },
            material: Material::basic(hex_to_linear(0x0b0b0b), 1.0),
        };
        let haze = SceneObject {
            id: NodeId::Haze,
            mesh: MeshKind::Plane,
            transform: Transform {
                position: Vec3::new(0.0, 0.0, HAZE_Z),
                ..Transform::default()
            },
            material: Material::basic(Vec3::ZERO, HAZE_OPACITY),
        };
        let orb = SceneObject {
            id: NodeId::Orb,
            mesh: MeshKind::Sphere,
            transform: Transform::default(),
            material: Material {
                color: red,
                emissive: hex_to_linear(0x660000),
                opacity: 1.0,
                lit: true,
                roughness: ORB_ROUGHNESS,
                metalness: ORB_METALNESS,
            },
        };
        let ring = SceneObject {
            id: NodeId::Ring,
            mesh: MeshKind::Ring,
            transform: Transform {
                position: Vec3::new(0.0, RING_Y, 0.0),
                rotation: Vec3::new(std::f32::consts::FRAC_PI_2, 0.0, 0.0),
                scale: Vec3::ONE,
            },
            material: Material::basic(red, RING_OPACITY),
        };
        Self {
            camera: Camera::default(),
            background: Vec3::ZERO,
            ambient: Vec3::ONE,
            ambient_intensity: AMBIENT_INTENSITY,
            lights: smallvec![
                PointLight {
                    position: Vec3::from(KEY_LIGHT_POSITION),
                    color: Vec3::ONE,
                    intensity: KEY_LIGHT_INTENSITY,
                },
                PointLight {
                    position: Vec3::from(RIM_LIGHT_POSITION),
                    color: red,
                    intensity: RIM_LIGHT_INTENSITY,
                },
            ],
            objects: [backdrop, haze, orb, ring],
            frames_rendered: 0,
        }
    }

    #[inline]
    pub fn object(&self, id: NodeId) -> &SceneObject {
        &self.objects[id.index()]
    }

    #[inline]
    pub fn object_mut(&mut self, id: NodeId) -> &mut SceneObject {
        &mut self.objects[id.index()]
    }

    /// Opaque objects first, then transparent ones back to front.
    pub fn draw_order(&self) -> SmallVec<[NodeId; 4]> {
        let mut order: SmallVec<[NodeId; 4]> = NodeId::ALL
            .iter()
            .copied()
            .filter(|id| !self.object(*id).material.is_transparent())
            .collect();
        let mut transparent: SmallVec<[NodeId; 4]> = NodeId::ALL
            .iter()
            .copied()
            .filter(|id| self.object(*id).material.is_transparent())
            .collect();
        transparent.sort_by(|a, b| {
            let za = self.object(*a).transform.position.z;
            let zb = self.object(*b).transform.position.z;
            za.total_cmp(&zb)
        });
        order.extend(transparent);
        order
    }

    pub fn color(&self, slot: ColorSlot) -> Vec3 {
        match slot {
            ColorSlot::Background => self.background,
            ColorSlot::Backdrop => self.object(NodeId::Backdrop).material.color,
            ColorSlot::OrbBody => self.object(NodeId::Orb).material.color,
            ColorSlot::OrbGlow => self.object(NodeId::Orb).material.emissive,
            ColorSlot::RimLight => self.lights[RIM_LIGHT].color,
            ColorSlot::RingGlow => self.object(NodeId::Ring).material.color,
        }
    }
}

impl SceneTarget for Scene {
    fn set_color(&mut self, slot: ColorSlot, color: Vec3) {
        match slot {
            ColorSlot::Background => self.background = color,
            ColorSlot::Backdrop => self.object_mut(NodeId::Backdrop).material.color = color,
            ColorSlot::OrbBody => self.object_mut(NodeId::Orb).material.color = color,
            ColorSlot::OrbGlow => self.object_mut(NodeId::Orb).material.emissive = color,
            ColorSlot::RimLight => self.lights[RIM_LIGHT].color = color,
            ColorSlot::RingGlow => self.object_mut(NodeId::Ring).material.color = color,
        }
    }

    fn set_scale(&mut self, node: NodeId, scale: Vec3) {
        self.object_mut(node).transform.scale = scale;
    }

    fn set_rotation(&mut self, node: NodeId, rotation: Vec3) {
        self.object_mut(node).transform.rotation = rotation;
    }

    fn render(&mut self, _dt_sec: f32) -> anyhow::Result<()> {
        self.frames_rendered += 1;
        Ok(())
    }
}

/// Push every themed color to the target in one pass.
pub fn apply_theme<T: SceneTarget + ?Sized>(target: &mut T, theme: &Theme) {
    target.set_color(ColorSlot::Background, hex_to_linear(theme.background));
    target.set_color(ColorSlot::Backdrop, hex_to_linear(theme.plane));
    target.set_color(ColorSlot::OrbBody, hex_to_linear(theme.orb));
    target.set_color(ColorSlot::OrbGlow, hex_to_linear(theme.emissive));
    target.set_color(ColorSlot::RimLight, hex_to_linear(theme.rim));
    target.set_color(ColorSlot::RingGlow, hex_to_linear(theme.rim));
}

pub fn apply_breath<T: SceneTarget + ?Sized>(target: &mut T, frame: &BreathFrame) {
    target.set_scale(NodeId::Orb, frame.orb_scale);
    target.set_scale(NodeId::Ring, frame.ring_scale);
    target.set_rotation(NodeId::Orb, frame.orb_rotation);
}
