use crate::core::mesh::{self, Mesh};
use crate::core::{
    ColorSlot, MeshKind, NodeId, Scene, SceneObject, SceneTarget, KEY_LIGHT, ORB_RADIUS,
    ORB_SEGMENTS, PLANE_HEIGHT, PLANE_WIDTH, RIM_LIGHT, RING_INNER, RING_OUTER, RING_SEGMENTS,
};
use glam::Vec3;
use web_sys as web;
use wgpu::util::DeviceExt;

mod helpers;
mod pipeline;

use pipeline::ScenePipelines;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct GlobalUniforms {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    ambient: [f32; 4],
    key_pos: [f32; 4],
    key_color: [f32; 4],
    rim_pos: [f32; 4],
    rim_color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ObjectUniforms {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    emissive: [f32; 4],
    material: [f32; 4],
}

impl ObjectUniforms {
    fn from_object(o: &SceneObject) -> Self {
        let m = &o.material;
        Self {
            model: o.transform.matrix().to_cols_array_2d(),
            color: m.color.extend(m.opacity).to_array(),
            emissive: m.emissive.extend(if m.lit { 1.0 } else { 0.0 }).to_array(),
            material: [m.roughness, m.metalness, 0.0, 0.0],
        }
    }
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, label: &str, mesh: &Mesh) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }
}

struct ObjectBinding {
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipelines: ScenePipelines,
    depth_view: wgpu::TextureView,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    // indexed by MeshKind
    meshes: [GpuMesh; 3],
    // indexed by NodeId
    objects: [ObjectBinding; 4],
    scene: Scene,
    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement, mut scene: Scene) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        scene.camera.set_viewport(width, height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::SCENE_WGSL.into()),
        });
        let pipelines = pipeline::create_scene_pipelines(&device, &shader, format);
        let depth_view = helpers::create_depth_view(&device, width, height);

        let globals_buffer = helpers::create_uniform_buffer(
            &device,
            "globals_uniforms",
            std::mem::size_of::<GlobalUniforms>(),
        );
        let globals_bind_group = helpers::create_uniform_bind_group(
            &device,
            "globals_bg",
            &pipelines.globals_bgl,
            &globals_buffer,
        );

        let meshes = [
            GpuMesh::upload(&device, "plane_mesh", &mesh::plane(PLANE_WIDTH, PLANE_HEIGHT)),
            GpuMesh::upload(
                &device,
                "orb_mesh",
                &mesh::sphere(ORB_RADIUS, ORB_SEGMENTS, ORB_SEGMENTS),
            ),
            GpuMesh::upload(
                &device,
                "ring_mesh",
                &mesh::ring(RING_INNER, RING_OUTER, RING_SEGMENTS),
            ),
        ];
        let objects = NodeId::ALL.map(|id| {
            let label = format!("{:?}_uniforms", id);
            let uniform_buffer = helpers::create_uniform_buffer(
                &device,
                &label,
                std::mem::size_of::<ObjectUniforms>(),
            );
            let bind_group = helpers::create_uniform_bind_group(
                &device,
                &label,
                &pipelines.object_bgl,
                &uniform_buffer,
            );
            ObjectBinding {
                uniform_buffer,
                bind_group,
            }
        });
        log::info!("[render] WebGPU ready {}x{} format={:?}", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipelines,
            depth_view,
            globals_buffer,
            globals_bind_group,
            meshes,
            objects,
            scene,
            width,
            height,
        })
    }

    /// Reconfigure the surface, depth target and camera aspect when the
    /// backing size changed; a no-op otherwise.
    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth_view = helpers::create_depth_view(&self.device, width, height);
            self.scene.camera.set_viewport(width, height);
            log::debug!("[render] resized to {}x{}", width, height);
        }
    }

    fn write_uniforms(&self) {
        let s = &self.scene;
        let light = |i: usize| {
            let l = &s.lights[i];
            (l.position.extend(1.0).to_array(), l.color.extend(l.intensity).to_array())
        };
        let (key_pos, key_color) = light(KEY_LIGHT);
        let (rim_pos, rim_color) = light(RIM_LIGHT);
        let globals = GlobalUniforms {
            view_proj: s.camera.view_proj().to_cols_array_2d(),
            camera_pos: s.camera.eye.extend(1.0).to_array(),
            ambient: s.ambient.extend(s.ambient_intensity).to_array(),
            key_pos,
            key_color,
            rim_pos,
            rim_color,
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));
        for (binding, object) in self.objects.iter().zip(s.objects.iter()) {
            let u = ObjectUniforms::from_object(object);
            self.queue
                .write_buffer(&binding.uniform_buffer, 0, bytemuck::bytes_of(&u));
        }
    }

    fn draw(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.write_uniforms();
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let bg = self.scene.background;
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: bg.x as f64,
                            g: bg.y as f64,
                            b: bg.z as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);
            for id in self.scene.draw_order() {
                let object = self.scene.object(id);
                let pipeline = if object.material.is_transparent() {
                    &self.pipelines.transparent
                } else {
                    &self.pipelines.opaque
                };
                let gpu_mesh = &self.meshes[mesh_slot(object.mesh)];
                rpass.set_pipeline(pipeline);
                rpass.set_bind_group(1, &self.objects[id as usize].bind_group, &[]);
                rpass.set_vertex_buffer(0, gpu_mesh.vertex_buffer.slice(..));
                rpass.set_index_buffer(gpu_mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..gpu_mesh.index_count, 0, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

#[inline]
fn mesh_slot(kind: MeshKind) -> usize {
    match kind {
        MeshKind::Plane => 0,
        MeshKind::Sphere => 1,
        MeshKind::Ring => 2,
    }
}

impl<'a> SceneTarget for GpuState<'a> {
    fn set_color(&mut self, slot: ColorSlot, color: Vec3) {
        self.scene.set_color(slot, color);
    }

    fn set_scale(&mut self, node: NodeId, scale: Vec3) {
        self.scene.set_scale(node, scale);
    }

    fn set_rotation(&mut self, node: NodeId, rotation: Vec3) {
        self.scene.set_rotation(node, rotation);
    }

    fn render(&mut self, dt_sec: f32) -> anyhow::Result<()> {
        match self.draw() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // reconfigure and try again next frame
                self.surface.configure(&self.device, &self.config);
            }
            Err(e) => return Err(anyhow::anyhow!("render error: {:?}", e)),
        }
        self.scene.render(dt_sec)
    }
}
