use super::helpers::{uniform_layout, DEPTH_FORMAT};
use crate::core::mesh::Vertex;

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

pub(crate) struct ScenePipelines {
    pub(crate) globals_bgl: wgpu::BindGroupLayout, // camera + lights
    pub(crate) object_bgl: wgpu::BindGroupLayout,  // model + material
    pub(crate) opaque: wgpu::RenderPipeline,
    pub(crate) transparent: wgpu::RenderPipeline,
}

pub(crate) fn create_scene_pipelines(
    device: &wgpu::Device,
    shader: &wgpu::ShaderModule,
    color_format: wgpu::TextureFormat,
) -> ScenePipelines {
    let globals_bgl = uniform_layout(device, "globals_bgl");
    let object_bgl = uniform_layout(device, "object_bgl");
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("scene_pl"),
        bind_group_layouts: &[&globals_bgl, &object_bgl],
        push_constant_ranges: &[],
    });
    // Opaque geometry writes depth; transparent layers blend over it.
    let opaque = make_scene_pipeline(device, &layout, shader, color_format, None, true);
    let transparent = make_scene_pipeline(
        device,
        &layout,
        shader,
        color_format,
        Some(wgpu::BlendState::ALPHA_BLENDING),
        false,
    );
    ScenePipelines {
        globals_bgl,
        object_bgl,
        opaque,
        transparent,
    }
}

fn make_scene_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    color_format: wgpu::TextureFormat,
    blend: Option<wgpu::BlendState>,
    depth_write: bool,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(if depth_write { "scene_opaque" } else { "scene_transparent" }),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &VERTEX_ATTRIBUTES,
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        // planes and the ring are seen from both sides
        primitive: wgpu::PrimitiveState {
            cull_mode: None,
            ..wgpu::PrimitiveState::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: depth_write,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}
