//! Shared GPU helpers used by the instance renderers.

use wgpu::util::DeviceExt;

use crate::coords::Vec2;
use crate::raster::{UNIT_QUAD_CORNERS, UNIT_QUAD_INDICES};

// ── pipeline ──────────────────────────────────────────────────────────────

/// Everything that differs between the three instance pipelines.
pub(super) struct PipelineSpec<'a> {
    pub label: &'a str,
    pub shader: &'a wgpu::ShaderModule,
    pub bind_group_layouts: &'a [&'a wgpu::BindGroupLayout],
    pub vertex_buffers: &'a [wgpu::VertexBufferLayout<'a>],
    pub topology: wgpu::PrimitiveTopology,
    pub format: wgpu::TextureFormat,
}

/// Opaque writes, no depth, no culling.
pub(super) fn create_pipeline(device: &wgpu::Device, spec: PipelineSpec<'_>) -> wgpu::RenderPipeline {
    log::debug!("creating {} for {:?}", spec.label, spec.format);

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(spec.label),
        bind_group_layouts: spec.bind_group_layouts,
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(spec.label),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: spec.shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: spec.vertex_buffers,
        },
        fragment: Some(wgpu::FragmentState {
            module: spec.shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: spec.format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: spec.topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

// ── unit quad ─────────────────────────────────────────────────────────────

const CORNER_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

/// Per-vertex layout for explicit unit-quad corners (`@location(0) corner`).
pub(super) fn corner_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vec2>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &CORNER_ATTRS,
    }
}

pub(super) fn create_corner_vbo(device: &wgpu::Device, label: &str) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(&UNIT_QUAD_CORNERS),
        usage: wgpu::BufferUsages::VERTEX,
    })
}

pub(super) fn create_quad_ibo(device: &wgpu::Device, label: &str) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(&UNIT_QUAD_INDICES),
        usage: wgpu::BufferUsages::INDEX,
    })
}

pub(super) const QUAD_INDEX_COUNT: u32 = UNIT_QUAD_INDICES.len() as u32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_stride_matches_vec2() {
        assert_eq!(corner_layout().array_stride, 8);
        assert_eq!(QUAD_INDEX_COUNT, 6);
    }
}
