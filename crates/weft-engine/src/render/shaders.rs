//! WGSL sources and module composition.
//!
//! WGSL has no include mechanism, so each pipeline's module is the concatenation of
//! the prelude parts it needs followed by its own entry points.

use std::borrow::Cow;

const UNIT_QUAD: &str = include_str!("shaders/unit_quad.wgsl");
const CAMERA: &str = include_str!("shaders/camera.wgsl");
const SHAPE: &str = include_str!("shaders/shape.wgsl");
const RECT_CIRCLE: &str = include_str!("shaders/rect_circle.wgsl");
const RECT_CIRCLE_VERTEX: &str = include_str!("shaders/rect_circle_vertex.wgsl");
const LINES: &str = include_str!("shaders/lines.wgsl");
const LINES_ACCUMULATE: &str = include_str!("shaders/lines_accumulate.wgsl");
const LINES_DIRECT: &str = include_str!("shaders/lines_direct.wgsl");

/// One composed shader module per pipeline.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ShaderKind {
    /// Procedural unit quad under the camera.
    RectCircle,
    /// Explicit corner vertex buffer, clip-space instances.
    RectCircleVertex,
    /// Lines with the accumulation group (`use_alpha` selects the mode at draw time).
    Lines,
    /// Lines without group 2, for devices lacking read-write storage textures.
    LinesDirect,
}

impl ShaderKind {
    pub const ALL: [ShaderKind; 4] = [
        ShaderKind::RectCircle,
        ShaderKind::RectCircleVertex,
        ShaderKind::Lines,
        ShaderKind::LinesDirect,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ShaderKind::RectCircle => "weft rect/circle shader",
            ShaderKind::RectCircleVertex => "weft rect/circle explicit-vertex shader",
            ShaderKind::Lines => "weft line shader",
            ShaderKind::LinesDirect => "weft direct line shader",
        }
    }

    fn parts(self) -> &'static [&'static str] {
        match self {
            ShaderKind::RectCircle => &[UNIT_QUAD, CAMERA, SHAPE, RECT_CIRCLE],
            ShaderKind::RectCircleVertex => &[SHAPE, RECT_CIRCLE_VERTEX],
            ShaderKind::Lines => &[CAMERA, LINES, LINES_ACCUMULATE],
            ShaderKind::LinesDirect => &[CAMERA, LINES, LINES_DIRECT],
        }
    }

    /// Full WGSL source for this module.
    pub fn source(self) -> String {
        self.parts().join("\n")
    }

    pub fn create_module(self, device: &wgpu::Device) -> wgpu::ShaderModule {
        log::debug!("compiling {}", self.label());
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(self.label()),
            source: wgpu::ShaderSource::Wgsl(Cow::Owned(self.source())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use naga::valid::{Capabilities, ValidationFlags, Validator};

    fn parse(kind: ShaderKind) -> naga::Module {
        let source = kind.source();
        match naga::front::wgsl::parse_str(&source) {
            Ok(module) => module,
            Err(e) => panic!("{} failed to parse:\n{}", kind.label(), e.emit_to_string(&source)),
        }
    }

    fn validate(kind: ShaderKind) -> naga::Module {
        let module = parse(kind);
        if let Err(e) = Validator::new(ValidationFlags::all(), Capabilities::all()).validate(&module) {
            panic!("{} failed validation: {e:?}", kind.label());
        }
        module
    }

    fn entry_points(module: &naga::Module) -> Vec<(&str, naga::ShaderStage)> {
        module
            .entry_points
            .iter()
            .map(|ep| (ep.name.as_str(), ep.stage))
            .collect()
    }

    fn bindings(module: &naga::Module) -> Vec<(u32, u32)> {
        let mut out: Vec<(u32, u32)> = module
            .global_variables
            .iter()
            .filter_map(|(_, var)| var.binding.as_ref().map(|b| (b.group, b.binding)))
            .collect();
        out.sort_unstable();
        out
    }

    // ── validation ────────────────────────────────────────────────────────

    #[test]
    fn every_module_validates() {
        for kind in ShaderKind::ALL {
            let module = validate(kind);
            let mut eps = entry_points(&module);
            eps.sort_unstable_by_key(|(name, _)| *name);
            assert_eq!(
                eps,
                vec![("fs_main", naga::ShaderStage::Fragment), ("vs_main", naga::ShaderStage::Vertex)],
                "{}",
                kind.label()
            );
        }
    }

    // ── bind group layout ─────────────────────────────────────────────────

    #[test]
    fn camera_pipeline_binds_instances_and_camera() {
        assert_eq!(bindings(&validate(ShaderKind::RectCircle)), vec![(0, 0), (1, 0), (1, 1)]);
    }

    #[test]
    fn explicit_pipeline_has_no_camera_group() {
        assert_eq!(bindings(&validate(ShaderKind::RectCircleVertex)), vec![(0, 0)]);
    }

    #[test]
    fn line_pipeline_binds_accumulation_group() {
        assert_eq!(
            bindings(&validate(ShaderKind::Lines)),
            vec![(0, 0), (1, 0), (1, 1), (2, 0), (2, 1)]
        );
        assert_eq!(bindings(&validate(ShaderKind::LinesDirect)), vec![(0, 0), (1, 0), (1, 1)]);
    }

    #[test]
    fn instance_structs_match_record_stride() {
        let module = validate(ShaderKind::RectCircle);
        let mut layouter = naga::proc::Layouter::default();
        layouter.update(module.to_ctx()).unwrap();

        let (handle, _) = module
            .types
            .iter()
            .find(|(_, ty)| ty.name.as_deref() == Some("ShapeInstance"))
            .unwrap();
        assert_eq!(layouter[handle].size as usize, std::mem::size_of::<crate::raster::ShapeInstance>());

        let module = validate(ShaderKind::Lines);
        let mut layouter = naga::proc::Layouter::default();
        layouter.update(module.to_ctx()).unwrap();
        let (handle, _) = module
            .types
            .iter()
            .find(|(_, ty)| ty.name.as_deref() == Some("LineInstance"))
            .unwrap();
        assert_eq!(layouter[handle].size as usize, std::mem::size_of::<crate::raster::LineInstance>());
    }

    #[test]
    fn explicit_vertex_reads_corner_at_location_zero() {
        let module = validate(ShaderKind::RectCircleVertex);
        let vs = module.entry_points.iter().find(|ep| ep.name == "vs_main").unwrap();
        assert!(matches!(
            vs.function.arguments[0].binding,
            Some(naga::Binding::Location { location: 0, .. })
        ));
    }
}
