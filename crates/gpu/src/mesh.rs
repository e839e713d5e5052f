use foundation::color::Rgb;
use foundation::math::Vec3;
use scene::components::{Material, Shading, Shape3D, Side, Transform};
use scene::light::AmbientLight;
use scene::world::DrawItem;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ColorVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// How shaded colors are encoded for the render target.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ColorSpace {
    /// Target stores sRGB-encoded values directly.
    Srgb,
    /// Target is an `*Srgb` format and expects linear values.
    Linear,
}

/// World-space triangle mesh for one drawable.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshData {
    pub vertices: Vec<ColorVertex>,
    pub indices: Vec<u16>,
}

impl MeshData {
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// Final surface color of a material under the scene's ambient light.
pub fn shade(material: &Material, ambient: &AmbientLight, space: ColorSpace) -> Rgb {
    let (base, light) = match space {
        ColorSpace::Srgb => (material.color, ambient.color),
        ColorSpace::Linear => (material.color.to_linear(), ambient.color.to_linear()),
    };
    match material.shading {
        Shading::Unlit => base,
        Shading::Lambert => base.modulate(light.scale(ambient.intensity)),
    }
}

pub fn tessellate(item: &DrawItem, ambient: &AmbientLight, space: ColorSpace) -> MeshData {
    let color = shade(&item.material, ambient, space).to_f32();
    match item.drawable.shape {
        Shape3D::Plane { width, height } => plane(&item.transform, width, height, color),
        Shape3D::Cube { size } => cube(&item.transform, size, color),
    }
}

/// Whether back faces must be kept for this item.
pub fn needs_double_sided(item: &DrawItem) -> bool {
    item.material.side == Side::Double
}

fn plane(transform: &Transform, width: f64, height: f64, color: [f32; 3]) -> MeshData {
    let mut mesh = MeshData::default();
    push_quad(
        &mut mesh,
        transform,
        Vec3::ZERO,
        Vec3::new(width / 2.0, 0.0, 0.0),
        Vec3::new(0.0, height / 2.0, 0.0),
        color,
    );
    mesh
}

fn cube(transform: &Transform, size: f64, color: [f32; 3]) -> MeshData {
    let h = size / 2.0;
    let x = Vec3::new(1.0, 0.0, 0.0);
    let y = Vec3::new(0.0, 1.0, 0.0);
    let z = Vec3::new(0.0, 0.0, 1.0);

    // (normal, u, v) with u x v == normal so every face winds CCW from outside.
    let faces = [
        (x, y, z),
        (x.scale(-1.0), z, y),
        (y, z, x),
        (y.scale(-1.0), x, z),
        (z, x, y),
        (z.scale(-1.0), y, x),
    ];

    let mut mesh = MeshData::default();
    for (n, u, v) in faces {
        push_quad(&mut mesh, transform, n.scale(h), u.scale(h), v.scale(h), color);
    }
    mesh
}

fn push_quad(
    mesh: &mut MeshData,
    transform: &Transform,
    center: Vec3,
    half_u: Vec3,
    half_v: Vec3,
    color: [f32; 3],
) {
    let base = mesh.vertices.len() as u16;
    let corners = [
        center - half_u - half_v,
        center + half_u - half_v,
        center + half_u + half_v,
        center - half_u + half_v,
    ];
    for c in corners {
        mesh.vertices.push(ColorVertex {
            position: transform.apply(c).to_f32(),
            color,
        });
    }
    mesh.indices
        .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
}
