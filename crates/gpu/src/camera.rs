use foundation::math::Vec3;
use scene::camera::PerspectiveCamera;

pub type Mat4 = [[f32; 4]; 4];

pub fn mat4_mul(a: Mat4, b: Mat4) -> Mat4 {
    // Column-major matrix multiply: c = a * b
    let mut c = [[0.0f32; 4]; 4];
    for col in 0..4 {
        for row in 0..4 {
            c[col][row] = a[0][row] * b[col][0]
                + a[1][row] * b[col][1]
                + a[2][row] * b[col][2]
                + a[3][row] * b[col][3];
        }
    }
    c
}

pub fn mat4_transform_point(m: Mat4, p: [f32; 3]) -> [f32; 4] {
    let mut out = [0.0f32; 4];
    for (row, o) in out.iter_mut().enumerate() {
        *o = m[0][row] * p[0] + m[1][row] * p[1] + m[2][row] * p[2] + m[3][row];
    }
    out
}

pub fn mat4_perspective_rh_z0(fov_y_rad: f64, aspect: f64, near: f64, far: f64) -> Mat4 {
    let f = 1.0 / (0.5 * fov_y_rad).tan();
    // A zero-width viewport still needs a finite matrix.
    let m00 = (f / aspect.max(1e-6)) as f32;
    let m11 = f as f32;
    let m22 = (far / (near - far)) as f32;
    let m23 = ((near * far) / (near - far)) as f32;

    // Column-major (WGSL) perspective matrix, RH, depth range [0, 1].
    // This is the column-major form of:
    // [ m00,  0,   0,   0 ]
    // [  0,  m11,  0,   0 ]
    // [  0,   0,  m22, m23 ]
    // [  0,   0,  -1,   0 ]
    [
        [m00, 0.0, 0.0, 0.0],
        [0.0, m11, 0.0, 0.0],
        [0.0, 0.0, m22, -1.0],
        [0.0, 0.0, m23, 0.0],
    ]
}

const DEGENERATE_EPS: f64 = 1e-9;

/// Right-handed view matrix. A camera sitting on its target looks down -Z,
/// and a view direction parallel to `up` borrows -Z (then +X) as its up axis
/// so the basis never collapses.
pub fn mat4_look_at_rh(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let mut f = (target - eye).normalize();
    if f.length() < DEGENERATE_EPS {
        f = Vec3::new(0.0, 0.0, -1.0);
    }
    let s = [up, Vec3::new(0.0, 0.0, -1.0), Vec3::new(1.0, 0.0, 0.0)]
        .into_iter()
        .map(|candidate| f.cross(candidate))
        .find(|s| s.length() > DEGENERATE_EPS)
        .unwrap_or(Vec3::new(1.0, 0.0, 0.0))
        .normalize();
    let u = s.cross(f);

    let ex = -s.dot(eye);
    let ey = -u.dot(eye);
    let ez = f.dot(eye);

    // Column-major (WGSL) view matrix.
    [
        [s.x as f32, u.x as f32, (-f.x) as f32, 0.0],
        [s.y as f32, u.y as f32, (-f.y) as f32, 0.0],
        [s.z as f32, u.z as f32, (-f.z) as f32, 0.0],
        [ex as f32, ey as f32, ez as f32, 1.0],
    ]
}

pub fn camera_view_proj(camera: &PerspectiveCamera) -> Mat4 {
    let view = mat4_look_at_rh(camera.position, camera.target, camera.up);
    let proj = mat4_perspective_rh_z0(
        camera.fov_y_deg.to_radians(),
        camera.aspect,
        camera.near,
        camera.far,
    );
    mat4_mul(proj, view)
}
