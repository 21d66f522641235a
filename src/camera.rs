//! Camera, viewport and projection.
//!
//! The projection follows the classic symmetric-frustum OpenGL layout with a
//! clip-space depth range of `[-1, 1]`. Backends rendering through wgpu can
//! remap it with [`OPENGL_TO_WGPU_MATRIX`] (see [`Projection::to_wgpu`]).

use cgmath::{Deg, InnerSpace, Matrix4, Point3, Rad, Vector3, Vector4};
use winit::dpi::PhysicalSize;

use crate::error::{RenderError, Result};

/// Maps GL depth `[-1, 1]` onto wgpu depth `[0, 1]`.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::from_cols(
    Vector4::new(1.0, 0.0, 0.0, 0.0),
    Vector4::new(0.0, 1.0, 0.0, 0.0),
    Vector4::new(0.0, 0.0, 0.5, 0.0),
    Vector4::new(0.0, 0.0, 0.5, 1.0),
);

/// Size of the surface being rendered to, in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    // callers must rule out a zero height first
    fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

impl From<PhysicalSize<u32>> for Viewport {
    fn from(size: PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

/// First person camera described by a position and two angles.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub position: Point3<f32>,
    /// Rotation around the y axis (turn head left/right).
    pub yaw: Rad<f32>,
    /// Rotation around the x axis (head up/down).
    pub pitch: Rad<f32>,
}

impl Camera {
    pub fn new<V: Into<Point3<f32>>, Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
    ) -> Self {
        Self {
            position: position.into(),
            yaw: yaw.into(),
            pitch: pitch.into(),
        }
    }

    /// Unit vector the camera looks along.
    pub fn forward(&self) -> Vector3<f32> {
        let (sin_pitch, cos_pitch) = self.pitch.0.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.0.sin_cos();
        Vector3::new(cos_pitch * cos_yaw, sin_pitch, cos_pitch * sin_yaw).normalize()
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_to_rh(self.position, self.forward(), Vector3::unit_y())
    }
}

/// Builds the perspective matrix for the given frustum.
///
/// Entries are indexed `[column][row]`:
///
/// * `m[0][0] = y_scale / aspect`, `m[1][1] = y_scale` with
///   `y_scale = 1 / tan(fov / 2)`
/// * `m[2][2] = -(far + near) / (far - near)`, `m[2][3] = -1`
/// * `m[3][2] = -(2 * far * near) / (far - near)`, `m[3][3] = 0`
///
/// Everything else is zero. Fails on a zero sized viewport, on `far == near`
/// and whenever the result would contain NaN or infinity.
pub fn perspective(
    fov: impl Into<Deg<f32>>,
    viewport: Viewport,
    near: f32,
    far: f32,
) -> Result<Matrix4<f32>> {
    if viewport.width == 0 || viewport.height == 0 {
        return Err(RenderError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    let frustum_length = far - near;
    if frustum_length == 0.0 {
        return Err(RenderError::DegenerateFrustum { near, far });
    }

    let fov: Deg<f32> = fov.into();
    let half_fov = Rad::from(fov) / 2.0;
    let y_scale = 1.0 / half_fov.0.tan();
    let x_scale = y_scale / viewport.aspect();

    let matrix = Matrix4::from_cols(
        Vector4::new(x_scale, 0.0, 0.0, 0.0),
        Vector4::new(0.0, y_scale, 0.0, 0.0),
        Vector4::new(0.0, 0.0, -((far + near) / frustum_length), -1.0),
        Vector4::new(0.0, 0.0, -((2.0 * far * near) / frustum_length), 0.0),
    );

    let cols: [[f32; 4]; 4] = matrix.into();
    if !cols.iter().flatten().all(|v| v.is_finite()) {
        return Err(RenderError::NonFiniteProjection);
    }
    Ok(matrix)
}

/// A validated projection together with the parameters it was built from.
#[derive(Clone, Debug)]
pub struct Projection {
    viewport: Viewport,
    fov: Deg<f32>,
    znear: f32,
    zfar: f32,
    matrix: Matrix4<f32>,
}

impl Projection {
    pub fn new(
        viewport: Viewport,
        fov: impl Into<Deg<f32>>,
        znear: f32,
        zfar: f32,
    ) -> Result<Self> {
        let fov: Deg<f32> = fov.into();
        let matrix = perspective(fov, viewport, znear, zfar)?;
        Ok(Self {
            viewport,
            fov,
            znear,
            zfar,
            matrix,
        })
    }

    /// Recomputes the matrix for a new viewport. On error the previous
    /// projection stays in place.
    pub fn resize(&mut self, viewport: Viewport) -> Result<()> {
        self.matrix = perspective(self.fov, viewport, self.znear, self.zfar)?;
        self.viewport = viewport;
        Ok(())
    }

    pub fn matrix(&self) -> &Matrix4<f32> {
        &self.matrix
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn to_wgpu(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * self.matrix
    }
}
