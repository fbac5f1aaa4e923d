use glam::{Mat4, Vec2};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

/// Fixed orthographic view over a logical screen with the origin at the
/// top-left corner and y growing downwards.
pub struct ScreenCamera {
    pub logical_size: Vec2,
}

impl ScreenCamera {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            logical_size: Vec2::new(width, height),
        }
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::orthographic_rh(0.0, self.logical_size.x, self.logical_size.y, 0.0, -1.0, 1.0)
    }

    pub fn build_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.projection().to_cols_array_2d(),
        }
    }

    /// Map a window position in physical pixels to logical screen units.
    pub fn window_to_logical(&self, position: Vec2, window_px: (u32, u32)) -> Vec2 {
        let w = window_px.0.max(1) as f32;
        let h = window_px.1.max(1) as f32;
        Vec2::new(
            position.x * self.logical_size.x / w,
            position.y * self.logical_size.y / h,
        )
    }
}
