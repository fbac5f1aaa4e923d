pub mod camera;
pub mod gpu_context;
pub mod sprite_batch;
pub mod sprite_pipeline;
pub mod texture;

pub use camera::{CameraUniform, ScreenCamera};
pub use gpu_context::GpuContext;
pub use sprite_batch::{BatchBuffers, DrawCall, QuadSpec, SpriteBatch, SpriteVertex};
pub use sprite_pipeline::SpritePipeline;
pub use texture::Texture;
