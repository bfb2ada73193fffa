// VIEW: GPU setup, scene rendering and post-processing
pub mod gpu_init;
pub mod render;
pub mod post;
pub mod texture;

pub use gpu_init::GpuContext;
pub use render::SceneRenderer;
pub use post::{BloomChain, BloomSettings};
