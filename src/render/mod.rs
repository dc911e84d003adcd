pub mod effects;
pub mod renderer;

pub use effects::EffectsOverlay;
pub use renderer::Renderer;
