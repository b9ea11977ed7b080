pub mod engine;
pub mod reconciler;

pub use engine::ContainerLifecycleEngine;
pub use reconciler::Reconciler;
