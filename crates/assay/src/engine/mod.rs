//! Engine descriptors, capability variants, and the engine registry.

mod descriptor;
mod kind;
mod registry;

pub use descriptor::EngineDescriptor;
pub use kind::EngineKind;
pub use registry::{Constructor, DEFAULT_MODULE, EngineRegistry, EngineType};
