mod context;
mod scene;

pub(crate) use context::GpuContext;
pub(crate) use scene::ShowcaseScene;
