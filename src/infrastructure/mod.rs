//! 基础设施层：只暴露渲染能力，不关心批次与文件

pub mod rendering_engine;

pub use rendering_engine::{RenderSession, RenderingEngine};
