mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod stage;

pub use input::InputAction;
pub use loop_runner::{run_app, AppError, LoopConfig};
pub use metrics::LoopMetricsSnapshot;
pub use rendering::Renderer;
pub use stage::{
    Color, DrawList, DrawOp, InputSnapshot, Rect, Stage, StageCommand, StageKey, Vec2,
};
