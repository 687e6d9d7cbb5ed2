pub mod app;

pub use app::{
    run_app, AppError, Color, DrawList, DrawOp, InputAction, InputSnapshot, LoopConfig,
    LoopMetricsSnapshot, Rect, Renderer, Stage, StageCommand, StageKey, Vec2,
};
