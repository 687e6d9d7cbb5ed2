use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use pixels::Error as PixelsError;
use thiserror::Error;
use tracing::{info, warn};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowBuilder;

use super::metrics::MetricsAccumulator;
use super::rendering::Renderer;
use super::stage::{DrawList, StageCommand, StageMachine};
use super::{InputAction, InputSnapshot, Stage, StageKey};

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub target_tps: u32,
    pub max_frame_delta: Duration,
    pub max_ticks_per_frame: u32,
    pub metrics_log_interval: Duration,
    pub max_render_fps: Option<u32>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Stick Duel".to_string(),
            window_width: 800,
            window_height: 450,
            target_tps: 60,
            max_frame_delta: Duration::from_millis(250),
            max_ticks_per_frame: 5,
            metrics_log_interval: Duration::from_secs(1),
            max_render_fps: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize renderer: {0}")]
    CreateRenderer(#[source] PixelsError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

pub fn run_app(
    config: LoopConfig,
    menu: Box<dyn Stage>,
    fight: Box<dyn Stage>,
) -> Result<(), AppError> {
    let mut stages = StageMachine::new(menu, fight, StageKey::Menu);

    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(
                config.window_width as f64,
                config.window_height as f64,
            ))
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    );
    let window_for_loop = Arc::clone(&window);
    let mut renderer = Renderer::new(
        Arc::clone(&window),
        config.window_width,
        config.window_height,
    )
    .map_err(AppError::CreateRenderer)?;

    event_loop.set_control_flow(ControlFlow::Poll);

    let target_tps = config.target_tps.max(1);
    let max_frame_delta =
        normalize_non_zero_duration(config.max_frame_delta, Duration::from_millis(250));
    let max_ticks_per_frame = config.max_ticks_per_frame.max(1);
    let metrics_log_interval =
        normalize_non_zero_duration(config.metrics_log_interval, Duration::from_secs(1));
    let fixed_dt = Duration::from_secs_f64(1.0 / target_tps as f64);
    let effective_render_cap = normalize_render_fps_cap(config.max_render_fps);
    let render_frame_target = target_frame_duration(effective_render_cap);
    let mut input_collector = InputCollector::default();
    stages.load_active();
    info!(stage = ?stages.active_stage(), "stage_loaded");

    info!(
        target_tps,
        max_frame_delta_ms = max_frame_delta.as_millis() as u64,
        max_ticks_per_frame,
        metrics_log_interval_ms = metrics_log_interval.as_millis() as u64,
        render_fps_cap = %format_render_cap(effective_render_cap),
        "loop_config"
    );

    let mut accumulator = Duration::ZERO;
    let mut last_frame_instant = Instant::now();
    let mut last_present_instant = Instant::now();
    let mut metrics_accumulator = MetricsAccumulator::new(metrics_log_interval);
    let mut draw_list = DrawList::default();
    let mut last_applied_title: Option<String> = None;

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window_for_loop.id() => {
                match event {
                    WindowEvent::CloseRequested => {
                        input_collector.mark_quit_requested();
                        info!(reason = "window_close", "shutdown_requested");
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        if let Err(error) =
                            renderer.resize_surface(new_size.width, new_size.height)
                        {
                            warn!(error = %error, "renderer_resize_failed");
                            window_target.exit();
                        }
                    }
                    WindowEvent::ScaleFactorChanged { .. } => {
                        let size = window_for_loop.inner_size();
                        if let Err(error) = renderer.resize_surface(size.width, size.height) {
                            warn!(error = %error, "renderer_resize_failed");
                            window_target.exit();
                        }
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        input_collector.handle_keyboard_input(&event);
                        if input_collector.quit_requested {
                            info!(reason = "escape_key", "shutdown_requested");
                            window_target.exit();
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        let now = Instant::now();
                        let raw_frame_dt = now.saturating_duration_since(last_frame_instant);
                        last_frame_instant = now;

                        let clamped_frame_dt = clamp_frame_delta(raw_frame_dt, max_frame_delta);
                        accumulator = accumulator.saturating_add(clamped_frame_dt);

                        let step_plan = plan_sim_steps(accumulator, fixed_dt, max_ticks_per_frame);
                        for _ in 0..step_plan.ticks_to_run {
                            let input_snapshot = input_collector.snapshot_for_tick();
                            let command = stages.update_active(&input_snapshot);

                            let switched = match command {
                                StageCommand::SwitchTo(next_stage) => stages.switch_to(next_stage),
                                StageCommand::HardResetTo(next_stage) => {
                                    stages.hard_reset_to(next_stage)
                                }
                                StageCommand::None => false,
                            };
                            if switched {
                                info!(stage = ?stages.active_stage(), "stage_switched");
                            }
                            metrics_accumulator.record_tick();
                        }
                        accumulator = step_plan.remaining_accumulator;

                        if step_plan.dropped_backlog > Duration::ZERO {
                            warn!(
                                dropped_backlog_ms = step_plan.dropped_backlog.as_millis() as u64,
                                max_ticks_per_frame, "sim_clamp_triggered"
                            );
                        }

                        // Single authoritative FPS cap sleep point for render pacing.
                        let elapsed_since_last_present =
                            Instant::now().saturating_duration_since(last_present_instant);
                        let cap_sleep =
                            compute_cap_sleep(elapsed_since_last_present, render_frame_target);
                        if cap_sleep > Duration::ZERO {
                            thread::sleep(cap_sleep);
                        }

                        draw_list.clear();
                        stages.draw_active(&mut draw_list);
                        if let Err(error) = renderer.present(&draw_list) {
                            warn!(error = %error, "renderer_draw_failed");
                            window_target.exit();
                        }
                        last_present_instant = Instant::now();

                        let next_title = stages.debug_title_active();
                        if next_title != last_applied_title {
                            if let Some(title) = &next_title {
                                window_for_loop.set_title(title);
                            } else {
                                window_for_loop.set_title(&config.window_title);
                            }
                            last_applied_title = next_title;
                        }
                        metrics_accumulator.record_frame(raw_frame_dt);

                        if let Some(snapshot) = metrics_accumulator.maybe_snapshot(now) {
                            info!(
                                fps = snapshot.fps,
                                tps = snapshot.tps,
                                frame_time_ms = snapshot.frame_time_ms,
                                stage = ?stages.active_stage(),
                                "loop_metrics"
                            );
                        }
                    }
                    _ => {}
                }
            }
            Event::AboutToWait => {
                window_for_loop.request_redraw();
            }
            Event::LoopExiting => {
                stages.shutdown_all();
                info!("shutdown");
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)
}

#[derive(Debug, Default)]
struct InputCollector {
    quit_requested: bool,
    confirm_is_down: bool,
    confirm_pressed_edge: bool,
    action_states: super::input::ActionStates,
}

impl InputCollector {
    fn mark_quit_requested(&mut self) {
        self.quit_requested = true;
    }

    fn handle_keyboard_input(&mut self, key_event: &winit::event::KeyEvent) {
        let is_pressed = key_event.state == ElementState::Pressed;
        self.update_action_state_from_physical_key(key_event.physical_key, is_pressed);
        self.handle_confirm_key_state(is_confirm_key(key_event), key_event.state);
    }

    fn handle_confirm_key_state(&mut self, is_confirm: bool, state: ElementState) {
        if !is_confirm {
            return;
        }

        match state {
            ElementState::Pressed => {
                if !self.confirm_is_down {
                    self.confirm_pressed_edge = true;
                }
                self.confirm_is_down = true;
            }
            ElementState::Released => self.confirm_is_down = false,
        }
    }

    fn snapshot_for_tick(&mut self) -> InputSnapshot {
        let snapshot = InputSnapshot::new(
            self.quit_requested,
            self.confirm_pressed_edge,
            self.action_states,
        );
        self.confirm_pressed_edge = false;
        snapshot
    }

    fn update_action_state_from_physical_key(&mut self, key: PhysicalKey, is_pressed: bool) {
        match key {
            PhysicalKey::Code(KeyCode::KeyA) => {
                self.action_states.set(InputAction::P1Left, is_pressed);
            }
            PhysicalKey::Code(KeyCode::KeyD) => {
                self.action_states.set(InputAction::P1Right, is_pressed);
            }
            PhysicalKey::Code(KeyCode::KeyW) => {
                self.action_states.set(InputAction::P1Jump, is_pressed);
            }
            PhysicalKey::Code(KeyCode::KeyS) => {
                self.action_states.set(InputAction::P1Attack, is_pressed);
            }
            PhysicalKey::Code(KeyCode::ArrowLeft) => {
                self.action_states.set(InputAction::P2Left, is_pressed);
            }
            PhysicalKey::Code(KeyCode::ArrowRight) => {
                self.action_states.set(InputAction::P2Right, is_pressed);
            }
            PhysicalKey::Code(KeyCode::ArrowUp) => {
                self.action_states.set(InputAction::P2Jump, is_pressed);
            }
            PhysicalKey::Code(KeyCode::ArrowDown) => {
                self.action_states.set(InputAction::P2Attack, is_pressed);
            }
            PhysicalKey::Code(KeyCode::Enter) => {
                self.action_states.set(InputAction::Confirm, is_pressed);
            }
            PhysicalKey::Code(KeyCode::Escape) => {
                self.action_states.set(InputAction::Quit, is_pressed);
                if is_pressed {
                    self.mark_quit_requested();
                }
            }
            _ => {}
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct StepPlan {
    ticks_to_run: u32,
    remaining_accumulator: Duration,
    dropped_backlog: Duration,
}

fn plan_sim_steps(
    mut accumulator: Duration,
    fixed_dt: Duration,
    max_ticks_per_frame: u32,
) -> StepPlan {
    let mut ticks_to_run = 0u32;

    while accumulator >= fixed_dt && ticks_to_run < max_ticks_per_frame {
        accumulator = accumulator.saturating_sub(fixed_dt);
        ticks_to_run = ticks_to_run.saturating_add(1);
    }

    if accumulator >= fixed_dt {
        let dropped_backlog = accumulator;
        accumulator = Duration::ZERO;
        StepPlan {
            ticks_to_run,
            remaining_accumulator: accumulator,
            dropped_backlog,
        }
    } else {
        StepPlan {
            ticks_to_run,
            remaining_accumulator: accumulator,
            dropped_backlog: Duration::ZERO,
        }
    }
}

fn clamp_frame_delta(frame_dt: Duration, max_frame_delta: Duration) -> Duration {
    frame_dt.min(max_frame_delta)
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}

fn normalize_render_fps_cap(cap: Option<u32>) -> Option<u32> {
    cap.filter(|value| *value > 0)
}

fn target_frame_duration(max_render_fps: Option<u32>) -> Option<Duration> {
    max_render_fps.map(|fps| Duration::from_secs_f64(1.0 / fps as f64))
}

fn compute_cap_sleep(elapsed: Duration, target: Option<Duration>) -> Duration {
    match target {
        Some(frame_target) if elapsed < frame_target => frame_target - elapsed,
        _ => Duration::ZERO,
    }
}

fn format_render_cap(cap: Option<u32>) -> String {
    match cap {
        Some(value) => value.to_string(),
        None => "off".to_string(),
    }
}

fn is_confirm_key(key_event: &winit::event::KeyEvent) -> bool {
    matches!(key_event.physical_key, PhysicalKey::Code(KeyCode::Enter))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_frame_delta_caps_large_frame() {
        let max_frame_delta = Duration::from_millis(250);
        let raw_frame_dt = Duration::from_millis(600);

        assert_eq!(
            clamp_frame_delta(raw_frame_dt, max_frame_delta),
            max_frame_delta
        );
    }

    #[test]
    fn plan_sim_steps_runs_expected_ticks_without_drop() {
        let fixed_dt = Duration::from_millis(16);
        let result = plan_sim_steps(Duration::from_millis(48), fixed_dt, 5);

        assert_eq!(result.ticks_to_run, 3);
        assert_eq!(result.remaining_accumulator, Duration::ZERO);
        assert_eq!(result.dropped_backlog, Duration::ZERO);
    }

    #[test]
    fn plan_sim_steps_drops_backlog_when_tick_cap_hit() {
        let fixed_dt = Duration::from_millis(16);
        let result = plan_sim_steps(Duration::from_millis(120), fixed_dt, 3);

        assert_eq!(result.ticks_to_run, 3);
        assert_eq!(result.remaining_accumulator, Duration::ZERO);
        assert_eq!(result.dropped_backlog, Duration::from_millis(72));
    }

    #[test]
    fn confirm_press_is_edge_triggered_for_single_tick() {
        let mut input = InputCollector::default();
        input.handle_confirm_key_state(true, ElementState::Pressed);

        let first = input.snapshot_for_tick();
        let second = input.snapshot_for_tick();

        assert!(first.confirm_pressed());
        assert!(!second.confirm_pressed());
    }

    #[test]
    fn held_confirm_does_not_spam_press_edges() {
        let mut input = InputCollector::default();

        input.handle_confirm_key_state(true, ElementState::Pressed);
        let first = input.snapshot_for_tick();

        input.handle_confirm_key_state(true, ElementState::Pressed);
        let second = input.snapshot_for_tick();

        input.handle_confirm_key_state(true, ElementState::Released);
        input.handle_confirm_key_state(true, ElementState::Pressed);
        let third = input.snapshot_for_tick();

        assert!(first.confirm_pressed());
        assert!(!second.confirm_pressed());
        assert!(third.confirm_pressed());
    }

    #[test]
    fn no_confirm_edge_without_press() {
        let mut input = InputCollector::default();
        let first = input.snapshot_for_tick();
        let second = input.snapshot_for_tick();

        assert!(!first.confirm_pressed());
        assert!(!second.confirm_pressed());
    }

    #[test]
    fn wasd_maps_to_fighter_one_actions() {
        let mut input = InputCollector::default();

        input.update_action_state_from_physical_key(PhysicalKey::Code(KeyCode::KeyA), true);
        input.update_action_state_from_physical_key(PhysicalKey::Code(KeyCode::KeyW), true);
        input.update_action_state_from_physical_key(PhysicalKey::Code(KeyCode::KeyS), true);

        let snapshot = input.snapshot_for_tick();
        assert!(snapshot.is_down(InputAction::P1Left));
        assert!(snapshot.is_down(InputAction::P1Jump));
        assert!(snapshot.is_down(InputAction::P1Attack));
        assert!(!snapshot.is_down(InputAction::P1Right));
    }

    #[test]
    fn arrows_map_to_fighter_two_actions() {
        let mut input = InputCollector::default();

        input.update_action_state_from_physical_key(PhysicalKey::Code(KeyCode::ArrowRight), true);
        input.update_action_state_from_physical_key(PhysicalKey::Code(KeyCode::ArrowUp), true);
        input.update_action_state_from_physical_key(PhysicalKey::Code(KeyCode::ArrowDown), true);

        let snapshot = input.snapshot_for_tick();
        assert!(snapshot.is_down(InputAction::P2Right));
        assert!(snapshot.is_down(InputAction::P2Jump));
        assert!(snapshot.is_down(InputAction::P2Attack));
        assert!(!snapshot.is_down(InputAction::P2Left));
    }

    #[test]
    fn key_release_clears_action_state() {
        let mut input = InputCollector::default();
        input.update_action_state_from_physical_key(PhysicalKey::Code(KeyCode::KeyD), true);
        input.update_action_state_from_physical_key(PhysicalKey::Code(KeyCode::KeyD), false);

        let snapshot = input.snapshot_for_tick();
        assert!(!snapshot.is_down(InputAction::P1Right));
    }

    #[test]
    fn fighter_keymaps_do_not_cross_talk() {
        let mut input = InputCollector::default();
        input.update_action_state_from_physical_key(PhysicalKey::Code(KeyCode::KeyA), true);

        let snapshot = input.snapshot_for_tick();
        assert!(snapshot.is_down(InputAction::P1Left));
        assert!(!snapshot.is_down(InputAction::P2Left));
    }

    #[test]
    fn escape_marks_quit_requested() {
        let mut input = InputCollector::default();
        input.update_action_state_from_physical_key(PhysicalKey::Code(KeyCode::Escape), true);

        let snapshot = input.snapshot_for_tick();
        assert!(snapshot.quit_requested());
    }

    #[test]
    fn target_frame_duration_none_when_cap_off() {
        assert_eq!(target_frame_duration(None), None);
    }

    #[test]
    fn target_frame_duration_for_60hz_is_expected() {
        let duration = target_frame_duration(Some(60)).expect("duration");
        assert!((duration.as_secs_f64() - (1.0 / 60.0)).abs() < 0.000_001);
    }

    #[test]
    fn compute_cap_sleep_zero_when_over_budget() {
        let sleep = compute_cap_sleep(Duration::from_millis(20), target_frame_duration(Some(60)));
        assert_eq!(sleep, Duration::ZERO);
    }

    #[test]
    fn compute_cap_sleep_positive_when_under_budget() {
        let sleep = compute_cap_sleep(Duration::from_millis(5), target_frame_duration(Some(60)));
        assert!(sleep > Duration::ZERO);
    }

    #[test]
    fn normalize_render_fps_cap_disables_zero() {
        assert_eq!(normalize_render_fps_cap(Some(0)), None);
        assert_eq!(normalize_render_fps_cap(Some(60)), Some(60));
    }
}
