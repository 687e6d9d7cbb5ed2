use super::input::{ActionStates, InputAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKey {
    Menu,
    Fight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageCommand {
    None,
    SwitchTo(StageKey),
    HardResetTo(StageKey),
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

/// Axis-aligned rectangle, top-left origin, y grows downward.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

pub type Color = [u8; 4];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawOp {
    Clear(Color),
    Rect { rect: Rect, color: Color },
}

/// Per-frame list of draw commands emitted by the active stage. The stage
/// never touches the framebuffer; the renderer rasterizes this list.
#[derive(Debug, Default)]
pub struct DrawList {
    ops: Vec<DrawOp>,
}

impl DrawList {
    pub fn clear(&mut self) {
        self.ops.clear();
    }

    pub fn push_clear(&mut self, color: Color) {
        self.ops.push(DrawOp::Clear(color));
    }

    pub fn push_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::Rect { rect, color });
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    quit_requested: bool,
    confirm_pressed: bool,
    actions: ActionStates,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(
        quit_requested: bool,
        confirm_pressed: bool,
        actions: ActionStates,
    ) -> Self {
        Self {
            quit_requested,
            confirm_pressed,
            actions,
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn confirm_pressed(&self) -> bool {
        self.confirm_pressed
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.actions.is_down(action)
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.actions.set(action, is_down);
        self
    }

    pub fn with_confirm_pressed(mut self, confirm_pressed: bool) -> Self {
        self.confirm_pressed = confirm_pressed;
        self
    }

    pub fn with_quit_requested(mut self, quit_requested: bool) -> Self {
        self.quit_requested = quit_requested;
        self
    }
}

pub trait Stage {
    fn load(&mut self);
    fn update(&mut self, input: &InputSnapshot) -> StageCommand;
    fn draw(&self, draw: &mut DrawList);
    fn unload(&mut self);
    fn debug_title(&self) -> Option<String> {
        None
    }
}

struct StageRuntime {
    stage: Box<dyn Stage>,
    is_loaded: bool,
}

pub(crate) struct StageMachine {
    menu: StageRuntime,
    fight: StageRuntime,
    active_stage: StageKey,
}

impl StageMachine {
    pub(crate) fn new(
        menu: Box<dyn Stage>,
        fight: Box<dyn Stage>,
        active_stage: StageKey,
    ) -> Self {
        Self {
            menu: StageRuntime {
                stage: menu,
                is_loaded: false,
            },
            fight: StageRuntime {
                stage: fight,
                is_loaded: false,
            },
            active_stage,
        }
    }

    pub(crate) fn active_stage(&self) -> StageKey {
        self.active_stage
    }

    pub(crate) fn load_active(&mut self) {
        if self.active_runtime_ref().is_loaded {
            return;
        }
        let runtime = self.active_runtime_mut();
        runtime.stage.load();
        runtime.is_loaded = true;
    }

    pub(crate) fn update_active(&mut self, input: &InputSnapshot) -> StageCommand {
        self.active_runtime_mut().stage.update(input)
    }

    pub(crate) fn draw_active(&self, draw: &mut DrawList) {
        self.active_runtime_ref().stage.draw(draw);
    }

    pub(crate) fn debug_title_active(&self) -> Option<String> {
        self.active_runtime_ref().stage.debug_title()
    }

    pub(crate) fn switch_to(&mut self, next_stage: StageKey) -> bool {
        if self.active_stage == next_stage {
            return false;
        }

        self.load_stage_if_needed(next_stage);
        self.active_stage = next_stage;
        true
    }

    pub(crate) fn hard_reset_to(&mut self, next_stage: StageKey) -> bool {
        let runtime = self.runtime_mut(next_stage);
        if runtime.is_loaded {
            runtime.stage.unload();
        }
        runtime.stage.load();
        runtime.is_loaded = true;
        let changed = self.active_stage != next_stage;
        self.active_stage = next_stage;
        changed
    }

    pub(crate) fn shutdown_all(&mut self) {
        for runtime in [&mut self.menu, &mut self.fight] {
            if runtime.is_loaded {
                runtime.stage.unload();
                runtime.is_loaded = false;
            }
        }
    }

    fn load_stage_if_needed(&mut self, key: StageKey) {
        if self.runtime_ref(key).is_loaded {
            return;
        }
        let runtime = self.runtime_mut(key);
        runtime.stage.load();
        runtime.is_loaded = true;
    }

    fn active_runtime_mut(&mut self) -> &mut StageRuntime {
        self.runtime_mut(self.active_stage)
    }

    fn active_runtime_ref(&self) -> &StageRuntime {
        self.runtime_ref(self.active_stage)
    }

    fn runtime_mut(&mut self, key: StageKey) -> &mut StageRuntime {
        match key {
            StageKey::Menu => &mut self.menu,
            StageKey::Fight => &mut self.fight,
        }
    }

    fn runtime_ref(&self, key: StageKey) -> &StageRuntime {
        match key {
            StageKey::Menu => &self.menu,
            StageKey::Fight => &self.fight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingStage {
        loads: Rc<Cell<u32>>,
        unloads: Rc<Cell<u32>>,
        updates: Rc<Cell<u32>>,
        command: StageCommand,
    }

    impl CountingStage {
        fn new(command: StageCommand) -> (Self, Rc<Cell<u32>>, Rc<Cell<u32>>, Rc<Cell<u32>>) {
            let loads = Rc::new(Cell::new(0));
            let unloads = Rc::new(Cell::new(0));
            let updates = Rc::new(Cell::new(0));
            (
                Self {
                    loads: Rc::clone(&loads),
                    unloads: Rc::clone(&unloads),
                    updates: Rc::clone(&updates),
                    command,
                },
                loads,
                unloads,
                updates,
            )
        }
    }

    impl Stage for CountingStage {
        fn load(&mut self) {
            self.loads.set(self.loads.get() + 1);
        }

        fn update(&mut self, _input: &InputSnapshot) -> StageCommand {
            self.updates.set(self.updates.get() + 1);
            self.command
        }

        fn draw(&self, _draw: &mut DrawList) {}

        fn unload(&mut self) {
            self.unloads.set(self.unloads.get() + 1);
        }
    }

    fn counting_machine() -> (StageMachine, Rc<Cell<u32>>, Rc<Cell<u32>>, Rc<Cell<u32>>) {
        let (menu, menu_loads, menu_unloads, _) = CountingStage::new(StageCommand::None);
        let (fight, fight_loads, _, _) = CountingStage::new(StageCommand::None);
        let machine = StageMachine::new(Box::new(menu), Box::new(fight), StageKey::Menu);
        (machine, menu_loads, menu_unloads, fight_loads)
    }

    #[test]
    fn rect_overlap_is_exclusive_at_touching_edges() {
        let left = Rect::new(0.0, 0.0, 10.0, 10.0);
        let touching = Rect::new(10.0, 0.0, 10.0, 10.0);
        let overlapping = Rect::new(9.9, 0.0, 10.0, 10.0);

        assert!(!left.overlaps(&touching));
        assert!(left.overlaps(&overlapping));
        assert!(overlapping.overlaps(&left));
    }

    #[test]
    fn rect_overlap_respects_vertical_separation() {
        let upper = Rect::new(0.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 20.0, 10.0, 10.0);
        assert!(!upper.overlaps(&below));
    }

    #[test]
    fn draw_list_clear_empties_ops() {
        let mut draw = DrawList::default();
        draw.push_clear([0, 0, 0, 255]);
        draw.push_rect(Rect::new(1.0, 2.0, 3.0, 4.0), [255, 0, 0, 255]);
        assert_eq!(draw.ops().len(), 2);

        draw.clear();
        assert!(draw.ops().is_empty());
    }

    #[test]
    fn snapshot_builders_round_trip() {
        let snapshot = InputSnapshot::empty()
            .with_action_down(InputAction::P1Attack, true)
            .with_confirm_pressed(true);

        assert!(snapshot.is_down(InputAction::P1Attack));
        assert!(!snapshot.is_down(InputAction::P2Attack));
        assert!(snapshot.confirm_pressed());
        assert!(!snapshot.quit_requested());
    }

    #[test]
    fn load_active_loads_once() {
        let (mut machine, menu_loads, _, _) = counting_machine();
        machine.load_active();
        machine.load_active();
        assert_eq!(menu_loads.get(), 1);
    }

    #[test]
    fn switch_to_loads_target_lazily_and_reports_change() {
        let (mut machine, _, _, fight_loads) = counting_machine();
        machine.load_active();
        assert_eq!(fight_loads.get(), 0);

        assert!(machine.switch_to(StageKey::Fight));
        assert_eq!(fight_loads.get(), 1);
        assert_eq!(machine.active_stage(), StageKey::Fight);

        assert!(!machine.switch_to(StageKey::Fight));
        assert_eq!(fight_loads.get(), 1);
    }

    #[test]
    fn hard_reset_unloads_then_reloads_target() {
        let (mut machine, menu_loads, menu_unloads, _) = counting_machine();
        machine.load_active();

        let changed = machine.hard_reset_to(StageKey::Menu);
        assert!(!changed);
        assert_eq!(menu_unloads.get(), 1);
        assert_eq!(menu_loads.get(), 2);
    }

    #[test]
    fn hard_reset_to_unloaded_stage_skips_unload() {
        let (mut machine, _, _, fight_loads) = counting_machine();
        machine.load_active();

        assert!(machine.hard_reset_to(StageKey::Fight));
        assert_eq!(fight_loads.get(), 1);
        assert_eq!(machine.active_stage(), StageKey::Fight);
    }

    #[test]
    fn shutdown_unloads_only_loaded_stages() {
        let (mut machine, _, menu_unloads, _) = counting_machine();
        machine.load_active();
        machine.shutdown_all();
        assert_eq!(menu_unloads.get(), 1);

        machine.shutdown_all();
        assert_eq!(menu_unloads.get(), 1);
    }

    #[test]
    fn update_routes_to_active_stage_only() {
        let (menu, _, _, menu_updates) = CountingStage::new(StageCommand::None);
        let (fight, _, _, fight_updates) = CountingStage::new(StageCommand::None);
        let mut machine = StageMachine::new(Box::new(menu), Box::new(fight), StageKey::Menu);
        machine.load_active();

        let _ = machine.update_active(&InputSnapshot::empty());
        assert_eq!(menu_updates.get(), 1);
        assert_eq!(fight_updates.get(), 0);

        machine.switch_to(StageKey::Fight);
        let _ = machine.update_active(&InputSnapshot::empty());
        assert_eq!(menu_updates.get(), 1);
        assert_eq!(fight_updates.get(), 1);
    }
}
