use engine::{Color, DrawList, InputSnapshot, Rect, Stage, StageCommand, StageKey};
use tracing::info;

const MENU_BACKDROP_COLOR: Color = [16, 18, 26, 255];
const TITLE_BLOCK_COLOR: Color = [230, 230, 240, 255];
const PROMPT_BLOCK_COLOR: Color = [120, 200, 160, 255];

/// Title screen. Confirm hard-resets into a fresh fight so every match
/// starts from a clean load.
pub(crate) struct MenuStage;

impl Stage for MenuStage {
    fn load(&mut self) {
        info!("menu_loaded");
    }

    fn update(&mut self, input: &InputSnapshot) -> StageCommand {
        if input.confirm_pressed() {
            return StageCommand::HardResetTo(StageKey::Fight);
        }
        StageCommand::None
    }

    fn draw(&self, draw: &mut DrawList) {
        draw.push_clear(MENU_BACKDROP_COLOR);
        draw.push_rect(Rect::new(250.0, 120.0, 300.0, 60.0), TITLE_BLOCK_COLOR);
        draw.push_rect(Rect::new(320.0, 260.0, 160.0, 24.0), PROMPT_BLOCK_COLOR);
    }

    fn unload(&mut self) {
        info!("menu_unloaded");
    }
}
