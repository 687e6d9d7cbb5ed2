#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    P1Left,
    P1Right,
    P1Jump,
    P1Attack,
    P2Left,
    P2Right,
    P2Jump,
    P2Attack,
    Confirm,
    Quit,
}

const ACTION_COUNT: usize = 10;

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ActionStates {
    down: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub(crate) fn set(&mut self, action: InputAction, is_down: bool) {
        self.down[action.index()] = is_down;
    }

    pub(crate) fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }
}

impl InputAction {
    const fn index(self) -> usize {
        match self {
            InputAction::P1Left => 0,
            InputAction::P1Right => 1,
            InputAction::P1Jump => 2,
            InputAction::P1Attack => 3,
            InputAction::P2Left => 4,
            InputAction::P2Right => 5,
            InputAction::P2Jump => 6,
            InputAction::P2Attack => 7,
            InputAction::Confirm => 8,
            InputAction::Quit => 9,
        }
    }
}
