//! Per-tick input snapshot.
//!
//! The platform layer polls its devices and fills an [`InputSnapshot`];
//! the simulation reads nothing else. Press and release counts are kept
//! per tick so a tap shorter than one frame is never lost.

use crate::geometry::Vec2;

/// Logical actions the simulation responds to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum InputAction {
    /// Jump.
    Up,
    /// Walk right.
    Right,
    /// Unused by the simulation; reserved for crouch.
    Down,
    /// Walk left.
    Left,
    /// Pan the editor camera up.
    CamUp,
    /// Pan the editor camera right.
    CamRight,
    /// Pan the editor camera down.
    CamDown,
    /// Pan the editor camera left.
    CamLeft,
    /// Melee attack.
    Attack,
    /// Throw a projectile.
    Throw,
    /// Save the level.
    EditorSave,
    /// Load the level.
    EditorLoad,
    /// Cycle the editor draw kind.
    EditorCycleDrawType,
}

impl InputAction {
    /// Number of actions.
    pub const COUNT: usize = 13;

    /// Every action in index order.
    pub const ALL: [InputAction; Self::COUNT] = [
        InputAction::Up,
        InputAction::Right,
        InputAction::Down,
        InputAction::Left,
        InputAction::CamUp,
        InputAction::CamRight,
        InputAction::CamDown,
        InputAction::CamLeft,
        InputAction::Attack,
        InputAction::Throw,
        InputAction::EditorSave,
        InputAction::EditorLoad,
        InputAction::EditorCycleDrawType,
    ];
}

/// State of one button over a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonState {
    /// Number of press transitions during the tick.
    pub presses: u32,
    /// Number of release transitions during the tick.
    pub releases: u32,
    /// Whether the button is held at the end of the tick.
    pub down: bool,
}

impl ButtonState {
    /// Held, with no transitions this tick.
    pub const HELD: Self = Self {
        presses: 0,
        releases: 0,
        down: true,
    };

    /// Pressed once this tick and still held.
    pub const PRESSED: Self = Self {
        presses: 1,
        releases: 0,
        down: true,
    };

    /// Released once this tick.
    pub const RELEASED: Self = Self {
        presses: 0,
        releases: 1,
        down: false,
    };

    /// Whether at least one press happened this tick.
    #[inline]
    pub fn pressed(self) -> bool {
        self.presses > 0
    }

    /// Whether at least one release happened this tick.
    #[inline]
    pub fn released(self) -> bool {
        self.releases > 0
    }
}

/// Mouse position in screen space plus its two buttons.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MouseState {
    /// Cursor position in screen units, origin at screen center.
    pub pos: Vec2,
    /// Left button.
    pub left: ButtonState,
    /// Right button.
    pub right: ButtonState,
}

/// Everything the simulation reads from the outside world in one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    /// Per-action button state, indexed by [`InputAction`].
    pub actions: [ButtonState; InputAction::COUNT],
    /// Mouse state.
    pub mouse: MouseState,
}

impl InputSnapshot {
    /// State of one action.
    #[inline]
    pub fn action(&self, action: InputAction) -> ButtonState {
        self.actions[action as usize]
    }

    /// Whether `action` was pressed this tick.
    #[inline]
    pub fn pressed(&self, action: InputAction) -> bool {
        self.action(action).pressed()
    }

    /// Whether `action` is held.
    #[inline]
    pub fn down(&self, action: InputAction) -> bool {
        self.action(action).down
    }

    /// Builder: mark `action` as held.
    pub fn with_down(mut self, action: InputAction) -> Self {
        self.actions[action as usize] = ButtonState::HELD;
        self
    }

    /// Builder: mark `action` as pressed this tick.
    pub fn with_press(mut self, action: InputAction) -> Self {
        self.actions[action as usize] = ButtonState::PRESSED;
        self
    }

    /// Builder: set the mouse state.
    pub fn with_mouse(mut self, mouse: MouseState) -> Self {
        self.mouse = mouse;
        self
    }
}
