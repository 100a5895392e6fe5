//! Input state management
//!
//! Input is double buffered: every tick the current snapshot becomes the
//! previous one and a fresh current snapshot is built from the event batch.
//! Edge-triggered queries ("just down", "just up") compare exactly that pair.

use crate::event::{MouseButton, RawEvent};
use ember_core::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use winit::keyboard::KeyCode;

/// Window geometry and focus, plus the per-tick window flags
#[derive(Debug, Clone, Default, PartialEq)]
struct WindowState {
    position: (i32, i32),
    size: (u32, u32),
    focused: bool,
    moved: bool,
    resized: bool,
    closed: bool,
    gained_focus: bool,
    lost_focus: bool,
}

impl WindowState {
    fn clear_transient(&mut self) {
        self.moved = false;
        self.resized = false;
        self.closed = false;
        self.gained_focus = false;
        self.lost_focus = false;
    }
}

/// Everything the input state knows about one tick
#[derive(Debug, Clone, Default, PartialEq)]
struct InputSnapshot {
    window: WindowState,
    mouse_position: Vec2,
    mouse_buttons: HashSet<MouseButton>,
    keys: HashSet<KeyCode>,
}

impl InputSnapshot {
    fn apply(&mut self, event: RawEvent) {
        match event {
            RawEvent::KeyDown(key) => {
                self.keys.insert(key);
            }
            RawEvent::KeyUp(key) => {
                self.keys.remove(&key);
            }
            RawEvent::MouseButtonDown(button) => {
                self.mouse_buttons.insert(button);
            }
            RawEvent::MouseButtonUp(button) => {
                self.mouse_buttons.remove(&button);
            }
            RawEvent::WindowMoved => self.window.moved = true,
            RawEvent::WindowResized => self.window.resized = true,
            RawEvent::WindowClosed => self.window.closed = true,
            RawEvent::WindowFocusGained => self.window.gained_focus = true,
            RawEvent::WindowFocusLost => self.window.lost_focus = true,
        }
    }

    fn refresh(&mut self, polled: &PolledState) {
        self.mouse_position = polled.mouse_position;
        self.window.position = polled.window_position;
        self.window.size = polled.window_size;
        self.window.focused = polled.focused;
    }
}

/// Values queried directly from the platform rather than derived from events
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PolledState {
    pub mouse_position: Vec2,
    pub window_position: (i32, i32),
    pub window_size: (u32, u32),
    pub focused: bool,
}

/// Double-buffered keyboard, mouse and window state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    current: InputSnapshot,
    previous: InputSnapshot,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with both snapshots holding the given polled values, so the
    /// first tick reports no mouse movement.
    pub fn with_polled(polled: &PolledState) -> Self {
        let mut current = InputSnapshot::default();
        current.refresh(polled);
        Self {
            previous: current.clone(),
            current,
        }
    }

    /// Advance one tick: rotate the buffers, apply `events` in order, then
    /// refresh the polled values.
    pub fn update(self, events: &[RawEvent], polled: &PolledState) -> InputState {
        let previous = self.current;
        let mut current = previous.clone();
        current.window.clear_transient();

        for event in events {
            current.apply(*event);
        }
        current.refresh(polled);

        InputState { current, previous }
    }

    // --- Keyboard ---

    pub fn key_down(&self, key: KeyCode) -> bool {
        self.current.keys.contains(&key)
    }

    /// Down this tick, up the tick before
    pub fn key_just_down(&self, key: KeyCode) -> bool {
        self.current.keys.contains(&key) && !self.previous.keys.contains(&key)
    }

    /// Up this tick, down the tick before
    pub fn key_just_up(&self, key: KeyCode) -> bool {
        !self.current.keys.contains(&key) && self.previous.keys.contains(&key)
    }

    // --- Mouse ---

    pub fn mouse_down(&self, button: MouseButton) -> bool {
        self.current.mouse_buttons.contains(&button)
    }

    pub fn mouse_just_down(&self, button: MouseButton) -> bool {
        self.current.mouse_buttons.contains(&button)
            && !self.previous.mouse_buttons.contains(&button)
    }

    pub fn mouse_just_up(&self, button: MouseButton) -> bool {
        !self.current.mouse_buttons.contains(&button)
            && self.previous.mouse_buttons.contains(&button)
    }

    /// Cursor position in window pixels
    pub fn mouse_position(&self) -> Vec2 {
        self.current.mouse_position
    }

    /// Cursor movement since the previous tick
    pub fn mouse_delta(&self) -> Vec2 {
        self.current.mouse_position - self.previous.mouse_position
    }

    // --- Window ---

    pub fn window_position(&self) -> (i32, i32) {
        self.current.window.position
    }

    pub fn window_size(&self) -> (u32, u32) {
        self.current.window.size
    }

    pub fn window_moved(&self) -> bool {
        self.current.window.moved
    }

    pub fn window_resized(&self) -> bool {
        self.current.window.resized
    }

    pub fn window_closed(&self) -> bool {
        self.current.window.closed
    }

    pub fn window_has_focus(&self) -> bool {
        self.current.window.focused
    }

    pub fn window_gained_focus(&self) -> bool {
        self.current.window.gained_focus
    }

    pub fn window_lost_focus(&self) -> bool {
        self.current.window.lost_focus
    }
}

/// Keys and mouse buttons that trigger one action
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Binding {
    pub keys: Vec<KeyCode>,
    pub mouse: Vec<MouseButton>,
}

impl Binding {
    pub fn keys(keys: impl IntoIterator<Item = KeyCode>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            mouse: Vec::new(),
        }
    }

    pub fn mouse(buttons: impl IntoIterator<Item = MouseButton>) -> Self {
        Self {
            keys: Vec::new(),
            mouse: buttons.into_iter().collect(),
        }
    }
}

/// Action map: action name -> binding.
///
/// Serialises as a TOML table of `[action]` sub-tables, e.g.
/// `left = { keys = ["ArrowLeft", "KeyA"] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputBindings {
    actions: BTreeMap<String, Binding>,
}

impl Default for InputBindings {
    fn default() -> Self {
        let mut bindings = Self::empty();
        bindings.bind("left", Binding::keys([KeyCode::ArrowLeft, KeyCode::KeyA]));
        bindings.bind("right", Binding::keys([KeyCode::ArrowRight, KeyCode::KeyD]));
        bindings.bind("up", Binding::keys([KeyCode::ArrowUp, KeyCode::KeyW]));
        bindings.bind("down", Binding::keys([KeyCode::ArrowDown, KeyCode::KeyS]));
        bindings.bind("confirm", Binding::keys([KeyCode::Enter, KeyCode::Space]));
        bindings.bind("cancel", Binding::keys([KeyCode::Escape]));
        bindings.bind("click", Binding::mouse([MouseButton::Left]));
        bindings
    }
}

impl InputBindings {
    pub fn empty() -> Self {
        Self {
            actions: BTreeMap::new(),
        }
    }

    /// Bind an action, replacing any previous binding of the same name
    pub fn bind(&mut self, action: impl Into<String>, binding: Binding) {
        self.actions.insert(action.into(), binding);
    }

    pub fn get(&self, action: &str) -> Option<&Binding> {
        self.actions.get(action)
    }

    /// Registered action names, sorted
    pub fn action_names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    /// Is any key or button bound to `action` held? Unknown actions are never held.
    pub fn action_down(&self, input: &InputState, action: &str) -> bool {
        self.get(action).is_some_and(|b| {
            b.keys.iter().any(|k| input.key_down(*k))
                || b.mouse.iter().any(|m| input.mouse_down(*m))
        })
    }

    /// Was any key or button bound to `action` pressed this tick?
    pub fn action_just_down(&self, input: &InputState, action: &str) -> bool {
        self.get(action).is_some_and(|b| {
            b.keys.iter().any(|k| input.key_just_down(*k))
                || b.mouse.iter().any(|m| input.mouse_just_down(*m))
        })
    }

    /// All actions pressed this tick, sorted by name
    pub fn actions_just_down(&self, input: &InputState) -> Vec<&str> {
        self.action_names()
            .filter(|a| self.action_just_down(input, a))
            .collect()
    }
}
