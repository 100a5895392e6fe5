//! Classified platform events consumed by the input state machine

use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

pub use winit::event::MouseButton;

/// One already-classified platform event.
///
/// Window events carry no payload: positions, sizes and focus are polled
/// separately through [`PolledState`](crate::PolledState).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    MouseButtonDown(MouseButton),
    MouseButtonUp(MouseButton),
    WindowMoved,
    WindowResized,
    WindowClosed,
    WindowFocusGained,
    WindowFocusLost,
}

/// Map a winit window event onto a [`RawEvent`].
///
/// Key repeats and keys without a physical key code are dropped, as is every
/// event the input state machine has no use for.
pub fn classify_window_event(event: &WindowEvent) -> Option<RawEvent> {
    match event {
        WindowEvent::KeyboardInput { event, .. } => {
            if event.repeat {
                return None;
            }
            let PhysicalKey::Code(code) = event.physical_key else {
                return None;
            };
            Some(match event.state {
                ElementState::Pressed => RawEvent::KeyDown(code),
                ElementState::Released => RawEvent::KeyUp(code),
            })
        }
        WindowEvent::MouseInput { state, button, .. } => Some(match state {
            ElementState::Pressed => RawEvent::MouseButtonDown(*button),
            ElementState::Released => RawEvent::MouseButtonUp(*button),
        }),
        WindowEvent::Moved(_) => Some(RawEvent::WindowMoved),
        WindowEvent::Resized(_) => Some(RawEvent::WindowResized),
        WindowEvent::Focused(true) => Some(RawEvent::WindowFocusGained),
        WindowEvent::Focused(false) => Some(RawEvent::WindowFocusLost),
        WindowEvent::CloseRequested => Some(RawEvent::WindowClosed),
        _ => None,
    }
}
