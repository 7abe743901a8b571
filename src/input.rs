//! Key mapping from window events to session commands.

use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::events::Command;

/// Map a physical key to its command, if it is bound.
#[must_use]
pub fn command_for_key(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Space | KeyCode::ArrowRight | KeyCode::Enter | KeyCode::NumpadEnter => {
            Some(Command::DrawNext)
        }
        KeyCode::KeyR => Some(Command::Reset),
        KeyCode::KeyS => Some(Command::ShuffleRemaining),
        KeyCode::KeyF => Some(Command::ToggleFullscreen),
        KeyCode::Escape | KeyCode::KeyQ => Some(Command::Quit),
        _ => None,
    }
}

/// Map one keyboard event to a command. Releases and OS auto-repeat are ignored.
#[must_use]
pub fn command_for_key_event(
    key: PhysicalKey,
    state: ElementState,
    repeat: bool,
) -> Option<Command> {
    if state != ElementState::Pressed || repeat {
        return None;
    }
    match key {
        PhysicalKey::Code(code) => command_for_key(code),
        PhysicalKey::Unidentified(_) => None,
    }
}

/// Map a window event to a command. Only fresh key presses and close requests dispatch.
#[must_use]
pub fn command_for_window_event(event: &WindowEvent) -> Option<Command> {
    match event {
        WindowEvent::CloseRequested => Some(Command::Quit),
        WindowEvent::KeyboardInput { event, .. } => {
            command_for_key_event(event.physical_key, event.state, event.repeat)
        }
        _ => None,
    }
}
