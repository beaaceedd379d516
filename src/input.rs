//! Key-to-action mapping
//!
//! Turns one frame of platform input into either a quit request or the
//! `TickInput` the simulation consumes. Discrete actions (fire, pause) come
//! from events; steering comes from the held-key set.

use crate::platform::{HeldKeys, InputEvent, Key};
use crate::sim::TickInput;

/// What the frame loop should do this frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameCommand {
    /// Window closed or Escape pressed: stop immediately
    Quit,
    Play(TickInput),
}

/// Map one frame of input.
///
/// - Quit event or Escape down: quit, regardless of anything else
/// - Space down: fire (one bullet per press)
/// - P released: toggle pause
/// - Right/Left held: rotate, Right wins when both are held
/// - Up held: thrust; Down held: brake
pub fn map_frame(events: &[InputEvent], held: HeldKeys) -> FrameCommand {
    let mut input = TickInput {
        rotate_right: held.right,
        rotate_left: held.left && !held.right,
        thrust: held.up,
        brake: held.down,
        ..Default::default()
    };

    for event in events {
        match event {
            InputEvent::Quit | InputEvent::KeyDown(Key::Escape) => return FrameCommand::Quit,
            InputEvent::KeyDown(Key::Space) => input.fire = true,
            InputEvent::KeyUp(Key::P) => input.toggle_pause = !input.toggle_pause,
            _ => {}
        }
    }

    FrameCommand::Play(input)
}
