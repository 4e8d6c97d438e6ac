use std::collections::{HashSet, VecDeque};

use super::{ButtonState, Input, KeyEvent};

/// Input sampling layer of the client.
pub trait InputSystem {
    /// Presses the key once, as if user did it.
    fn simulate_single_key_stroke(&mut self, key: Input);

    /// Holds the key down until [`InputSystem::cancel_simulated_key_stroke`] is called.
    fn simulate_repeated_key_stroke(&mut self, key: Input);

    /// Releases the key held by [`InputSystem::simulate_repeated_key_stroke`].
    fn cancel_simulated_key_stroke(&mut self, key: Input);

    /// Collects key events produced since the previous poll.
    fn poll(&mut self, delta: f32) -> Vec<KeyEvent>;
}

/// Keyboard which produces key events only from simulated key strokes.
///
/// Single stroke produces [`ButtonState::Down`], held key produces
/// [`ButtonState::Repeat`] on every poll after the one it was pressed in,
/// and cancellation produces [`ButtonState::Up`].
///
#[derive(Debug, Default)]
pub struct SimulatedKeyboard {
    queued: VecDeque<(Input, ButtonState)>,
    held: HashSet<Input>,
    repeating: Vec<Input>,
}

impl SimulatedKeyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the key is held by repeated key stroke.
    pub fn is_repeating(&self, key: Input) -> bool {
        self.repeating.contains(&key)
    }

    fn press(&mut self, key: Input) {
        self.held.insert(key);
        self.queued.push_back((key, ButtonState::Down));
    }
}

impl InputSystem for SimulatedKeyboard {
    fn simulate_single_key_stroke(&mut self, key: Input) {
        self.press(key);
    }

    fn simulate_repeated_key_stroke(&mut self, key: Input) {
        // repeat is only valid for the key which is down already
        if !self.held.contains(&key) {
            self.press(key);
        }
        if !self.is_repeating(key) {
            self.repeating.push(key);
        }
    }

    fn cancel_simulated_key_stroke(&mut self, key: Input) {
        let index = match self.repeating.iter().position(|&other| other == key) {
            Some(index) => index,
            None => {
                log::warn!("cancelled {} which was not held", key);
                return;
            }
        };
        self.repeating.remove(index);
        self.held.remove(&key);
        self.queued.push_back((key, ButtonState::Up));
    }

    fn poll(&mut self, delta: f32) -> Vec<KeyEvent> {
        let mut events: Vec<_> = self
            .queued
            .drain(..)
            .map(|(key, state)| KeyEvent::new(key, state, delta))
            .collect();
        for &key in &self.repeating {
            let pressed_now = events
                .iter()
                .any(|event| event.input() == key && event.state() == ButtonState::Down);
            if !pressed_now {
                events.push(KeyEvent::new(key, ButtonState::Repeat, delta));
            }
        }
        events
    }
}
