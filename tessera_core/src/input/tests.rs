#![cfg(test)]

use tessera_ecs::Event;

use super::*;

const W: Input = Input::Key(Key::W);

fn states(events: &[KeyEvent]) -> Vec<(Input, ButtonState)> {
    events.iter().map(|event| (event.input(), event.state())).collect()
}

#[test]
fn test_single_then_repeated_stroke() {
    let mut keyboard = SimulatedKeyboard::new();
    keyboard.simulate_single_key_stroke(W);
    keyboard.simulate_repeated_key_stroke(W);
    assert!(keyboard.is_repeating(W));

    assert_eq!(states(&keyboard.poll(0.1)), [(W, ButtonState::Down)]);
    assert_eq!(states(&keyboard.poll(0.1)), [(W, ButtonState::Repeat)]);
    assert_eq!(states(&keyboard.poll(0.1)), [(W, ButtonState::Repeat)]);

    keyboard.cancel_simulated_key_stroke(W);
    assert!(!keyboard.is_repeating(W));
    assert_eq!(states(&keyboard.poll(0.1)), [(W, ButtonState::Up)]);
    assert!(keyboard.poll(0.1).is_empty());
}

#[test]
fn test_repeated_stroke_presses_key_first() {
    let mut keyboard = SimulatedKeyboard::new();
    keyboard.simulate_repeated_key_stroke(W);
    assert_eq!(states(&keyboard.poll(0.0)), [(W, ButtonState::Down)]);
    assert_eq!(states(&keyboard.poll(0.0)), [(W, ButtonState::Repeat)]);
}

#[test]
fn test_cancel_of_idle_key_does_nothing() {
    let mut keyboard = SimulatedKeyboard::new();
    keyboard.cancel_simulated_key_stroke(W);
    assert!(keyboard.poll(0.0).is_empty());
}

#[test]
fn test_button_event_state() {
    let mut event = ButtonEvent::<Jump>::new(ButtonState::Repeat, 0.016);
    assert!(event.is_down());
    assert!(!event.is_consumed());
    event.consume();
    assert!(event.is_consumed());

    let event = ButtonEvent::<Jump>::new(ButtonState::Up, 0.016);
    assert!(!event.is_down());
    assert!(format!("{:?}", event).contains("engine:jump"));
}

#[test]
fn test_unassigned_input_is_invalid() {
    assert!(!Input::Key(Key::None).is_valid());
    assert!(W.is_valid());
    assert!(Input::Mouse(MouseButton::Left).is_valid());
}
