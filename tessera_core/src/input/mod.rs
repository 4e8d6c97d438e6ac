//! Input events of the client and their binds.
//!
//! Raw input is represented with [`KeyEvent`]s; bound input reaches
//! the entities as [`ButtonEvent`]s and [`AxisEvent`]s parameterized
//! by a [`Bind`] marker type, e.g. `ButtonEvent<Jump>`.

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use tessera_ecs::Event;

pub use keyboard::*;

mod keyboard;
mod tests;

/// URI of the bind which moves the character forwards.
pub const FORWARDS_BIND: &str = "engine:forwards";

/// State of the button during the input event.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ButtonState {
    Down,
    Up,
    Repeat,
}

/// Keyboard key.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    /// No key assigned.
    None,
    W,
    A,
    S,
    D,
    Q,
    E,
    F,
    R,
    C,
    X,
    Z,
    T,
    Space,
    LeftShift,
    LeftControl,
    LeftAlt,
    Tab,
    Enter,
    Escape,
    Up,
    Down,
    Left,
    Right,
}

/// Mouse button.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Physical input which can be bound to some action.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Input {
    Key(Key),
    Mouse(MouseButton),
}

impl Input {
    /// Returns `false` for a placeholder of the unassigned input.
    pub fn is_valid(&self) -> bool {
        !matches!(self, Input::Key(Key::None))
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Input::Key(key) => write!(f, "key {:?}", key),
            Input::Mouse(button) => write!(f, "mouse {:?}", button),
        }
    }
}

/// Marker of the action input can be bound to.
pub trait Bind: 'static {
    /// Unique identifier of the bind used in configuration.
    const URI: &'static str;
}

macro_rules! binds {
    ($($(#[$meta:meta])* $name:ident => $uri:literal;)*) => {
        $(
            $(#[$meta])*
            pub enum $name {}

            impl Bind for $name {
                const URI: &'static str = $uri;
            }
        )*
    };
}

binds! {
    Jump => "engine:jump";
    Crouch => "engine:crouch";
    /// Toggles crouching instead of holding.
    CrouchMode => "engine:crouchMode";
    AutoMove => "engine:autoMove";
    ToggleSpeedTemporarily => "engine:toggleSpeedTemporarily";
    ToggleSpeedPermanently => "engine:toggleSpeedPermanently";
    Chat => "engine:chat";
    /// Interaction with the target of the character.
    Frob => "engine:frob";
    UseItem => "engine:useItem";
    Forwards => "engine:forwardsMovement";
    Strafe => "engine:strafeMovement";
    Vertical => "engine:verticalMovement";
    /// Analog variant of [`Forwards`], e.g. from the gamepad stick.
    ForwardsReal => "engine:forwardsRealMovement";
    StrafeReal => "engine:strafeRealMovement";
    VerticalReal => "engine:verticalRealMovement";
    RotationYaw => "engine:rotationYaw";
    RotationPitch => "engine:rotationPitch";
    MouseX => "engine:mouseX";
    MouseY => "engine:mouseY";
}

/// Event of the button bound to `B`.
pub struct ButtonEvent<B> {
    state: ButtonState,
    delta: f32,
    consumed: bool,
    bind: PhantomData<fn() -> B>,
}

impl<B> ButtonEvent<B>
where
    B: Bind,
{
    pub fn new(state: ButtonState, delta: f32) -> Self {
        Self {
            state,
            delta,
            consumed: false,
            bind: PhantomData,
        }
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Returns `true` if the button is pressed or held.
    pub fn is_down(&self) -> bool {
        self.state != ButtonState::Up
    }

    /// Time since the previous frame in seconds.
    pub fn delta(&self) -> f32 {
        self.delta
    }
}

impl<B> Event for ButtonEvent<B>
where
    B: Bind,
{
    const CONSUMABLE: bool = true;

    fn is_consumed(&self) -> bool {
        self.consumed
    }

    fn consume(&mut self) {
        self.consumed = true;
    }
}

impl<B> fmt::Debug for ButtonEvent<B>
where
    B: Bind,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ButtonEvent")
            .field("bind", &B::URI)
            .field("state", &self.state)
            .field("consumed", &self.consumed)
            .finish()
    }
}

/// Event of the axis bound to `A`.
pub struct AxisEvent<A> {
    value: f32,
    delta: f32,
    consumed: bool,
    bind: PhantomData<fn() -> A>,
}

impl<A> AxisEvent<A>
where
    A: Bind,
{
    pub fn new(value: f32, delta: f32) -> Self {
        Self {
            value,
            delta,
            consumed: false,
            bind: PhantomData,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }
}

impl<A> Event for AxisEvent<A>
where
    A: Bind,
{
    const CONSUMABLE: bool = true;

    fn is_consumed(&self) -> bool {
        self.consumed
    }

    fn consume(&mut self) {
        self.consumed = true;
    }
}

impl<A> fmt::Debug for AxisEvent<A>
where
    A: Bind,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("AxisEvent")
            .field("bind", &A::URI)
            .field("value", &self.value)
            .field("consumed", &self.consumed)
            .finish()
    }
}

/// Raw event of the keyboard or the mouse button.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct KeyEvent {
    input: Input,
    state: ButtonState,
    delta: f32,
    consumed: bool,
}

impl KeyEvent {
    pub fn new(input: Input, state: ButtonState, delta: f32) -> Self {
        Self {
            input,
            state,
            delta,
            consumed: false,
        }
    }

    pub fn input(&self) -> Input {
        self.input
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    pub fn is_down(&self) -> bool {
        self.state != ButtonState::Up
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }
}

impl Event for KeyEvent {
    const CONSUMABLE: bool = true;

    fn is_consumed(&self) -> bool {
        self.consumed
    }

    fn consume(&mut self) {
        self.consumed = true;
    }
}
