//! Player intent
//!
//! The window layer maps keys to [`Control`]s and feeds them into an
//! [`InputState`]. Once per tick the arena receives an immutable
//! [`TickInput`] snapshot taken from it.

/// Intent-level controls (key bindings live outside the core)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    TurnRight,
    TurnLeft,
    ThrustForward,
    ThrustBackward,
    Fire,
}

/// Live input record, mutated by the event loop
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub turn_right: bool,
    pub turn_left: bool,
    pub thrust_forward: bool,
    pub thrust_backward: bool,
    /// Latched on release of [`Control::Fire`], cleared when consumed
    pub fire_requested: bool,
}

impl InputState {
    pub fn press(&mut self, control: Control) {
        self.set_held(control, true);
    }

    /// Releasing fire latches exactly one shot
    pub fn release(&mut self, control: Control) {
        self.set_held(control, false);
        if control == Control::Fire {
            self.fire_requested = true;
        }
    }

    /// Let go of every held control (focus loss); a latched shot survives
    pub fn release_held(&mut self) {
        self.turn_right = false;
        self.turn_left = false;
        self.thrust_forward = false;
        self.thrust_backward = false;
    }

    fn set_held(&mut self, control: Control, held: bool) {
        match control {
            Control::TurnRight => self.turn_right = held,
            Control::TurnLeft => self.turn_left = held,
            Control::ThrustForward => self.thrust_forward = held,
            Control::ThrustBackward => self.thrust_backward = held,
            Control::Fire => {}
        }
    }

    /// Snapshot for the next tick; consumes the fire latch
    pub fn take_tick_input(&mut self) -> TickInput {
        let input = TickInput {
            turn_right: self.turn_right,
            turn_left: self.turn_left,
            thrust_forward: self.thrust_forward,
            thrust_backward: self.thrust_backward,
            fire: self.fire_requested,
        };
        self.fire_requested = false;
        input
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub turn_right: bool,
    pub turn_left: bool,
    pub thrust_forward: bool,
    pub thrust_backward: bool,
    /// Spawn one projectile from the craft's turret
    pub fire: bool,
}
