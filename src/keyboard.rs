//! Keyboard sampling: key codes, modifier flags, and the per-key
//! press/hold/release state machine (spec §4.11).
//!
//! The source spec describes a fixed 223-value keycode enumeration indexed
//! by raw platform code. Following the Design Notes' guidance to replace
//! "generic data via void*" with tagged variants wherever the source used a
//! flat table keyed by an opaque integer, [`KeyCode`] is a closed Rust enum
//! (a named special or `Char(u8)`/`F(u8)` catch-all) and the FSM table is a
//! `HashMap<KeyCode, KeyState>` rather than a `[u8; 223]` array — the two
//! are behaviorally identical, but the enum form gets exhaustiveness
//! checking at compile time instead of a runtime "unknown keycode" branch.

use std::collections::HashMap;

/// A sampled key. ASCII character keys plus the named control/navigation
/// keys and function keys `F(1..=12)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable ASCII character.
    Char(u8),
    /// Function key `F(1)` .. `F(12)`.
    F(u8),
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Insert,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Space,
}

impl KeyCode {
    /// `true` for the "submit" key (Enter or Space) — spec §4.7/4.8/4.10
    /// treat these equivalently for widget activation.
    pub fn is_submit(self) -> bool {
        matches!(self, KeyCode::Enter | KeyCode::Space)
    }
}

/// Keyboard modifier flags (bitset).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    /// No modifiers active.
    pub const NONE: Modifiers = Modifiers(0);
    /// Shift.
    pub const SHIFT: Modifiers = Modifiers(1 << 0);
    /// Control.
    pub const CONTROL: Modifiers = Modifiers(1 << 1);
    /// Alt.
    pub const ALT: Modifiers = Modifiers(1 << 2);
    /// Command / Super.
    pub const COMMAND: Modifiers = Modifiers(1 << 3);
    /// Numlock latch.
    pub const NUMLOCK: Modifiers = Modifiers(1 << 4);
    /// Scroll-lock latch.
    pub const SCROLLLOCK: Modifiers = Modifiers(1 << 5);
    /// Caps-lock latch.
    pub const CAPSLOCK: Modifiers = Modifiers(1 << 6);

    /// True if every bit of `other` is set in `self`.
    pub const fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Union of two modifier sets.
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    /// Shift held.
    pub const fn shift(self) -> bool {
        self.contains(Self::SHIFT)
    }

    /// Control held.
    pub const fn control(self) -> bool {
        self.contains(Self::CONTROL)
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;
    fn bitor(self, rhs: Modifiers) -> Modifiers {
        self.union(rhs)
    }
}

/// Per-key state machine value (spec §4.11).
///
/// `RELEASED` → on first sampled press → `COOLDOWN(10)`; each subsequent
/// tick while still held decrements the cooldown counter (`9..=2`); the
/// tick after it would decrement past `2` becomes `HELD` (numeric value
/// `1`), which is retained every further tick the key stays down. Release
/// at any state returns to `RELEASED`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyState {
    /// Numeric value `0`.
    Released,
    /// Numeric value `1`; repeats every tick while the key stays down.
    Held,
    /// Counting down from `10` to `2` before repeat kicks in.
    Cooldown(u8),
}

impl KeyState {
    /// The raw numeric FSM value spec §3 assigns this state.
    pub fn numeric(self) -> u8 {
        match self {
            KeyState::Released => 0,
            KeyState::Held => 1,
            KeyState::Cooldown(n) => n,
        }
    }

    /// Advance this state by one tick given whether the key is physically
    /// down, returning the new state and the event (if any) that fired.
    pub fn advance(self, physically_down: bool, repeat_delay_ticks: u8) -> (KeyState, Option<KeyTransition>) {
        if !physically_down {
            return match self {
                KeyState::Released => (KeyState::Released, None),
                _ => (KeyState::Released, Some(KeyTransition::Up)),
            };
        }
        match self {
            KeyState::Released => (KeyState::Cooldown(repeat_delay_ticks), Some(KeyTransition::Down)),
            KeyState::Cooldown(n) if n > 2 => (KeyState::Cooldown(n - 1), None),
            KeyState::Cooldown(_) => (KeyState::Held, Some(KeyTransition::Held)),
            KeyState::Held => (KeyState::Held, Some(KeyTransition::Held)),
        }
    }
}

/// The event a [`KeyState::advance`] transition fires, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyTransition {
    /// First transition out of `RELEASED`.
    Down,
    /// Emitted once per tick while in `HELD`.
    Held,
    /// Transition back to `RELEASED`.
    Up,
}

/// Samples raw key-down state and advances the per-key FSM, producing
/// [`KeyTransition`]s.
///
/// Tick interval is fixed at 1/20 second per spec §4.11; callers drive
/// `sample` once per [`crate::app::Application`] tick, passing the set of
/// keys physically down this tick.
pub struct Keyboard {
    states: HashMap<KeyCode, KeyState>,
    modifiers: Modifiers,
    repeat_delay_ticks: u8,
}

impl Keyboard {
    /// The fixed tick interval the FSM advances on: 1/20 second.
    pub const TICK_INTERVAL_MS: u64 = 50;

    /// Create a new keyboard sampler with the default repeat-delay of 10
    /// ticks (spec's `COOLDOWN(10)`).
    pub fn new() -> Self {
        Self::with_repeat_delay(10)
    }

    /// Create a new keyboard sampler with a custom repeat-delay tick count.
    pub fn with_repeat_delay(repeat_delay_ticks: u8) -> Self {
        Self {
            states: HashMap::new(),
            modifiers: Modifiers::NONE,
            repeat_delay_ticks,
        }
    }

    /// Active modifier latches/held-modifiers as of the last sample.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// The FSM state currently stored for `key` (Released if never seen).
    pub fn state_of(&self, key: KeyCode) -> KeyState {
        self.states.get(&key).copied().unwrap_or(KeyState::Released)
    }

    /// Advance every previously-tracked key plus every key in
    /// `physically_down`, returning the `(key, transition)` pairs that
    /// fired this tick, and update `self.modifiers`.
    pub fn sample(&mut self, physically_down: &[KeyCode], modifiers: Modifiers) -> Vec<(KeyCode, KeyTransition)> {
        self.modifiers = modifiers;
        let mut touched: Vec<KeyCode> = self.states.keys().copied().collect();
        for &k in physically_down {
            if !touched.contains(&k) {
                touched.push(k);
            }
        }

        let mut fired = Vec::new();
        for key in touched {
            let down = physically_down.contains(&key);
            let old = self.state_of(key);
            let (new_state, transition) = old.advance(down, self.repeat_delay_ticks);
            if new_state == KeyState::Released {
                self.states.remove(&key);
            } else {
                self.states.insert(key, new_state);
            }
            if let Some(t) = transition {
                fired.push((key, t));
            }
        }
        fired
    }
}

impl Default for Keyboard {
    fn default() -> Self {
        Self::new()
    }
}
