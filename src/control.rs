//! `Control`: the unit of widget state (spec §4.1-§4.2), plus the `Event`
//! model dispatched to it each tick.

use crate::error::{Result, TuiError};
use crate::image::Image;
use crate::transform::TransformId;

/// Which concrete widget a [`Control`] is. Mirrors the component table in
/// spec §2; `widget::data` carries the kind-specific state as a tagged
/// variant rather than the source's opaque `void*` payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlKind {
    /// Plain text display, no input handling.
    Label,
    /// Submit button.
    Button,
    /// Toggle checkbox.
    Checkbox,
    /// Mutually-exclusive radio button.
    Radio,
    /// Read-only progress indicator.
    ProgressBar,
    /// Scrollable line list.
    List,
    /// Collapsed list with a drop-down/drop-up panel.
    Dropdown,
    /// Single or multi-line editable text.
    TextInput,
    /// Numeric stepper.
    NumberInput,
    /// Non-interactive container with no widget-specific data.
    Panel,
}

impl ControlKind {
    /// Stable name used in diagnostics (spec's `WrongControlKind` error
    /// formats this directly, no `Display` indirection needed).
    pub fn name(self) -> &'static str {
        match self {
            ControlKind::Label => "label",
            ControlKind::Button => "button",
            ControlKind::Checkbox => "checkbox",
            ControlKind::Radio => "radio",
            ControlKind::ProgressBar => "progress_bar",
            ControlKind::List => "list",
            ControlKind::Dropdown => "dropdown",
            ControlKind::TextInput => "text_input",
            ControlKind::NumberInput => "number_input",
            ControlKind::Panel => "panel",
        }
    }
}

/// Handle to a [`Control`] in a [`ControlArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ControlId(u32);

/// Per-control boolean flags set at creation time and not mutated by
/// event handling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlFlags {
    /// Whether this control can become the focused control.
    pub focusable: bool,
}

/// Per-control boolean state mutated during the tick loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlState {
    /// Needs `Event::Refresh` before its next composite.
    pub dirty: bool,
    /// Is the currently-focused control.
    pub focused: bool,
    /// Is mid-interaction (e.g. a button held down, a dropdown open).
    /// Invariant: `active ⇒ focused`.
    pub active: bool,
}

/// Four-way directional focus neighbors (spec §4.1's `adjacent` links),
/// used by [`crate::app::Application`] to move focus on arrow-key input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Adjacent {
    /// Neighbor in the eastward direction.
    pub east: Option<ControlId>,
    /// Neighbor in the northward direction.
    pub north: Option<ControlId>,
    /// Neighbor in the westward direction.
    pub west: Option<ControlId>,
    /// Neighbor in the southward direction.
    pub south: Option<ControlId>,
}

/// A single interactive or display element: a [`TransformId`] giving it
/// layout, a private [`Image`] it draws into, and kind-specific data.
pub struct Control {
    transform: TransformId,
    image: Image,
    kind: ControlKind,
    flags: ControlFlags,
    state: ControlState,
    adjacent: Adjacent,
    data: crate::widget::WidgetData,
}

impl Control {
    /// Create a new control of the given kind, anchored to `transform`,
    /// drawing into an image of `extent`. `data`'s kind must match `kind`
    /// or later dispatch will fail with [`TuiError::WrongControlKind`].
    pub fn new(
        transform: TransformId,
        extent: crate::geometry::Extent,
        kind: ControlKind,
        flags: ControlFlags,
        data: crate::widget::WidgetData,
    ) -> Self {
        Self {
            transform,
            image: Image::new(extent),
            kind,
            flags,
            state: ControlState { dirty: true, ..ControlState::default() },
            adjacent: Adjacent::default(),
            data,
        }
    }

    /// The control's layout node.
    pub fn transform(&self) -> TransformId {
        self.transform
    }

    /// The control's backing image.
    pub fn image(&self) -> &Image {
        &self.image
    }

    /// The control's backing image, mutably.
    pub fn image_mut(&mut self) -> &mut Image {
        &mut self.image
    }

    /// This control's kind tag.
    pub fn kind(&self) -> ControlKind {
        self.kind
    }

    /// Creation-time flags.
    pub fn flags(&self) -> ControlFlags {
        self.flags
    }

    /// Current mutable state.
    pub fn state(&self) -> ControlState {
        self.state
    }

    /// Directional neighbor links.
    pub fn adjacent(&self) -> Adjacent {
        self.adjacent
    }

    /// Directional neighbor links, mutably.
    pub fn adjacent_mut(&mut self) -> &mut Adjacent {
        &mut self.adjacent
    }

    /// Mark the control dirty (needs `Event::Refresh`).
    pub fn mark_dirty(&mut self) {
        self.state.dirty = true;
    }

    /// Clear the dirty flag (called after a successful refresh).
    pub fn clear_dirty(&mut self) {
        self.state.dirty = false;
    }

    /// Set focus. Fails with [`TuiError::InvalidState`] if the control is
    /// not focusable and `focused` is `true`.
    pub fn set_focused(&mut self, focused: bool) -> Result<()> {
        if focused && !self.flags.focusable {
            return Err(TuiError::InvalidState("control is not focusable".into()));
        }
        self.state.focused = focused;
        if !focused {
            self.state.active = false;
        }
        Ok(())
    }

    /// Set active. Fails with [`TuiError::InvalidState`] if the control
    /// isn't currently focused (`active ⇒ focused` invariant, spec §4.2).
    pub fn set_active(&mut self, active: bool) -> Result<()> {
        if active && !self.state.focused {
            return Err(TuiError::InvalidState("control must be focused to become active".into()));
        }
        self.state.active = active;
        Ok(())
    }

    /// Borrow the widget-specific data, checking it matches `expected`.
    pub fn data(&self, expected: ControlKind) -> Result<&crate::widget::WidgetData> {
        if self.kind != expected {
            return Err(TuiError::WrongControlKind { expected: expected.name(), found: self.kind.name() });
        }
        Ok(&self.data)
    }

    /// Borrow the widget-specific data mutably, checking it matches
    /// `expected`.
    pub fn data_mut(&mut self, expected: ControlKind) -> Result<&mut crate::widget::WidgetData> {
        if self.kind != expected {
            return Err(TuiError::WrongControlKind { expected: expected.name(), found: self.kind.name() });
        }
        Ok(&mut self.data)
    }
}

/// Fluent alternative to [`Control::new`]'s positional arguments, for
/// callers that only want to override a couple of fields off the
/// `focusable: false` default.
pub struct ControlBuilder {
    transform: TransformId,
    extent: crate::geometry::Extent,
    kind: ControlKind,
    flags: ControlFlags,
    data: crate::widget::WidgetData,
}

impl ControlBuilder {
    /// Start building a control of `kind`, anchored to `transform`,
    /// drawing into an image of `extent`, carrying `data`.
    pub fn new(
        transform: TransformId,
        extent: crate::geometry::Extent,
        kind: ControlKind,
        data: crate::widget::WidgetData,
    ) -> Self {
        Self { transform, extent, kind, flags: ControlFlags::default(), data }
    }

    /// Set whether the built control can become the focused control.
    #[must_use]
    pub fn focusable(mut self, focusable: bool) -> Self {
        self.flags.focusable = focusable;
        self
    }

    /// Finish building the control.
    pub fn build(self) -> Control {
        Control::new(self.transform, self.extent, self.kind, self.flags, self.data)
    }
}

/// Events dispatched to a [`Control`] by [`crate::app::Application`]
/// during a tick (spec §4.1, §5).
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Recompute this control's drawn image; always follows a transform
    /// resolve and precedes compositing.
    Refresh,
    /// Draw request outside the normal refresh cadence (e.g. a forced
    /// redraw after a theme change).
    Draw,
    /// A tracked key transitioned to down this tick.
    KeyDown(crate::keyboard::KeyCode, crate::keyboard::Modifiers),
    /// A tracked key is being held (repeat).
    KeyHeld(crate::keyboard::KeyCode, crate::keyboard::Modifiers),
    /// A tracked key was released.
    KeyUp(crate::keyboard::KeyCode, crate::keyboard::Modifiers),
    /// The window extent changed.
    WindowResize(crate::geometry::Extent),
}

/// The outcome of dispatching an [`Event`] to a control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventResult {
    /// The event was consumed (stop propagating / re-dispatching it).
    pub handled: bool,
    /// The control's displayed content changed and it should be marked
    /// dirty before the next composite.
    pub redraw: bool,
}

impl EventResult {
    /// Neither handled nor requiring redraw.
    pub const IGNORED: EventResult = EventResult { handled: false, redraw: false };

    /// Handled, and the control needs to redraw.
    pub const HANDLED_REDRAW: EventResult = EventResult { handled: true, redraw: true };

    /// Handled, no redraw required.
    pub const HANDLED: EventResult = EventResult { handled: true, redraw: false };
}

enum Slot {
    Occupied(Control),
    Free(Option<u32>),
}

/// An arena of [`Control`]s, addressed by [`ControlId`]. Mirrors
/// [`crate::transform::TransformArena`]'s slot/free-list design so
/// controls can be explicitly freed and their ids reused.
pub struct ControlArena {
    slots: Vec<Slot>,
    free_head: Option<u32>,
}

impl ControlArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self { slots: Vec::new(), free_head: None }
    }

    /// Insert a control, returning its id.
    pub fn insert(&mut self, control: Control) -> ControlId {
        if let Some(idx) = self.free_head {
            let next_free = match &self.slots[idx as usize] {
                Slot::Free(n) => *n,
                Slot::Occupied(_) => unreachable!("free list pointed at occupied slot"),
            };
            self.free_head = next_free;
            self.slots[idx as usize] = Slot::Occupied(control);
            ControlId(idx)
        } else {
            let idx = self.slots.len() as u32;
            self.slots.push(Slot::Occupied(control));
            ControlId(idx)
        }
    }

    /// Free a control's slot for reuse.
    pub fn free(&mut self, id: ControlId) -> Result<()> {
        match self.slots.get(id.0 as usize) {
            Some(Slot::Occupied(_)) => {
                self.slots[id.0 as usize] = Slot::Free(self.free_head);
                self.free_head = Some(id.0);
                Ok(())
            }
            _ => Err(TuiError::InvalidArgument(format!("stale control id {:?}", id))),
        }
    }

    /// Borrow a control by id.
    pub fn get(&self, id: ControlId) -> Result<&Control> {
        match self.slots.get(id.0 as usize) {
            Some(Slot::Occupied(c)) => Ok(c),
            _ => Err(TuiError::InvalidArgument(format!("stale control id {:?}", id))),
        }
    }

    /// Borrow a control mutably by id.
    pub fn get_mut(&mut self, id: ControlId) -> Result<&mut Control> {
        match self.slots.get_mut(id.0 as usize) {
            Some(Slot::Occupied(c)) => Ok(c),
            _ => Err(TuiError::InvalidArgument(format!("stale control id {:?}", id))),
        }
    }

    /// Ids of every occupied slot, in arena order.
    pub fn ids(&self) -> Vec<ControlId> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| matches!(s, Slot::Occupied(_)).then_some(ControlId(i as u32)))
            .collect()
    }

    /// Assert the arena's `active ⇒ focused` invariant and that at most
    /// one control is active, per spec §4.2. Returns
    /// [`TuiError::MultipleActiveControls`] if more than one control has
    /// `state.active`.
    pub fn check_invariants(&self) -> Result<()> {
        let mut active_count = 0;
        for slot in &self.slots {
            if let Slot::Occupied(c) = slot {
                if c.state.active {
                    active_count += 1;
                    if !c.state.focused {
                        return Err(TuiError::InvalidState("active control is not focused".into()));
                    }
                }
            }
        }
        if active_count > 1 {
            return Err(TuiError::MultipleActiveControls);
        }
        Ok(())
    }
}

impl Default for ControlArena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Extent;
    use crate::transform::TransformArena;
    use crate::widget::WidgetData;
    use crate::widget::label::LabelData;
    use crate::widget::button::ButtonData;

    fn make_control(arena: &mut TransformArena, kind: ControlKind, data: WidgetData, focusable: bool) -> Control {
        let t = arena.create();
        Control::new(t, Extent::new(4, 1), kind, ControlFlags { focusable }, data)
    }

    #[test]
    fn focus_requires_focusable_flag() {
        let mut tarena = TransformArena::new();
        let mut c = make_control(&mut tarena, ControlKind::Label, WidgetData::Label(LabelData::default()), false);
        assert!(c.set_focused(true).is_err());
    }

    #[test]
    fn active_requires_focused() {
        let mut tarena = TransformArena::new();
        let mut c = make_control(&mut tarena, ControlKind::Button, WidgetData::Button(ButtonData::new("ok")), true);
        assert!(c.set_active(true).is_err());
        c.set_focused(true).unwrap();
        assert!(c.set_active(true).is_ok());
    }

    #[test]
    fn unfocusing_clears_active() {
        let mut tarena = TransformArena::new();
        let mut c = make_control(&mut tarena, ControlKind::Button, WidgetData::Button(ButtonData::new("ok")), true);
        c.set_focused(true).unwrap();
        c.set_active(true).unwrap();
        c.set_focused(false).unwrap();
        assert!(!c.state().active);
    }

    #[test]
    fn wrong_kind_data_access_errors() {
        let mut tarena = TransformArena::new();
        let c = make_control(&mut tarena, ControlKind::Label, WidgetData::Label(LabelData::default()), false);
        let err = c.data(ControlKind::Button).unwrap_err();
        assert_eq!(err.kind_name(), "wrong_control_kind");
    }

    #[test]
    fn arena_reuses_freed_slots() {
        let mut arena = ControlArena::new();
        let mut tarena = TransformArena::new();
        let c1 = make_control(&mut tarena, ControlKind::Label, WidgetData::Label(LabelData::default()), false);
        let id1 = arena.insert(c1);
        arena.free(id1).unwrap();
        let c2 = make_control(&mut tarena, ControlKind::Label, WidgetData::Label(LabelData::default()), false);
        let id2 = arena.insert(c2);
        assert_eq!(id1, id2);
    }

    #[test]
    fn multiple_active_controls_rejected() {
        let mut arena = ControlArena::new();
        let mut tarena = TransformArena::new();
        let mut c1 = make_control(&mut tarena, ControlKind::Button, WidgetData::Button(ButtonData::new("ok")), true);
        c1.set_focused(true).unwrap();
        c1.set_active(true).unwrap();
        let mut c2 = make_control(&mut tarena, ControlKind::Button, WidgetData::Button(ButtonData::new("ok")), true);
        c2.set_focused(true).unwrap();
        c2.set_active(true).unwrap();
        arena.insert(c1);
        arena.insert(c2);
        assert!(matches!(arena.check_invariants(), Err(TuiError::MultipleActiveControls)));
    }

    #[test]
    fn builder_defaults_to_not_focusable() {
        let mut tarena = TransformArena::new();
        let t = tarena.create();
        let c = ControlBuilder::new(t, Extent::new(4, 1), ControlKind::Label, WidgetData::Label(LabelData::default()))
            .build();
        assert!(!c.flags().focusable);
    }

    #[test]
    fn builder_focusable_chains_through() {
        let mut tarena = TransformArena::new();
        let t = tarena.create();
        let mut c =
            ControlBuilder::new(t, Extent::new(4, 1), ControlKind::Button, WidgetData::Button(ButtonData::new("ok")))
                .focusable(true)
                .build();
        assert!(c.flags().focusable);
        assert!(c.set_focused(true).is_ok());
    }
}
