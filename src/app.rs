//! `Application`: the tick loop that owns every arena and drives one
//! iteration of spec §5's sequence — resize detection, transform
//! resolution, control refresh, compositing, presentation, and keyboard
//! dispatch.

use std::collections::HashMap;

use crate::control::{Control, ControlArena, ControlFlags, ControlId, ControlKind, EventResult};
use crate::error::Result;
use crate::geometry::{Extent, Offset, Rect};
use crate::keyboard::{KeyCode, Keyboard, KeyTransition, Modifiers};
use crate::platform::Platform;
use crate::surface::Surface;
use crate::theme::Theme;
use crate::transform::{Alignment, TransformArena, TransformId};
use crate::widget::dropdown::DropdownOutcome;
use crate::widget::list::ListOutcome;
use crate::widget::text_input::TextInputOutcome;
use crate::widget::WidgetData;

/// A direction a focused, non-active control's arrow/WASD key may move
/// focus along, per the control's [`crate::control::Adjacent`] links.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    North,
    South,
    East,
    West,
}

fn arrow_direction(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char(b'w' | b'W') => Some(Direction::North),
        KeyCode::Down | KeyCode::Char(b's' | b'S') => Some(Direction::South),
        KeyCode::Left | KeyCode::Char(b'a' | b'A') => Some(Direction::West),
        KeyCode::Right | KeyCode::Char(b'd' | b'D') => Some(Direction::East),
        _ => None,
    }
}

/// Owns the control/transform arenas, the keyboard sampler, the
/// compositor surface, and a platform backend; drives the tick loop.
pub struct Application<P: Platform> {
    platform: P,
    transforms: TransformArena,
    controls: ControlArena,
    surface: Surface,
    keyboard: Keyboard,
    theme: Theme,
    root: TransformId,
    focused: Option<ControlId>,
    window_extent: Extent,
    running: bool,
    fired_buttons: Vec<ControlId>,
    /// Collapsed `(local_offset, local_extent)` saved per open dropdown,
    /// restored when its panel commits or cancels.
    dropdown_origin: HashMap<ControlId, (Offset, Extent)>,
}

impl<P: Platform> Application<P> {
    /// Create a new application. Does not enter raw mode yet; call
    /// [`Application::run`] or [`Application::enter`] to start driving
    /// the terminal.
    pub fn new(platform: P) -> Result<Self> {
        Self::with_repeat_delay(platform, 10)
    }

    /// Create a new application with a custom key-repeat delay (spec
    /// §4.11's `COOLDOWN(10)`, exposed here as a tunable tick count rather
    /// than a hardcoded literal). Does not enter raw mode yet.
    pub fn with_repeat_delay(mut platform: P, repeat_delay_ticks: u8) -> Result<Self> {
        let window_extent = platform.window_extent().unwrap_or(Extent::new(80, 24));
        let mut transforms = TransformArena::new();
        let root = transforms.create();
        {
            let t = transforms.transform_mut(root)?;
            t.local_alignment = Alignment::LEFT | Alignment::RIGHT | Alignment::TOP | Alignment::BOTTOM;
        }
        Ok(Self {
            platform,
            transforms,
            controls: ControlArena::new(),
            surface: Surface::new(window_extent),
            keyboard: Keyboard::with_repeat_delay(repeat_delay_ticks),
            theme: Theme::default(),
            root,
            focused: None,
            window_extent,
            running: true,
            fired_buttons: Vec::new(),
            dropdown_origin: HashMap::new(),
        })
    }

    /// The root transform every top-level control should parent to.
    pub fn root_transform(&self) -> TransformId {
        self.root
    }

    /// The platform backend, for callers that need to script it directly
    /// (e.g. a test backend's queued keys) or inspect what it recorded.
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// The compositor surface, for inspecting the most recently presented
    /// frame.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Mutable access to the transform arena, for building a control tree
    /// before the first tick.
    pub fn transforms_mut(&mut self) -> &mut TransformArena {
        &mut self.transforms
    }

    /// Mutable access to the control arena.
    pub fn controls_mut(&mut self) -> &mut ControlArena {
        &mut self.controls
    }

    /// Create a control, parent its transform under `parent` (or the
    /// root if `None`), and insert it into the arena.
    pub fn create_control(
        &mut self,
        parent: Option<TransformId>,
        extent: Extent,
        kind: ControlKind,
        flags: ControlFlags,
        data: WidgetData,
    ) -> Result<ControlId> {
        let transform = self.transforms.create();
        self.transforms.set_parent(transform, Some(parent.unwrap_or(self.root)))?;
        let control = Control::new(transform, extent, kind, flags, data);
        Ok(self.controls.insert(control))
    }

    /// Set the focused control, clearing focus from whichever control
    /// held it before. Fails if `id` isn't focusable.
    pub fn set_focus(&mut self, id: ControlId) -> Result<()> {
        if let Some(old) = self.focused {
            if old != id {
                self.controls.get_mut(old)?.set_focused(false)?;
                self.controls.get_mut(old)?.mark_dirty();
            }
        }
        self.controls.get_mut(id)?.set_focused(true)?;
        self.controls.get_mut(id)?.mark_dirty();
        self.focused = Some(id);
        Ok(())
    }

    /// The currently-focused control, if any.
    pub fn focused(&self) -> Option<ControlId> {
        self.focused
    }

    /// Request the tick loop stop after the current tick.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Drain the set of buttons that were clicked (submit-key released
    /// while active) since the last call. A caller drives its own
    /// behavior off the returned ids after each [`Application::tick`];
    /// nothing here assumes a particular UI beyond "a button fired".
    pub fn take_fired_buttons(&mut self) -> Vec<ControlId> {
        std::mem::take(&mut self.fired_buttons)
    }

    /// Enter raw mode / the alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        self.platform.enter()
    }

    /// Leave raw mode / the alternate screen.
    pub fn exit(&mut self) -> Result<()> {
        self.platform.exit()
    }

    /// Run one tick of spec §5's sequence. Returns `false` once
    /// [`Application::quit`] has been called (callers should stop
    /// looping).
    pub fn tick(&mut self) -> Result<bool> {
        self.detect_resize()?;
        self.transforms.resolve(self.root, Rect::new(0, 0, self.window_extent.w, self.window_extent.h))?;

        let dirty_rect = self.refresh_dirty_controls()?;
        if !dirty_rect.is_empty() {
            self.composite(dirty_rect)?;
            self.surface.refresh();
            self.surface.present(&mut PlatformWriter(&mut self.platform))?;
        }

        self.controls.check_invariants()?;
        self.dispatch_keys()?;
        Ok(self.running)
    }

    /// Block, calling [`Application::tick`] at the keyboard's fixed
    /// sample interval, until [`Application::quit`] is called or a tick
    /// returns an error. Restores the terminal before returning either
    /// way.
    pub fn run(&mut self) -> Result<()> {
        self.enter()?;
        let result = self.run_inner();
        self.exit()?;
        result
    }

    fn run_inner(&mut self) -> Result<()> {
        loop {
            let still_running = self.tick()?;
            if !still_running {
                return Ok(());
            }
            std::thread::sleep(std::time::Duration::from_millis(Keyboard::TICK_INTERVAL_MS));
        }
    }

    fn detect_resize(&mut self) -> Result<()> {
        let extent = self.platform.window_extent()?;
        if extent != self.window_extent {
            tracing::debug!(w = extent.w, h = extent.h, "window resized");
            self.window_extent = extent;
            self.surface.image_mut().resize(extent);
            self.transforms.mark_dirty(self.root)?;
            for id in self.controls.ids() {
                self.controls.get_mut(id)?.mark_dirty();
            }
        }
        Ok(())
    }

    fn refresh_dirty_controls(&mut self) -> Result<Rect> {
        let mut dirty_rect = Rect::default();
        for id in self.controls.ids() {
            let control = self.controls.get_mut(id)?;
            if !control.state().dirty {
                continue;
            }
            let focused = control.state().focused;
            let active = control.state().active;
            refresh_control(control, &self.theme, focused, active)?;
            control.clear_dirty();
            let transform = self.transforms.transform(control.transform())?;
            dirty_rect = dirty_rect.union_dirty(transform.global_rect());
        }
        Ok(dirty_rect)
    }

    fn composite(&mut self, _dirty_rect: Rect) -> Result<()> {
        let active = self.focused.filter(|&id| self.controls.get(id).map(|c| c.state().active).unwrap_or(false));
        let mut ordered: Vec<ControlId> = self.controls.ids();
        if let Some(active_id) = active {
            ordered.retain(|&id| id != active_id);
            ordered.push(active_id);
        }
        for id in ordered {
            let control = self.controls.get(id)?;
            let transform = self.transforms.transform(control.transform())?;
            let rect = transform.global_rect();
            if rect.is_empty() {
                continue;
            }
            self.surface.image_mut().blit(rect.offset, control.image(), crate::geometry::Offset::new(0, 0), rect.extent);
        }
        Ok(())
    }

    fn dispatch_keys(&mut self) -> Result<()> {
        let (down_keys, modifiers) = self.platform.poll_keys()?;
        let transitions = self.keyboard.sample(&down_keys, modifiers);
        let Some(focused) = self.focused else { return Ok(()) };
        for (code, transition) in transitions {
            let down = !matches!(transition, KeyTransition::Up);
            let dispatch = {
                let control = self.controls.get_mut(focused)?;
                dispatch_key(control, code, modifiers, down)?
            };
            if dispatch.result.redraw {
                self.controls.get_mut(focused)?.mark_dirty();
            }
            if dispatch.fired {
                self.fired_buttons.push(focused);
            }
            if dispatch.beep {
                self.platform.write_all(&[0x07])?;
                self.platform.flush()?;
            }
            if let Some(active) = dispatch.set_active {
                self.controls.get_mut(focused)?.set_active(active)?;
            }
            match dispatch.dropdown {
                Some(DropdownTransformEvent::Expand) => self.expand_dropdown(focused)?,
                Some(DropdownTransformEvent::Collapse) => self.collapse_dropdown(focused)?,
                None => {}
            }

            // Focus navigation (spec §4.6): a key the widget itself ignored
            // and that maps to an arrow/WASD direction moves focus along
            // the control's adjacent link, if one exists.
            if !dispatch.result.handled && down {
                if let Some(direction) = arrow_direction(code) {
                    self.try_move_focus(focused, direction)?;
                }
            }
        }
        Ok(())
    }

    /// Move focus from `from` to its `direction` neighbor, if one is
    /// linked. Returns whether focus moved.
    fn try_move_focus(&mut self, from: ControlId, direction: Direction) -> Result<bool> {
        let adjacent = self.controls.get(from)?.adjacent();
        let target = match direction {
            Direction::North => adjacent.north,
            Direction::South => adjacent.south,
            Direction::East => adjacent.east,
            Direction::West => adjacent.west,
        };
        match target {
            Some(target) => {
                self.set_focus(target)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Resolve the drop direction, save the collapsed geometry, and grow
    /// `id`'s transform and image to show the open panel (spec §4.9).
    fn expand_dropdown(&mut self, id: ControlId) -> Result<()> {
        let control = self.controls.get_mut(id)?;
        let transform_id = control.transform();
        let panel_rows = match control.data(ControlKind::Dropdown)? {
            WidgetData::Dropdown(d) => d.panel_height(),
            _ => return Ok(()),
        };

        let transform = self.transforms.transform(transform_id)?;
        let saved_offset = transform.local_offset;
        let saved_extent = transform.local_extent;
        let row = transform.global_rect().offset.y;
        let window_height = self.window_extent.h;

        if let WidgetData::Dropdown(d) = self.controls.get_mut(id)?.data_mut(ControlKind::Dropdown)? {
            d.resolve_drop_direction(row, window_height, panel_rows);
        }
        let drop_up = match self.controls.get(id)?.data(ControlKind::Dropdown)? {
            WidgetData::Dropdown(d) => d.drop_up(),
            _ => false,
        };

        self.dropdown_origin.insert(id, (saved_offset, saved_extent));
        let new_extent = Extent::new(saved_extent.w, panel_rows + 1);
        let transform = self.transforms.transform_mut(transform_id)?;
        transform.local_extent = new_extent;
        if drop_up {
            transform.local_offset.y = saved_offset.y - panel_rows as i32;
        }
        self.transforms.mark_dirty(transform_id)?;

        let control = self.controls.get_mut(id)?;
        control.image_mut().resize(new_extent);
        control.mark_dirty();
        tracing::debug!(?id, drop_up, panel_rows, "dropdown expanded");
        Ok(())
    }

    /// Restore `id`'s saved collapsed geometry after its panel commits or
    /// cancels (spec §4.9).
    fn collapse_dropdown(&mut self, id: ControlId) -> Result<()> {
        let Some((offset, extent)) = self.dropdown_origin.remove(&id) else { return Ok(()) };
        let transform_id = self.controls.get(id)?.transform();
        let transform = self.transforms.transform_mut(transform_id)?;
        transform.local_offset = offset;
        transform.local_extent = extent;
        self.transforms.mark_dirty(transform_id)?;

        let control = self.controls.get_mut(id)?;
        control.image_mut().resize(extent);
        control.mark_dirty();
        tracing::debug!(?id, "dropdown collapsed");
        Ok(())
    }
}

/// Adapts a `&mut dyn Platform` to `std::io::Write` for
/// [`Surface::present`].
struct PlatformWriter<'a, P: Platform>(&'a mut P);

impl<P: Platform> std::io::Write for PlatformWriter<'_, P> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0
            .write_all(buf)
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0.flush().map_err(|e| std::io::Error::other(e.to_string()))
    }
}

fn refresh_control(control: &mut Control, theme: &Theme, focused: bool, active: bool) -> Result<()> {
    let kind = control.kind();
    let image = control.image_mut();
    match control.data(kind)? {
        WidgetData::Label(d) => crate::widget::label::refresh(d, image, theme),
        WidgetData::Button(d) => crate::widget::button::refresh(d, image, theme, focused, active),
        WidgetData::Checkbox(d) | WidgetData::Radio(d) => crate::widget::checkbox::refresh(d, image, theme, focused),
        WidgetData::ProgressBar(d) => crate::widget::progress_bar::refresh(d, image, theme),
        WidgetData::List(d) => crate::widget::list::refresh(d, image, theme, focused),
        WidgetData::Dropdown(d) => crate::widget::dropdown::refresh(d, image, theme, focused),
        WidgetData::TextInput(d) => crate::widget::text_input::refresh(d, image, theme, focused),
        WidgetData::NumberInput(d) => crate::widget::number_input::refresh(d, image, theme, focused),
        WidgetData::Panel => {}
    }
    Ok(())
}

/// What a key dispatch to a single control produced: whether it was
/// handled/needs redraw, whether a button fired, whether the control's
/// `active` state should transition, and whether a dropdown's panel
/// should expand or collapse.
#[derive(Default)]
struct KeyDispatch {
    result: EventResult,
    fired: bool,
    set_active: Option<bool>,
    dropdown: Option<DropdownTransformEvent>,
    /// A non-fatal input condition (e.g. a `TextInput` at capacity) that
    /// should sound the terminal bell without otherwise changing state.
    beep: bool,
}

enum DropdownTransformEvent {
    Expand,
    Collapse,
}

fn dispatch_key(control: &mut Control, code: KeyCode, modifiers: Modifiers, down: bool) -> Result<KeyDispatch> {
    let kind = control.kind();
    let extent = control.image().extent();
    let active = control.state().active;
    let data = control.data_mut(kind)?;
    let mut out = KeyDispatch::default();
    match data {
        WidgetData::Button(d) => {
            let (new_active, fired) = crate::widget::button::handle_key(d, code, down);
            out.fired = fired;
            out.set_active = Some(new_active);
            out.result = if code.is_submit() { EventResult::HANDLED_REDRAW } else { EventResult::IGNORED };
        }
        WidgetData::Checkbox(d) | WidgetData::Radio(d) => {
            out.result = if crate::widget::checkbox::handle_key(d, code, down) {
                EventResult::HANDLED_REDRAW
            } else {
                EventResult::IGNORED
            };
        }
        WidgetData::List(d) => {
            let (handled, outcome) = crate::widget::list::handle_key(d, code, down, active, extent.h as usize);
            out.result = if handled { EventResult::HANDLED_REDRAW } else { EventResult::IGNORED };
            out.set_active = match outcome {
                Some(ListOutcome::Activated) => Some(true),
                Some(ListOutcome::Committed) | Some(ListOutcome::Cancelled) => Some(false),
                Some(ListOutcome::Changed) | None => None,
            };
        }
        WidgetData::Dropdown(d) => {
            let (handled, outcome) = crate::widget::dropdown::handle_key(d, code, down, active);
            out.result = if handled { EventResult::HANDLED_REDRAW } else { EventResult::IGNORED };
            match outcome {
                Some(DropdownOutcome::Activated) => {
                    out.set_active = Some(true);
                    out.dropdown = Some(DropdownTransformEvent::Expand);
                }
                Some(DropdownOutcome::Committed) | Some(DropdownOutcome::Cancelled) => {
                    out.set_active = Some(false);
                    out.dropdown = Some(DropdownTransformEvent::Collapse);
                }
                Some(DropdownOutcome::Changed) | None => {}
            }
        }
        WidgetData::TextInput(d) => {
            if down {
                let (handled, outcome) = crate::widget::text_input::handle_key(
                    d,
                    code,
                    modifiers,
                    extent.w as usize,
                    extent.h as usize,
                    active,
                );
                out.beep = matches!(outcome, Some(TextInputOutcome::Beeped));
                out.result = match (handled, out.beep) {
                    (true, true) => EventResult::HANDLED,
                    (true, false) => EventResult::HANDLED_REDRAW,
                    (false, _) => EventResult::IGNORED,
                };
                out.set_active = match outcome {
                    Some(TextInputOutcome::Activated) => Some(true),
                    Some(TextInputOutcome::Committed) => Some(false),
                    Some(TextInputOutcome::Changed) | Some(TextInputOutcome::Beeped) | None => None,
                };
            }
        }
        WidgetData::NumberInput(d) => {
            out.result = if down && crate::widget::number_input::handle_key(d, code) {
                EventResult::HANDLED_REDRAW
            } else {
                EventResult::IGNORED
            };
        }
        WidgetData::Label(_) | WidgetData::ProgressBar(_) | WidgetData::Panel => {}
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Extent as GExtent;
    use crate::widget::button::ButtonData;
    use std::cell::RefCell;

    struct FakePlatform {
        extent: Extent,
        pending_keys: RefCell<Vec<(Vec<KeyCode>, Modifiers)>>,
        written: Vec<u8>,
    }

    impl FakePlatform {
        fn new(extent: Extent) -> Self {
            Self { extent, pending_keys: RefCell::new(Vec::new()), written: Vec::new() }
        }
    }

    impl Platform for FakePlatform {
        fn enter(&mut self) -> Result<()> {
            Ok(())
        }
        fn exit(&mut self) -> Result<()> {
            Ok(())
        }
        fn window_extent(&self) -> Result<Extent> {
            Ok(self.extent)
        }
        fn poll_keys(&mut self) -> Result<(Vec<KeyCode>, Modifiers)> {
            Ok(self.pending_keys.borrow_mut().pop().unwrap_or((Vec::new(), Modifiers::NONE)))
        }
        fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
            self.written.extend_from_slice(bytes);
            Ok(())
        }
        fn flush(&mut self) -> Result<()> {
            Ok(())
        }
        fn set_title(&mut self, _title: &str) -> Result<()> {
            Ok(())
        }
        fn now_millis(&self) -> u64 {
            0
        }
    }

    #[test]
    fn first_tick_composites_and_presents() {
        let platform = FakePlatform::new(GExtent::new(10, 1));
        let mut app = Application::new(platform).unwrap();
        let id = app
            .create_control(
                None,
                GExtent::new(10, 1),
                ControlKind::Button,
                ControlFlags { focusable: true },
                WidgetData::Button(ButtonData::new("OK")),
            )
            .unwrap();
        app.set_focus(id).unwrap();
        let still_running = app.tick().unwrap();
        assert!(still_running);
        assert!(!app.surface.rendered_text().is_empty());
    }

    #[test]
    fn resize_marks_everything_dirty() {
        let platform = FakePlatform::new(GExtent::new(10, 1));
        let mut app = Application::new(platform).unwrap();
        let id = app
            .create_control(
                None,
                GExtent::new(10, 1),
                ControlKind::Label,
                ControlFlags::default(),
                WidgetData::Label(crate::widget::label::LabelData::new("hi")),
            )
            .unwrap();
        app.tick().unwrap();
        app.controls.get_mut(id).unwrap().clear_dirty();
        app.platform.extent = GExtent::new(20, 2);
        app.detect_resize().unwrap();
        assert!(app.controls.get(id).unwrap().state().dirty);
    }

    #[test]
    fn quit_stops_tick_loop() {
        let platform = FakePlatform::new(GExtent::new(5, 1));
        let mut app = Application::new(platform).unwrap();
        app.quit();
        assert!(!app.tick().unwrap());
    }

    #[test]
    fn button_click_surfaces_through_take_fired_buttons() {
        let platform = FakePlatform::new(GExtent::new(10, 1));
        let mut app = Application::new(platform).unwrap();
        let id = app
            .create_control(
                None,
                GExtent::new(10, 1),
                ControlKind::Button,
                ControlFlags { focusable: true },
                WidgetData::Button(ButtonData::new("OK")),
            )
            .unwrap();
        app.set_focus(id).unwrap();

        // Pushed in reverse: poll_keys pops the last-pushed entry first.
        app.platform.pending_keys.get_mut().push((Vec::new(), Modifiers::NONE));
        app.platform.pending_keys.get_mut().push((vec![KeyCode::Enter], Modifiers::NONE));

        app.tick().unwrap();
        assert!(app.take_fired_buttons().is_empty());

        app.tick().unwrap();
        assert_eq!(app.take_fired_buttons(), vec![id]);
        assert!(app.take_fired_buttons().is_empty());
    }

    #[test]
    fn arrow_key_moves_focus_via_adjacent_link() {
        let platform = FakePlatform::new(GExtent::new(20, 1));
        let mut app = Application::new(platform).unwrap();
        let left = app
            .create_control(
                None,
                GExtent::new(10, 1),
                ControlKind::Button,
                ControlFlags { focusable: true },
                WidgetData::Button(ButtonData::new("L")),
            )
            .unwrap();
        let right = app
            .create_control(
                None,
                GExtent::new(10, 1),
                ControlKind::Button,
                ControlFlags { focusable: true },
                WidgetData::Button(ButtonData::new("R")),
            )
            .unwrap();
        app.controls_mut().get_mut(left).unwrap().adjacent_mut().east = Some(right);
        app.set_focus(left).unwrap();

        app.platform.pending_keys.get_mut().push((vec![KeyCode::Right], Modifiers::NONE));
        app.tick().unwrap();

        assert_eq!(app.focused(), Some(right));
        assert!(app.controls.get(right).unwrap().state().focused);
        assert!(!app.controls.get(left).unwrap().state().focused);
    }

    #[test]
    fn dropdown_activation_expands_panel_and_commit_restores() {
        let platform = FakePlatform::new(GExtent::new(20, 24));
        let mut app = Application::new(platform).unwrap();
        let id = app
            .create_control(
                None,
                GExtent::new(10, 1),
                ControlKind::Dropdown,
                ControlFlags { focusable: true },
                WidgetData::Dropdown(crate::widget::dropdown::DropdownData::new(
                    vec!["a".into(), "b".into(), "c".into()],
                    3,
                )),
            )
            .unwrap();
        let transform_id = app.controls.get(id).unwrap().transform();
        {
            let t = app.transforms_mut().transform_mut(transform_id).unwrap();
            t.local_alignment = Alignment::LEFT | Alignment::TOP;
            t.local_extent = GExtent::new(10, 1);
        }
        app.set_focus(id).unwrap();

        // Resolve once so the collapsed row has a real global rect before
        // the panel expands.
        app.tick().unwrap();

        app.platform.pending_keys.get_mut().push((vec![KeyCode::Enter], Modifiers::NONE));
        app.tick().unwrap();

        assert!(app.controls.get(id).unwrap().state().active);
        assert_eq!(app.transforms_mut().transform_mut(transform_id).unwrap().local_extent, GExtent::new(10, 4));
        assert_eq!(app.controls.get(id).unwrap().image().extent(), GExtent::new(10, 4));

        // Release before pressing again, so the keyboard FSM emits a fresh
        // `Down` transition rather than a no-op cooldown tick.
        app.platform.pending_keys.get_mut().push((Vec::new(), Modifiers::NONE));
        app.tick().unwrap();
        app.platform.pending_keys.get_mut().push((vec![KeyCode::Enter], Modifiers::NONE));
        app.tick().unwrap();

        assert!(!app.controls.get(id).unwrap().state().active);
        assert_eq!(app.transforms_mut().transform_mut(transform_id).unwrap().local_extent, GExtent::new(10, 1));
        assert_eq!(app.controls.get(id).unwrap().image().extent(), GExtent::new(10, 1));
    }
}
