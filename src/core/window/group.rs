//=========================================================================
// Window Group
//=========================================================================
//
// A window that owns an ordered list of child windows.
//
// Structural changes never touch the active list while it is iterated.
// Requests are buffered and committed at one fixed point per update:
//
// ```text
//   update(ctx)
//     1. own window update   (components + mouse dispatch)    if enabled
//     2. child updates       (enabled children, list order)
//     3. claim ctx commands addressed to own children
//     4. commit
//          a. pending adds     → appended, parent + audio set
//          b. pending reorders → moved to front / back
//          c. pending removals → on_closing(), then detached
//     5. root only: audio.update()
// ```
//
// List order is draw order: the last window is drawn on top.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::{update_window, Window, WindowCommand, WindowCore, WindowId, WindowKind, WindowRegistry};
use crate::core::context::UpdateContext;
use crate::core::geometry::{Rect, Vec2};
use crate::core::services::{Renderer, SharedAudio};
use crate::core::ui::{AsAny, Drawable};

//=== Reorder =============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reorder {
    Front,
    Back,
}

//=== WindowGroup =========================================================

/// Window owning child windows with deferred add/remove/reorder.
pub struct WindowGroup {
    core: WindowCore,
    windows: Vec<Box<dyn Window>>,
    pending_add: Vec<Box<dyn Window>>,
    pending_remove: Vec<WindowId>,
    pending_reorder: Vec<(WindowId, Reorder)>,
}

impl WindowGroup {
    //--- Construction -----------------------------------------------------

    /// Creates an empty group covering `rect`.
    pub fn new(rect: Rect) -> Self {
        Self::with_core(WindowCore::new(rect))
    }

    /// Creates an empty group around an existing core.
    pub fn with_core(core: WindowCore) -> Self {
        Self {
            core,
            windows: Vec::new(),
            pending_add: Vec::new(),
            pending_remove: Vec::new(),
            pending_reorder: Vec::new(),
        }
    }

    //=====================================================================
    // Deferred Mutation
    //=====================================================================

    /// Queues `window` to join the group at the next commit.
    pub fn add_window(&mut self, window: Box<dyn Window>) -> WindowId {
        let id = window.id();
        debug!(target: "window", "Queued window {:?} for add to group {:?}", id, self.core.id());
        self.pending_add.push(window);
        id
    }

    /// Boxes and queues `window`.
    pub fn push<W: Window>(&mut self, window: W) -> WindowId {
        self.add_window(Box::new(window))
    }

    /// Queues removal of window `id`. Repeated requests collapse to one.
    pub fn remove_window(&mut self, id: WindowId) {
        if !self.pending_remove.contains(&id) {
            self.pending_remove.push(id);
        }
    }

    /// Queues removal of every active window tagged `code`.
    pub fn remove_all_by_code(&mut self, code: i32) -> bool {
        let ids = self.ids_where(|w| w.code() == code);
        self.remove_each(ids)
    }

    /// Queues removal of the first active window tagged `code`.
    pub fn remove_first_by_code(&mut self, code: i32) -> bool {
        let id = self.find_by_code(code).map(|w| w.id());
        self.remove_each(id)
    }

    /// Queues removal of the active window at `index`.
    pub fn remove_at(&mut self, index: usize) -> bool {
        let id = self.window_at(index).map(|w| w.id());
        self.remove_each(id)
    }

    /// Queues removal of every active window of type `T`.
    pub fn remove_all_of<T: Window>(&mut self) -> bool {
        let ids = self.ids_where(is_of::<T>);
        self.remove_each(ids)
    }

    /// Queues removal of the first active window of type `T`.
    pub fn remove_first_of<T: Window>(&mut self) -> bool {
        let id = self.windows.iter().map(|w| &**w).find(|w| is_of::<T>(*w)).map(|w| w.id());
        self.remove_each(id)
    }

    /// Queues removal of every active window.
    pub fn remove_all(&mut self) {
        let ids = self.ids_where(|_| true);
        self.remove_each(ids);
    }

    //--- Reordering -------------------------------------------------------

    /// Moves window `id` to the top of the draw order at the next commit.
    pub fn bring_to_front(&mut self, id: WindowId) -> bool {
        self.reorder(Some(id), Reorder::Front)
    }

    pub fn bring_to_front_by_code(&mut self, code: i32) -> bool {
        let id = self.find_by_code(code).map(|w| w.id());
        self.reorder(id, Reorder::Front)
    }

    pub fn bring_to_front_at(&mut self, index: usize) -> bool {
        let id = self.window_at(index).map(|w| w.id());
        self.reorder(id, Reorder::Front)
    }

    /// Moves window `id` to the bottom of the draw order at the next commit.
    pub fn send_to_back(&mut self, id: WindowId) -> bool {
        self.reorder(Some(id), Reorder::Back)
    }

    pub fn send_to_back_by_code(&mut self, code: i32) -> bool {
        let id = self.find_by_code(code).map(|w| w.id());
        self.reorder(id, Reorder::Back)
    }

    pub fn send_to_back_at(&mut self, index: usize) -> bool {
        let id = self.window_at(index).map(|w| w.id());
        self.reorder(id, Reorder::Back)
    }

    /// Sends the first active window of type `T` to the back.
    pub fn send_to_back_of<T: Window>(&mut self) -> bool {
        let id = self.find_of::<T>().map(|w| w.id());
        self.reorder(id, Reorder::Back)
    }

    //--- Screen Switching -------------------------------------------------

    /// Shows a window of `kind` unless the first window already is one.
    ///
    /// When the first active window (or a queued add) has a different
    /// type, every active window is queued for removal and a new window
    /// built by `registry` is queued for add. Returns `true` if a window
    /// was queued, `false` if nothing changed or `kind` is unknown.
    pub fn set_window<K: WindowKind>(&mut self, kind: K, rect: Rect, registry: &WindowRegistry<K>) -> bool {
        let Some(wanted) = registry.type_of(kind) else {
            debug!(target: "window", "Cannot switch to unregistered window kind {:?}", kind);
            return false;
        };

        let shown = self.windows.first().map(|w| (**w).as_any().type_id());
        let queued = self.pending_add.iter().any(|w| (**w).as_any().type_id() == wanted);
        if shown == Some(wanted) || queued {
            return false;
        }

        match registry.create(kind, rect) {
            Some(window) => {
                debug!(target: "window", "Switching group {:?} to {:?}", self.core.id(), kind);
                self.remove_all();
                self.add_window(window);
                true
            }
            None => false,
        }
    }

    //=====================================================================
    // Lookup
    //=====================================================================

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Returns `true` if `id` is in the active list.
    pub fn contains(&self, id: WindowId) -> bool {
        self.index_of(id).is_some()
    }

    /// Active windows in draw order.
    pub fn windows(&self) -> impl Iterator<Item = &(dyn Window + 'static)> {
        self.windows.iter().map(|w| &**w)
    }

    pub fn window(&self, id: WindowId) -> Option<&(dyn Window + 'static)> {
        self.windows().find(|w| w.id() == id)
    }

    pub fn window_mut(&mut self, id: WindowId) -> Option<&mut (dyn Window + 'static)> {
        self.windows.iter_mut().map(|w| &mut **w).find(|w| w.id() == id)
    }

    pub fn window_at(&self, index: usize) -> Option<&(dyn Window + 'static)> {
        self.windows.get(index).map(|w| &**w)
    }

    /// First active window tagged `code`.
    pub fn find_by_code(&self, code: i32) -> Option<&(dyn Window + 'static)> {
        self.windows().find(|w| w.code() == code)
    }

    /// Every active window tagged `code`, in draw order.
    pub fn find_all_by_code(&self, code: i32) -> Vec<&(dyn Window + 'static)> {
        self.windows().filter(|w| w.code() == code).collect()
    }

    /// First active window of type `T`.
    pub fn find_of<T: Window>(&self) -> Option<&T> {
        self.windows().find_map(|w| w.as_any().downcast_ref::<T>())
    }

    pub fn find_of_mut<T: Window>(&mut self) -> Option<&mut T> {
        self.windows.iter_mut().find_map(|w| (**w).as_any_mut().downcast_mut::<T>())
    }

    /// Every active window of type `T`, in draw order.
    pub fn find_all_of<T: Window>(&self) -> Vec<&T> {
        self.windows().filter_map(|w| w.as_any().downcast_ref::<T>()).collect()
    }

    /// Number of windows waiting for the next commit to join.
    pub fn pending_adds(&self) -> usize {
        self.pending_add.len()
    }

    //=====================================================================
    // Commands
    //=====================================================================

    /// Applies `command` here or in the first descendant group it names.
    ///
    /// Returns the command back when no group in this subtree owns its
    /// target. Applied commands take effect at that group's next commit.
    pub fn deliver(&mut self, command: WindowCommand) -> Result<(), WindowCommand> {
        if self.claims(&command) {
            self.apply(command);
            return Ok(());
        }

        let mut command = command;
        for window in &mut self.windows {
            if let Some(group) = window.as_group_mut() {
                match group.deliver(command) {
                    Ok(()) => return Ok(()),
                    Err(returned) => command = returned,
                }
            }
        }
        Err(command)
    }

    fn claims(&self, command: &WindowCommand) -> bool {
        match command {
            WindowCommand::Open { parent, .. } => *parent == self.core.id(),
            other => self.knows(other.target()),
        }
    }

    fn apply(&mut self, command: WindowCommand) {
        match command {
            WindowCommand::Close(id) => self.remove_window(id),
            WindowCommand::BringToFront(id) => {
                self.bring_to_front(id);
            }
            WindowCommand::SendToBack(id) => {
                self.send_to_back(id);
            }
            WindowCommand::Open { window, .. } => {
                self.add_window(window);
            }
        }
    }

    fn absorb_commands(&mut self, ctx: &UpdateContext<'_>) {
        let claimed = ctx.take_commands_where(|command| self.claims(command));
        for command in claimed {
            self.apply(command);
        }
    }

    //=====================================================================
    // Commit
    //=====================================================================

    /// Applies pending adds, then reorders, then removals.
    fn commit(&mut self) {
        let own = self.core.id();
        let audio = self.core.audio().cloned();

        for mut window in self.pending_add.drain(..) {
            window.core_mut().set_parent(Some(own));
            if audio.is_some() {
                window.set_audio(audio.clone());
            }
            self.windows.push(window);
        }

        for (id, place) in std::mem::take(&mut self.pending_reorder) {
            let Some(index) = self.windows.iter().position(|w| w.id() == id) else {
                continue;
            };
            let window = self.windows.remove(index);
            match place {
                Reorder::Front => self.windows.push(window),
                Reorder::Back => self.windows.insert(0, window),
            }
        }

        for id in std::mem::take(&mut self.pending_remove) {
            let Some(index) = self.windows.iter().position(|w| w.id() == id) else {
                debug!(target: "window", "Window {:?} not in group {:?}, skipping removal", id, own);
                continue;
            };
            self.windows[index].on_closing();
            let mut window = self.windows.remove(index);
            window.core_mut().set_parent(None);
            debug!(target: "window", "Removed window {:?} from group {:?}", id, own);
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn index_of(&self, id: WindowId) -> Option<usize> {
        self.windows.iter().position(|w| w.id() == id)
    }

    /// Active or queued child.
    fn knows(&self, id: WindowId) -> bool {
        self.contains(id) || self.pending_add.iter().any(|w| w.id() == id)
    }

    fn ids_where<F>(&self, mut predicate: F) -> Vec<WindowId>
    where
        F: FnMut(&dyn Window) -> bool,
    {
        self.windows().filter(|w| predicate(*w)).map(|w| w.id()).collect()
    }

    fn remove_each<I: IntoIterator<Item = WindowId>>(&mut self, ids: I) -> bool {
        let mut any = false;
        for id in ids {
            self.remove_window(id);
            any = true;
        }
        any
    }

    fn reorder(&mut self, id: Option<WindowId>, place: Reorder) -> bool {
        match id {
            Some(id) if self.knows(id) => {
                self.pending_reorder.push((id, place));
                true
            }
            _ => false,
        }
    }
}

fn is_of<T: Window>(window: &dyn Window) -> bool {
    window.as_any().is::<T>()
}

//=== Window Implementation ===============================================

impl Window for WindowGroup {
    fn core(&self) -> &WindowCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WindowCore {
        &mut self.core
    }

    fn update(&mut self, ctx: &UpdateContext<'_>) {
        update_window(self, ctx);
        for window in self.windows.iter_mut().filter(|w| w.is_enabled()) {
            window.update(ctx);
        }

        self.absorb_commands(ctx);
        self.commit();

        if self.core.is_root() {
            if let Some(audio) = self.core.audio() {
                audio.borrow_mut().update();
            }
        }
    }

    /// The root group owns the render batch; nested groups draw into it.
    fn draw(&self, renderer: &mut dyn Renderer) {
        let root = self.core.is_root();
        if root {
            renderer.begin();
        }

        if self.core.is_visible() {
            self.core.container().draw(renderer);
            for window in self.windows.iter().filter(|w| w.is_visible()) {
                window.draw(renderer);
            }
        }

        if root {
            renderer.end();
        }
    }

    /// Forwards the notification to every enabled child.
    fn on_closing(&mut self) {
        for window in self.windows.iter_mut().filter(|w| w.is_enabled()) {
            window.on_closing();
        }
    }

    fn set_audio(&mut self, audio: Option<SharedAudio>) {
        for window in self.windows.iter_mut().chain(self.pending_add.iter_mut()) {
            window.set_audio(audio.clone());
        }
        self.core.set_audio(audio);
    }

    fn translate(&mut self, by: Vec2) {
        self.core.translate(by);
        for window in self.windows.iter_mut().chain(self.pending_add.iter_mut()) {
            window.translate(by);
        }
    }

    fn as_group_mut(&mut self) -> Option<&mut WindowGroup> {
        Some(self)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use super::*;
    use crate::core::input::InputSnapshot;
    use crate::core::services::testing::{CountingAudio, DrawCall, RecordingRenderer};
    use crate::core::ui::component::testing::{new_log, EventLog};
    use crate::core::window::registry::tests::{registry, Plain, Screen};
    use crate::core::window::testing::ProbeWindow;

    //--- Test Helpers -----------------------------------------------------

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Rect {
        Rect::from_origin_size((x, y), (w, h))
    }

    fn tick(group: &mut WindowGroup) {
        let input = InputSnapshot::new();
        let ctx = UpdateContext::new(Duration::from_millis(16), &input, Rect::ZERO);
        group.update(&ctx);
    }

    fn probe(name: &'static str, log: &EventLog) -> ProbeWindow {
        ProbeWindow::new(name, rect(0.0, 0.0, 10.0, 10.0), log)
    }

    fn codes(group: &WindowGroup) -> Vec<i32> {
        group.windows().map(|w| w.code()).collect()
    }

    /// Group with three committed probes coded 1, 2 and 3.
    fn three(log: &EventLog) -> (WindowGroup, Vec<WindowId>) {
        let mut group = WindowGroup::new(rect(0.0, 0.0, 100.0, 100.0));
        let ids = vec![
            group.push(probe("a", log).with_code(1)),
            group.push(probe("b", log).with_code(2)),
            group.push(probe("c", log).with_code(3)),
        ];
        tick(&mut group);
        log.borrow_mut().clear();
        (group, ids)
    }

    //=====================================================================
    // Deferred Add / Remove
    //=====================================================================

    /// Tests that an added window only becomes active after a boundary.
    #[test]
    fn add_is_deferred_until_commit() {
        let log = new_log();
        let mut group = WindowGroup::new(Rect::ZERO);

        let id = group.push(probe("a", &log));
        assert!(!group.contains(id));
        assert_eq!(group.pending_adds(), 1);

        tick(&mut group);

        assert!(group.contains(id));
        assert_eq!(group.window(id).and_then(|w| w.core().parent()), Some(group.id()));
        // Added after the child pass, so not updated on the commit frame
        assert!(log.borrow().is_empty());
    }

    /// Tests that removal notifies closing once and detaches at commit.
    #[test]
    fn remove_notifies_closing_then_detaches() {
        let log = new_log();
        let (mut group, ids) = three(&log);

        group.remove_window(ids[1]);
        group.remove_window(ids[1]);
        assert!(group.contains(ids[1]));

        tick(&mut group);

        assert_eq!(codes(&group), vec![1, 3]);
        let closings = log.borrow().iter().filter(|e| e.ends_with(":closing")).count();
        assert_eq!(closings, 1);
        assert_eq!(*log.borrow(), vec!["a:update", "b:update", "c:update", "b:closing"]);
    }

    /// Tests that adding and removing in one frame leaves the window out.
    #[test]
    fn add_then_remove_same_frame_is_absent() {
        let log = new_log();
        let mut group = WindowGroup::new(Rect::ZERO);
        let id = group.push(probe("a", &log));
        group.remove_window(id);

        tick(&mut group);

        assert!(group.is_empty());
        assert_eq!(*log.borrow(), vec!["a:closing"]);
    }

    /// Tests that disabled children are skipped during update.
    #[test]
    fn disabled_children_not_updated() {
        let log = new_log();
        let (mut group, ids) = three(&log);
        group.window_mut(ids[0]).expect("child").core_mut().set_enabled(false);

        tick(&mut group);

        assert_eq!(*log.borrow(), vec!["b:update", "c:update"]);
    }

    /// Tests that a disabled group still commits pending changes.
    #[test]
    fn disabled_group_still_commits() {
        let log = new_log();
        let (mut group, ids) = three(&log);
        group.core_mut().set_enabled(false);
        group.remove_window(ids[0]);

        tick(&mut group);

        assert_eq!(codes(&group), vec![2, 3]);
        assert_eq!(log.borrow().last().map(String::as_str), Some("a:closing"));
    }

    /// Tests that a disabled group skips its own update but still updates
    /// its enabled children.
    #[test]
    fn disabled_group_still_updates_enabled_children() {
        let log = new_log();
        let (mut group, ids) = three(&log);
        group.core_mut().set_enabled(false);
        group.window_mut(ids[1]).expect("child").core_mut().set_enabled(false);

        tick(&mut group);

        assert_eq!(*log.borrow(), vec!["a:update", "c:update"]);
    }

    //=====================================================================
    // Commands
    //=====================================================================

    /// Tests that a window closing itself from update leaves at the same
    /// frame's commit.
    #[test]
    fn window_can_close_itself_during_update() {
        let log = new_log();
        let mut group = WindowGroup::new(Rect::ZERO);
        let id = group.push(probe("a", &log).on_update(|id, ctx| ctx.close(id)));
        tick(&mut group);
        assert!(group.contains(id));

        tick(&mut group);

        assert!(!group.contains(id));
        assert_eq!(*log.borrow(), vec!["a:update", "a:closing"]);
    }

    /// Tests that an open command adds to the named group.
    #[test]
    fn open_command_adds_window() {
        let log = new_log();
        let mut group = WindowGroup::new(Rect::ZERO);
        let group_id = group.id();
        let spawned = Rc::new(RefCell::new(None));
        let slot = spawned.clone();
        let child_log = log.clone();
        group.push(probe("opener", &log).on_update(move |_, ctx| {
            if slot.borrow().is_none() {
                let window = ProbeWindow::new("spawned", Rect::ZERO, &child_log);
                *slot.borrow_mut() = Some(window.core.id());
                ctx.open(group_id, Box::new(window));
            }
        }));
        tick(&mut group);

        tick(&mut group);

        let spawned = spawned.borrow().expect("opened");
        assert!(group.contains(spawned));
        assert_eq!(group.len(), 2);
    }

    /// Tests that deliver routes a command to a nested group.
    #[test]
    fn deliver_reaches_nested_group() {
        let log = new_log();
        let mut inner = WindowGroup::new(Rect::ZERO);
        let leaf = inner.push(probe("leaf", &log));
        tick(&mut inner);
        let mut outer = WindowGroup::new(Rect::ZERO);
        let inner_id = outer.push(inner);
        tick(&mut outer);

        assert!(outer.deliver(WindowCommand::Close(leaf)).is_ok());
        tick(&mut outer);

        let inner = outer.window(inner_id).and_then(|w| w.as_any().downcast_ref::<WindowGroup>());
        assert_eq!(inner.map(WindowGroup::len), Some(0));
        assert!(log.borrow().contains(&"leaf:closing".to_string()));
    }

    /// Tests that a command naming no known window comes back.
    #[test]
    fn deliver_returns_unknown_commands() {
        let mut group = WindowGroup::new(Rect::ZERO);
        let stray = WindowCore::new(Rect::ZERO).id();

        let result = group.deliver(WindowCommand::BringToFront(stray));

        assert!(matches!(result, Err(WindowCommand::BringToFront(id)) if id == stray));
    }

    //=====================================================================
    // Reordering
    //=====================================================================

    /// Tests that bring_to_front applies at the next boundary.
    #[test]
    fn bring_to_front_applies_after_one_commit() {
        let log = new_log();
        let (mut group, ids) = three(&log);

        assert!(group.bring_to_front(ids[0]));
        assert_eq!(codes(&group), vec![1, 2, 3]);

        tick(&mut group);
        assert_eq!(codes(&group), vec![2, 3, 1]);
    }

    /// Tests the code, index and type variants of reordering.
    #[test]
    fn reorder_variants() {
        let log = new_log();
        let (mut group, _) = three(&log);

        assert!(group.send_to_back_by_code(3));
        assert!(group.bring_to_front_at(0));
        tick(&mut group);
        assert_eq!(codes(&group), vec![3, 2, 1]);

        assert!(group.send_to_back_at(2));
        assert!(!group.bring_to_front_by_code(99));
        assert!(!group.send_to_back_of::<Plain>());
        tick(&mut group);
        assert_eq!(codes(&group), vec![1, 3, 2]);
    }

    /// Tests that a removal in the same frame wins over a reorder.
    #[test]
    fn removal_wins_over_reorder() {
        let log = new_log();
        let (mut group, ids) = three(&log);

        group.bring_to_front(ids[0]);
        group.remove_window(ids[0]);
        tick(&mut group);

        assert_eq!(codes(&group), vec![2, 3]);
    }

    //=====================================================================
    // Lookup & Bulk Removal
    //=====================================================================

    /// Tests that "all" lookups scan the whole list and "first" stops early.
    #[test]
    fn first_versus_all_by_code() {
        let log = new_log();
        let mut group = WindowGroup::new(Rect::ZERO);
        let first = group.push(probe("a", &log).with_code(7));
        group.push(probe("b", &log).with_code(1));
        group.push(probe("c", &log).with_code(7));
        tick(&mut group);

        assert_eq!(group.find_by_code(7).map(|w| w.id()), Some(first));
        assert_eq!(group.find_all_by_code(7).len(), 2);
        assert!(group.find_by_code(42).is_none());

        assert!(group.remove_first_by_code(7));
        tick(&mut group);
        assert_eq!(codes(&group), vec![1, 7]);

        assert!(group.remove_all_by_code(7));
        assert!(!group.remove_all_by_code(42));
        tick(&mut group);
        assert_eq!(codes(&group), vec![1]);
    }

    /// Tests typed lookup and removal.
    #[test]
    fn typed_lookup_and_removal() {
        let log = new_log();
        let mut group = WindowGroup::new(Rect::ZERO);
        group.push(probe("a", &log).with_code(1));
        group.push(Plain { core: WindowCore::new(Rect::ZERO).with_code(2) });
        group.push(probe("b", &log).with_code(3));
        tick(&mut group);

        assert_eq!(group.find_all_of::<ProbeWindow>().len(), 2);
        assert_eq!(group.find_of::<Plain>().map(|p| p.core.code()), Some(2));
        group.find_of_mut::<ProbeWindow>().expect("probe").core.set_code(10);

        assert!(group.remove_first_of::<ProbeWindow>());
        tick(&mut group);
        assert_eq!(codes(&group), vec![2, 3]);

        assert!(group.remove_all_of::<ProbeWindow>());
        tick(&mut group);
        assert_eq!(codes(&group), vec![2]);
        assert!(!group.remove_first_of::<ProbeWindow>());
    }

    /// Tests index removal and remove_all.
    #[test]
    fn remove_at_and_remove_all() {
        let log = new_log();
        let (mut group, _) = three(&log);

        assert!(group.remove_at(1));
        assert!(!group.remove_at(9));
        tick(&mut group);
        assert_eq!(codes(&group), vec![1, 3]);

        group.remove_all();
        tick(&mut group);
        assert!(group.is_empty());
    }

    //=====================================================================
    // Screen Switching
    //=====================================================================

    /// Tests that set_window only swaps when the kind differs.
    #[test]
    fn set_window_swaps_on_type_change() {
        let registry = registry();
        let mut group = WindowGroup::new(Rect::ZERO);

        assert!(group.set_window(Screen::Menu, Rect::ZERO, &registry));
        assert!(!group.set_window(Screen::Menu, Rect::ZERO, &registry));
        tick(&mut group);
        assert_eq!(codes(&group), vec![1]);

        assert!(!group.set_window(Screen::Menu, Rect::ZERO, &registry));
        assert!(group.set_window(Screen::Game, Rect::ZERO, &registry));
        tick(&mut group);
        assert_eq!(codes(&group), vec![2]);

        assert!(!group.set_window(Screen::Missing, Rect::ZERO, &registry));
    }

    //=====================================================================
    // Drawing
    //=====================================================================

    /// Tests that only the root opens and closes the batch and hidden
    /// children are skipped.
    #[test]
    fn root_owns_batch_and_skips_hidden() {
        let log = new_log();
        let mut inner = WindowGroup::new(Rect::ZERO);
        inner.push(probe("leaf", &log));
        tick(&mut inner);
        let mut root = WindowGroup::new(Rect::ZERO);
        root.push(inner);
        let hidden = root.push(probe("hidden", &log));
        tick(&mut root);
        root.window_mut(hidden).expect("child").core_mut().set_visible(false);
        log.borrow_mut().clear();

        let mut renderer = RecordingRenderer::default();
        root.draw(&mut renderer);

        assert_eq!(renderer.calls, vec![DrawCall::Begin, DrawCall::End]);
        assert_eq!(*log.borrow(), vec!["leaf:draw"]);
    }

    /// Tests that an invisible root still brackets the batch.
    #[test]
    fn invisible_root_draws_only_batch() {
        let log = new_log();
        let (mut group, _) = three(&log);
        group.core_mut().set_visible(false);
        let mut renderer = RecordingRenderer::default();

        group.draw(&mut renderer);

        assert_eq!(renderer.calls, vec![DrawCall::Begin, DrawCall::End]);
        assert!(log.borrow().is_empty());
    }

    //=====================================================================
    // Services & Broadcast
    //=====================================================================

    /// Tests that only the root ticks audio and adds inherit the handle.
    #[test]
    fn audio_ticked_by_root_and_inherited() {
        let audio = Rc::new(RefCell::new(CountingAudio::default()));
        let mut root = WindowGroup::new(Rect::ZERO);
        root.set_audio(Some(audio.clone()));
        let inner_id = root.push(WindowGroup::new(Rect::ZERO));

        tick(&mut root);
        tick(&mut root);

        assert_eq!(audio.borrow().updates, 2);
        let inner = root.window(inner_id).expect("inner");
        assert!(inner.core().audio().is_some());
    }

    /// Tests that closing a group notifies its enabled children.
    #[test]
    fn group_closing_notifies_enabled_children() {
        let log = new_log();
        let (mut group, ids) = three(&log);
        group.window_mut(ids[2]).expect("child").core_mut().set_enabled(false);

        group.on_closing();

        assert_eq!(*log.borrow(), vec!["a:closing", "b:closing"]);
    }

    /// Tests that translate moves the group and every child window.
    #[test]
    fn translate_moves_children() {
        let log = new_log();
        let (mut group, ids) = three(&log);

        group.translate(Vec2::new(5.0, 5.0));

        assert_eq!(group.rect(), rect(5.0, 5.0, 100.0, 100.0));
        assert_eq!(group.window(ids[0]).map(|w| w.rect()), Some(rect(5.0, 5.0, 10.0, 10.0)));
    }
}
