//=========================================================================
// Window Registry
//=========================================================================
//
// Tagged window constructors.
//
// Applications register one constructor per window kind, usually an
// enum of screens. `WindowGroup::set_window` uses the registry to swap
// the visible screen only when the requested kind is not already shown.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::Window;
use crate::core::geometry::Rect;

//=== WindowKind ==========================================================

/// Marker trait for window kind tags.
///
/// Typically implemented by an application enum listing its screens.
pub trait WindowKind: Clone + Copy + Eq + Hash + Debug + 'static {}

//=== WindowRegistry ======================================================

type Constructor = Box<dyn Fn(Rect) -> Box<dyn Window>>;

struct Entry {
    type_id: TypeId,
    construct: Constructor,
}

/// Maps window kinds to the concrete type they build and a constructor.
pub struct WindowRegistry<K: WindowKind> {
    entries: HashMap<K, Entry>,
}

impl<K: WindowKind> WindowRegistry<K> {
    pub fn new() -> Self {
        Self { entries: HashMap::new() }
    }

    /// Registers `construct` as the builder for `kind`.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use gesture_wnd::prelude::*;
    /// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// # enum Screen { Menu }
    /// # impl WindowKind for Screen {}
    /// struct Menu { core: WindowCore }
    ///
    /// impl Window for Menu {
    ///     fn core(&self) -> &WindowCore { &self.core }
    ///     fn core_mut(&mut self) -> &mut WindowCore { &mut self.core }
    /// }
    ///
    /// let mut registry = WindowRegistry::new();
    /// registry.register(Screen::Menu, |rect| Menu { core: WindowCore::new(rect) });
    /// assert!(registry.create(Screen::Menu, Rect::ZERO).is_some());
    /// ```
    pub fn register<W, F>(&mut self, kind: K, construct: F)
    where
        W: Window,
        F: Fn(Rect) -> W + 'static,
    {
        let entry = Entry {
            type_id: TypeId::of::<W>(),
            construct: Box::new(move |rect| Box::new(construct(rect)) as Box<dyn Window>),
        };
        if self.entries.insert(kind, entry).is_some() {
            warn!(target: "window", "Window kind {:?} was already registered and has been replaced", kind);
        }
    }

    /// Builds a window of `kind` covering `rect`. Unknown kinds yield `None`.
    pub fn create(&self, kind: K, rect: Rect) -> Option<Box<dyn Window>> {
        match self.entries.get(&kind) {
            Some(entry) => Some((entry.construct)(rect)),
            None => {
                debug!(target: "window", "No constructor registered for {:?}", kind);
                None
            }
        }
    }

    /// Concrete type built for `kind`, if registered.
    pub fn type_of(&self, kind: K) -> Option<TypeId> {
        self.entries.get(&kind).map(|entry| entry.type_id)
    }

    pub fn contains(&self, kind: K) -> bool {
        self.entries.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: WindowKind> Default for WindowRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
