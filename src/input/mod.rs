//! Process-wide key listeners with scoped ownership.
//!
//! Flashcard mode listens for Left/Right on the whole screen. The listener is
//! held as an [`ArrowBinding`]; dropping it removes the listener, so leaving
//! flashcard mode or replacing the section list can never leave a stale one
//! behind.

use std::cell::Cell;
use std::rc::Rc;

/// Registry of active arrow-key listeners.
#[derive(Debug, Clone, Default)]
pub struct KeyBindings {
    active: Rc<Cell<usize>>,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an arrow listener for the section list `generation`.
    pub fn bind_arrows(&self, generation: u64) -> ArrowBinding {
        self.active.set(self.active.get() + 1);
        tracing::debug!(generation, active = self.active.get(), "arrow keys bound");
        ArrowBinding {
            generation,
            active: Rc::clone(&self.active),
        }
    }

    /// Number of listeners currently registered.
    pub fn active_count(&self) -> usize {
        self.active.get()
    }
}

/// An installed arrow-key listener. Released on drop.
#[derive(Debug)]
pub struct ArrowBinding {
    generation: u64,
    active: Rc<Cell<usize>>,
}

impl ArrowBinding {
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether this listener belongs to the section list `generation`.
    ///
    /// A binding left over from an older list ignores key presses.
    pub const fn is_live_for(&self, generation: u64) -> bool {
        self.generation == generation
    }
}

impl Drop for ArrowBinding {
    fn drop(&mut self) {
        self.active.set(self.active.get().saturating_sub(1));
        tracing::debug!(
            generation = self.generation,
            active = self.active.get(),
            "arrow keys released"
        );
    }
}
