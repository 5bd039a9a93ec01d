//! End-of-edit debouncing for continuous controls.
//!
//! Sliders, drag values, and color pickers change on every intermediate
//! drag position. Regenerating the cloud is O(count), so those controls
//! only mark the config as dirty here; the actual regeneration fires
//! once, on the first frame where the edit has settled. Discrete
//! controls (mode, theme) bypass this and regenerate immediately.

/// Tracks whether a regeneration is owed for a settled edit.
#[derive(Debug, Default)]
pub struct Debounce {
    pending: bool,
}

impl Debounce {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that a continuous control changed this frame.
    pub fn mark(&mut self) {
        self.pending = true;
    }

    /// Returns `true` exactly once after a marked edit has settled.
    ///
    /// `editing` should be `true` while the user is still interacting
    /// (pointer held down or a widget focused). While it stays `true`
    /// the pending flag is kept; on the first call with `editing ==
    /// false` the flag is consumed and the caller regenerates.
    pub fn settle(&mut self, editing: bool) -> bool {
        if self.pending && !editing {
            self.pending = false;
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}
