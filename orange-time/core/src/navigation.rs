use std::collections::HashMap;

/// Screens of the application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum View {
    #[default]
    Dashboard,
    Timeline,
    Editor,
}

/// Which screen is shown, where the editor returns to, and the scroll
/// offset each screen was left at.
///
/// Transitions return the scroll offset the newly shown screen should be
/// scrolled to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    current: View,
    previous: View,
    scroll_offsets: HashMap<View, u32>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            current: View::Dashboard,
            previous: View::Dashboard,
            scroll_offsets: HashMap::new(),
        }
    }

    pub fn current(&self) -> View {
        self.current
    }

    /// The screen the editor goes back to.
    pub fn previous(&self) -> View {
        self.previous
    }

    /// Saved scroll offset of `view`, 0 if it was never left.
    pub fn scroll_offset(&self, view: View) -> u32 {
        self.scroll_offsets.get(&view).copied().unwrap_or(0)
    }

    /// Switches directly to `view`. Switching to the editor behaves like
    /// [`Navigator::enter_editor`].
    pub fn show(&mut self, view: View, current_scroll: u32) -> u32 {
        if view == View::Editor {
            return self.enter_editor(current_scroll);
        }
        if self.current != View::Editor {
            self.scroll_offsets.insert(self.current, current_scroll);
        }
        self.current = view;
        self.scroll_offset(view)
    }

    /// Opens the editor, remembering the current screen and its scroll offset.
    /// The editor always opens at the top.
    pub fn enter_editor(&mut self, current_scroll: u32) -> u32 {
        if self.current != View::Editor {
            self.scroll_offsets.insert(self.current, current_scroll);
            self.previous = self.current;
            self.current = View::Editor;
        }
        0
    }

    /// Returns from the editor to the screen it was opened from.
    pub fn leave_editor(&mut self) -> u32 {
        if self.current == View::Editor {
            self.current = self.previous;
        }
        self.scroll_offset(self.current)
    }
}
