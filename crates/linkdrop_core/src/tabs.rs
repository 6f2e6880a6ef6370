/// A tab trigger and the panel id it reveals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabButton {
    pub id: String,
    pub target: String,
}

impl TabButton {
    pub fn new(id: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            target: target.into(),
        }
    }
}

/// Mutually exclusive set of panels with matching trigger buttons.
///
/// At most one button and at most one panel are active at any time. A button
/// whose target panel does not exist can still be active; in that case no
/// panel is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TabGroup {
    buttons: Vec<TabButton>,
    panels: Vec<String>,
    active_button: Option<usize>,
    active_panel: Option<usize>,
}

impl TabGroup {
    pub fn new(buttons: Vec<TabButton>, panels: Vec<String>) -> Self {
        Self {
            buttons,
            panels,
            active_button: None,
            active_panel: None,
        }
    }

    /// Builder used for the initial markup state.
    pub fn with_active(mut self, button_id: &str) -> Self {
        self.click(button_id);
        self
    }

    /// Applies a click on `button_id`. Returns `false` and leaves state
    /// untouched when no such button exists.
    pub fn click(&mut self, button_id: &str) -> bool {
        let Some(index) = self.buttons.iter().position(|b| b.id == button_id) else {
            return false;
        };
        let target = &self.buttons[index].target;
        self.active_panel = self.panels.iter().position(|panel| panel == target);
        self.active_button = Some(index);
        true
    }

    pub fn buttons(&self) -> &[TabButton] {
        &self.buttons
    }

    pub fn active_button(&self) -> Option<&str> {
        self.active_button.map(|i| self.buttons[i].id.as_str())
    }

    pub fn active_panel(&self) -> Option<&str> {
        self.active_panel.map(|i| self.panels[i].as_str())
    }

    pub fn is_button_active(&self, button_id: &str) -> bool {
        self.active_button() == Some(button_id)
    }

    pub fn is_panel_active(&self, panel_id: &str) -> bool {
        self.active_panel() == Some(panel_id)
    }
}
