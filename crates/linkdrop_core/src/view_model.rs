use crate::Source;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabView {
    pub id: String,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub source: Source,
    pub active: bool,
    pub input: String,
    pub log_text: String,
    pub log_revision: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub tabs: Vec<TabView>,
    pub panels: Vec<PanelView>,
    /// Blocking notification, shown until dismissed.
    pub alert: Option<String>,
    pub status_line: String,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn active_panel(&self) -> Option<&PanelView> {
        self.panels.iter().find(|panel| panel.active)
    }
}
