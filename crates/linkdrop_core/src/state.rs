use std::collections::BTreeMap;
use std::fmt;

use crate::view_model::{AppViewModel, PanelView, TabView};
use crate::{local_clock, Clock, LogArea, Source, TabButton, TabGroup};

pub const DEFAULT_ORIGIN: &str = "http://127.0.0.1:5000";
pub const HEALTH_PATH: &str = "/health";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HealthStatus {
    #[default]
    Unknown,
    Checking,
    Online,
    Offline,
}

#[derive(Clone)]
pub struct AppState {
    origin: String,
    clock: Clock,
    tabs: TabGroup,
    inputs: BTreeMap<Source, String>,
    logs: BTreeMap<Source, LogArea>,
    alert: Option<String>,
    health: HealthStatus,
    in_flight: usize,
    last_download: Option<String>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("origin", &self.origin)
            .field("tabs", &self.tabs)
            .field("inputs", &self.inputs)
            .field("logs", &self.logs)
            .field("alert", &self.alert)
            .field("health", &self.health)
            .field("in_flight", &self.in_flight)
            .field("last_download", &self.last_download)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl AppState {
    pub fn new() -> Self {
        let buttons = Source::ALL
            .iter()
            .map(|source| TabButton::new(source.tab_id(), source.tab_id()))
            .collect();
        let panels = Source::ALL
            .iter()
            .map(|source| source.tab_id().to_string())
            .collect();
        let tabs = TabGroup::new(buttons, panels).with_active(Source::Video.tab_id());

        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            clock: local_clock(),
            tabs,
            inputs: Source::ALL.iter().map(|s| (*s, String::new())).collect(),
            logs: Source::ALL.iter().map(|s| (*s, LogArea::new())).collect(),
            alert: None,
            health: HealthStatus::Unknown,
            in_flight: 0,
            last_download: None,
            dirty: false,
        }
    }

    /// Backend origin without a trailing slash, e.g. `http://127.0.0.1:5000`.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.origin, path)
    }

    pub fn tabs(&self) -> &TabGroup {
        &self.tabs
    }

    pub fn input(&self, source: Source) -> &str {
        self.inputs.get(&source).map(String::as_str).unwrap_or_default()
    }

    pub fn log(&self, source: Source) -> &LogArea {
        // Every source gets a log area in `new`.
        &self.logs[&source]
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn health(&self) -> HealthStatus {
        self.health
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn view(&self) -> AppViewModel {
        let tabs = self
            .tabs
            .buttons()
            .iter()
            .map(|button| TabView {
                id: button.id.clone(),
                label: Source::from_tab_id(&button.id)
                    .map(Source::display_name)
                    .unwrap_or(button.id.as_str())
                    .to_string(),
                active: self.tabs.is_button_active(&button.id),
            })
            .collect();

        let panels = Source::ALL
            .iter()
            .map(|&source| {
                let log = self.log(source);
                PanelView {
                    source,
                    active: self.tabs.is_panel_active(source.tab_id()),
                    input: self.input(source).to_string(),
                    log_text: log.text().to_string(),
                    log_revision: log.revision(),
                }
            })
            .collect();

        AppViewModel {
            tabs,
            panels,
            alert: self.alert.clone(),
            status_line: self.status_line(),
            dirty: self.dirty,
        }
    }

    /// Returns whether the state changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn click_tab(&mut self, button_id: &str) -> bool {
        let changed = self.tabs.click(button_id);
        if changed {
            self.mark_dirty();
        }
        changed
    }

    pub(crate) fn set_input(&mut self, source: Source, text: String) {
        self.inputs.insert(source, text);
        self.mark_dirty();
    }

    pub(crate) fn clear_input(&mut self, source: Source) {
        self.set_input(source, String::new());
    }

    pub(crate) fn append_log(&mut self, source: Source, message: impl Into<String>) {
        let timestamp = (self.clock)();
        self.logs.entry(source).or_default().append(timestamp, message);
        self.mark_dirty();
    }

    pub(crate) fn set_alert(&mut self, text: String) {
        self.alert = Some(text);
        self.mark_dirty();
    }

    pub(crate) fn dismiss_alert(&mut self) -> bool {
        let had_alert = self.alert.take().is_some();
        if had_alert {
            self.mark_dirty();
        }
        had_alert
    }

    pub(crate) fn set_health(&mut self, health: HealthStatus) {
        self.health = health;
        self.mark_dirty();
    }

    pub(crate) fn begin_request(&mut self) {
        self.in_flight += 1;
        self.mark_dirty();
    }

    pub(crate) fn finish_request(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.mark_dirty();
    }

    pub(crate) fn set_last_download(&mut self, text: String) {
        self.last_download = Some(text);
        self.mark_dirty();
    }

    fn status_line(&self) -> String {
        let health = match self.health {
            HealthStatus::Unknown => "unknown",
            HealthStatus::Checking => "checking",
            HealthStatus::Online => "online",
            HealthStatus::Offline => "offline",
        };
        let base = format!(
            "Backend: {} ({}) | In flight: {}",
            self.origin, health, self.in_flight
        );
        match &self.last_download {
            Some(download) => format!("{base} | {download}"),
            None => base,
        }
    }
}
