use std::time::Duration;

pub const WINDOW_TITLE: &str = "Linkdrop";
pub const WINDOW_SIZE: [f32; 2] = [900.0, 640.0];
pub const MIN_WINDOW_SIZE: [f32; 2] = [520.0, 360.0];

/// How often the UI wakes up to drain backend events.
pub const TICK_INTERVAL: Duration = Duration::from_millis(75);

pub const INPUT_WIDTH: f32 = 480.0;
pub const LOG_ROWS: usize = 18;
pub const ALERT_WIDTH: f32 = 420.0;
pub const ALERT_ID: &str = "backend_alert";
