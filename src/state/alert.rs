//! User-facing alert queue.
//!
//! DESIGN
//! ======
//! Alerts are plain data pushed into an `RwSignal<AlertState>` owned by the
//! Libre311 context. Ids are assigned on push so a view or a timer can
//! dismiss one entry without disturbing the rest.

#[cfg(test)]
#[path = "alert_test.rs"]
mod alert_test;

/// How long an alert stays visible in the browser before auto-dismissal.
pub const ALERT_DISMISS_MS: u64 = 6_000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlertType {
    #[default]
    Info,
    Success,
    Warn,
    Error,
}

impl AlertType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// An alert's content. `description` may contain inline markup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Alert {
    pub alert_type: AlertType,
    pub title: String,
    pub description: String,
}

impl Alert {
    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { alert_type: AlertType::Error, title: title.into(), description: description.into() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlertEntry {
    pub id: u64,
    pub alert: Alert,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AlertState {
    pub alerts: Vec<AlertEntry>,
    next_id: u64,
}

impl AlertState {
    /// Append `alert` and return its id.
    pub fn push(&mut self, alert: Alert) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.alerts.push(AlertEntry { id, alert });
        id
    }

    /// Remove the alert with `id`; unknown ids are ignored.
    pub fn dismiss(&mut self, id: u64) {
        self.alerts.retain(|entry| entry.id != id);
    }
}
