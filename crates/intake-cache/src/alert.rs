//! Out-of-band alerts about the health of the source files.
//!
//! The cache reports problems through [`AlertSink::notify`] and moves on;
//! delivery never blocks a reader and never fails back into the cache.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::mpsc::{self, Sender};
use std::sync::{Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use intake_model::ValidationError;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AlertKind {
    DataCorruption,
    FileAccessError,
    ValidationErrors,
    SystemError,
}

impl AlertKind {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::DataCorruption => "Data corruption detected",
            Self::FileAccessError => "File access error",
            Self::ValidationErrors => "Validation errors",
            Self::SystemError => "System error",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::DataCorruption => "dataCorruption",
            Self::FileAccessError => "fileAccessError",
            Self::ValidationErrors => "validationErrors",
            Self::SystemError => "systemError",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One structured notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub kind: AlertKind,
    /// Source the alert is about, or `"system"`.
    pub source: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl Alert {
    pub fn data_corruption(source: &str, error: &impl fmt::Display) -> Self {
        Self {
            kind: AlertKind::DataCorruption,
            source: source.to_string(),
            message: error.to_string(),
            details: None,
        }
    }

    pub fn file_access(source: &str, message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::FileAccessError,
            source: source.to_string(),
            message: message.into(),
            details: None,
        }
    }

    /// Summarize the validation errors of one source.
    ///
    /// Details carry the full error list and a count per entity kind.
    #[must_use]
    pub fn validation(source: &str, errors: &[ValidationError]) -> Self {
        let mut summary: BTreeMap<String, usize> = BTreeMap::new();
        for error in errors {
            *summary.entry(error.kind.to_string()).or_default() += 1;
        }
        let listed: Vec<Value> = errors
            .iter()
            .map(|error| json!({ "row": error.row, "messages": error.messages }))
            .collect();
        Self {
            kind: AlertKind::ValidationErrors,
            source: source.to_string(),
            message: format!("{} rows failed validation", errors.len()),
            details: Some(json!({
                "count": errors.len(),
                "summary": summary,
                "errors": listed,
            })),
        }
    }

    pub fn system(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::SystemError,
            source: "system".to_string(),
            message: message.into(),
            details: None,
        }
    }

    #[must_use]
    pub fn subject(&self) -> String {
        format!("{} - {}", self.kind.title(), self.source)
    }

    #[must_use]
    pub fn body(&self) -> String {
        let lead = match self.kind {
            AlertKind::DataCorruption => format!(
                "Source {} could not be projected and is served empty until it is fixed.",
                self.source
            ),
            AlertKind::FileAccessError => format!(
                "Source {} could not be accessed; previously loaded data stays in use.",
                self.source
            ),
            AlertKind::ValidationErrors => format!(
                "Invalid rows were found in {}; invalid fields were blanked.",
                self.source
            ),
            AlertKind::SystemError => "Unexpected error in the order-intake system.".to_string(),
        };
        format!("{lead}\n{}", self.message)
    }
}

/// Receiver of alerts. Implementations must not block the caller.
pub trait AlertSink: Send + Sync {
    fn notify(&self, alert: Alert);
}

/// Admits at most one alert per (kind, source) within a window.
#[derive(Debug)]
pub struct Cooldown {
    window: Duration,
    last_sent: Mutex<HashMap<(AlertKind, String), Instant>>,
}

impl Cooldown {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_sent: Mutex::new(HashMap::new()),
        }
    }

    /// Whether an alert may go out at `now`; records it if so.
    pub fn admit(&self, kind: AlertKind, source: &str, now: Instant) -> bool {
        let mut last_sent = self
            .last_sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let key = (kind, source.to_string());
        if let Some(sent) = last_sent.get(&key)
            && now.saturating_duration_since(*sent) < self.window
        {
            return false;
        }
        last_sent.insert(key, now);
        true
    }
}

fn deliver(alert: &Alert) {
    let details = alert
        .details
        .as_ref()
        .map(Value::to_string)
        .unwrap_or_default();
    warn!(
        kind = %alert.kind,
        source = %alert.source,
        subject = %alert.subject(),
        details = %details,
        "{}",
        alert.body()
    );
}

/// Default sink: deduplicates with a [`Cooldown`] and writes alerts as
/// `tracing` events from a background thread.
#[derive(Debug)]
pub struct LogAlertSink {
    cooldown: Cooldown,
    sender: Mutex<Option<Sender<Alert>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl LogAlertSink {
    /// Start the delivery thread.
    ///
    /// If the thread cannot be spawned alerts are delivered on the caller's
    /// thread instead.
    #[must_use]
    pub fn spawn(cooldown: Duration) -> Self {
        let (sender, receiver) = mpsc::channel::<Alert>();
        let (sender, worker) = match thread::Builder::new()
            .name("alert-delivery".into())
            .spawn(move || {
                for alert in receiver {
                    deliver(&alert);
                }
            }) {
            Ok(handle) => (Some(sender), Some(handle)),
            Err(e) => {
                error!(error = %e, "failed to spawn alert delivery thread, delivering inline");
                (None, None)
            }
        };
        Self {
            cooldown: Cooldown::new(cooldown),
            sender: Mutex::new(sender),
            worker: Mutex::new(worker),
        }
    }

    /// Deliver everything queued so far and stop the worker.
    ///
    /// Alerts raised afterwards are delivered inline.
    pub fn close(&self) {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let worker = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(worker) = worker
            && worker.join().is_err()
        {
            error!("alert delivery thread panicked");
        }
    }
}

impl AlertSink for LogAlertSink {
    fn notify(&self, alert: Alert) {
        if !self.cooldown.admit(alert.kind, &alert.source, Instant::now()) {
            debug!(kind = %alert.kind, source = %alert.source, "alert suppressed by cooldown");
            return;
        }
        let sender = self
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        match sender {
            Some(sender) => {
                if let Err(mpsc::SendError(alert)) = sender.send(alert) {
                    deliver(&alert);
                }
            }
            None => deliver(&alert),
        }
    }
}

impl Drop for LogAlertSink {
    fn drop(&mut self) {
        self.close();
    }
}

/// Collects alerts in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    alerts: Mutex<Vec<Alert>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn of_kind(&self, kind: AlertKind) -> Vec<Alert> {
        self.alerts()
            .into_iter()
            .filter(|alert| alert.kind == kind)
            .collect()
    }

    pub fn clear(&self) {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl AlertSink for RecordingSink {
    fn notify(&self, alert: Alert) {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(alert);
    }
}

#[cfg(test)]
mod tests {
    use intake_model::EntityKind;

    use super::*;

    #[test]
    fn subject_names_kind_and_source() {
        let alert = Alert::file_access("B_Alunos.csv", "source not found: B_Alunos.csv");
        insta::assert_snapshot!(alert.subject(), @"File access error - B_Alunos.csv");

        let alert = Alert::system("worker crashed");
        insta::assert_snapshot!(alert.subject(), @"System error - system");
    }

    #[test]
    fn validation_details_list_errors_and_summary() {
        let errors = vec![ValidationError {
            kind: EntityKind::Student,
            source: "B_Alunos.csv".to_string(),
            row: 3,
            messages: vec!["invalid email: not-an-email".to_string()],
        }];
        let alert = Alert::validation("B_Alunos.csv", &errors);
        assert_eq!(alert.message, "1 rows failed validation");
        insta::assert_json_snapshot!(alert.details, @r#"
        {
          "count": 1,
          "errors": [
            {
              "messages": [
                "invalid email: not-an-email"
              ],
              "row": 3
            }
          ],
          "summary": {
            "students": 1
          }
        }
        "#);
    }

    #[test]
    fn body_leads_with_kind_specific_text() {
        let alert = Alert::data_corruption("B_Precos.csv", &"missing column");
        assert_eq!(
            alert.body(),
            "Source B_Precos.csv could not be projected and is served empty until it is fixed.\nmissing column"
        );
    }

    #[test]
    fn cooldown_is_per_kind_and_source() {
        let cooldown = Cooldown::new(Duration::from_secs(3600));
        let start = Instant::now();
        assert!(cooldown.admit(AlertKind::FileAccessError, "a.csv", start));
        assert!(!cooldown.admit(AlertKind::FileAccessError, "a.csv", start + Duration::from_secs(60)));
        assert!(cooldown.admit(AlertKind::FileAccessError, "b.csv", start));
        assert!(cooldown.admit(AlertKind::DataCorruption, "a.csv", start));
        assert!(cooldown.admit(
            AlertKind::FileAccessError,
            "a.csv",
            start + Duration::from_secs(3600)
        ));
    }

    #[test]
    fn zero_cooldown_admits_everything() {
        let cooldown = Cooldown::new(Duration::ZERO);
        let now = Instant::now();
        assert!(cooldown.admit(AlertKind::SystemError, "system", now));
        assert!(cooldown.admit(AlertKind::SystemError, "system", now));
    }

    #[test]
    fn log_sink_accepts_alerts_without_blocking() {
        let sink = LogAlertSink::spawn(Duration::from_secs(3600));
        sink.notify(Alert::system("first"));
        sink.notify(Alert::system("second is suppressed"));
        sink.close();
        sink.notify(Alert::file_access("a.csv", "after close is inline"));
    }

    #[test]
    fn recording_sink_filters_by_kind() {
        let sink = RecordingSink::new();
        sink.notify(Alert::system("boom"));
        sink.notify(Alert::file_access("a.csv", "gone"));
        assert_eq!(sink.alerts().len(), 2);
        assert_eq!(sink.of_kind(AlertKind::SystemError).len(), 1);
        sink.clear();
        assert!(sink.alerts().is_empty());
    }
}
