use owo_colors::OwoColorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Sink for short-lived user notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, kind: ToastKind, message: &str);

    fn success(&self, message: &str) {
        self.notify(ToastKind::Success, message);
    }

    fn error(&self, message: &str) {
        self.notify(ToastKind::Error, message);
    }
}

/// Prints toasts to stderr.
pub struct TerminalNotifier {
    color: bool,
}

impl TerminalNotifier {
    pub fn new(color: bool) -> Self {
        Self { color }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, kind: ToastKind, message: &str) {
        match (kind, self.color) {
            (ToastKind::Success, true) => eprintln!("{} {}", "✓".green(), message),
            (ToastKind::Error, true) => eprintln!("{} {}", "✗".red(), message.red()),
            (ToastKind::Success, false) => eprintln!("OK: {}", message),
            (ToastKind::Error, false) => eprintln!("Error: {}", message),
        }
    }
}

/// Keeps every toast in memory.
#[cfg(any(test, feature = "test-util"))]
#[derive(Default)]
pub struct RecordingNotifier {
    toasts: std::sync::Mutex<Vec<(ToastKind, String)>>,
}

#[cfg(any(test, feature = "test-util"))]
impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<(ToastKind, String)> {
        self.toasts.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[cfg(any(test, feature = "test-util"))]
impl Notifier for RecordingNotifier {
    fn notify(&self, kind: ToastKind, message: &str) {
        self.toasts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((kind, message.to_string()));
    }
}
