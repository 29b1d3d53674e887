use expressway_core::ports::{Notifier, Severity};

/// A message shown to the user
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

/// Single-slot status surface: the latest message replaces the previous one
#[derive(Debug, Default)]
pub struct StatusSlot {
    current: Option<Notification>,
}

impl StatusSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

impl Notifier for StatusSlot {
    fn notify(&mut self, severity: Severity, message: String) {
        match severity {
            Severity::Error => tracing::warn!(%message, "Status"),
            _ => tracing::debug!(%severity, %message, "Status"),
        }
        self.current = Some(Notification { severity, message });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_message_wins() {
        let mut slot = StatusSlot::new();
        assert!(slot.current().is_none());

        slot.notify(Severity::Info, "Saving...".to_string());
        slot.notify(Severity::Success, "Saved".to_string());

        let current = slot.current().unwrap();
        assert_eq!(current.severity, Severity::Success);
        assert_eq!(current.message, "Saved");

        slot.clear();
        assert!(slot.current().is_none());
    }
}
