//! Transient on-screen notices.

/// A notice with its remaining lifetime in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct TransientMessage {
    pub text: String,
    pub remaining: f32,
}

/// Holds the single notice currently shown. A new notice replaces the old one.
#[derive(Debug, Clone)]
pub struct MessageLog {
    duration: f32,
    current: Option<TransientMessage>,
}

impl MessageLog {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            current: None,
        }
    }

    pub fn push(&mut self, text: impl Into<String>) {
        self.current = Some(TransientMessage {
            text: text.into(),
            remaining: self.duration,
        });
    }

    /// Age the current notice, dropping it once its time is up.
    pub fn update(&mut self, delta_time: f32) {
        if let Some(message) = &mut self.current {
            message.remaining -= delta_time;
            if message.remaining <= 0.0 {
                self.current = None;
            }
        }
    }

    pub fn current(&self) -> Option<&TransientMessage> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_expires_after_duration() {
        let mut log = MessageLog::new(1.0);
        log.push("hello");
        log.update(0.6);
        assert_eq!(log.current().map(|m| m.text.as_str()), Some("hello"));
        log.update(0.5);
        assert!(log.current().is_none());
    }

    #[test]
    fn newer_message_replaces_older_and_resets_timer() {
        let mut log = MessageLog::new(1.0);
        log.push("first");
        log.update(0.9);
        log.push("second");
        log.update(0.5);

        let current = log.current().unwrap();
        assert_eq!(current.text, "second");
        assert!((current.remaining - 0.5).abs() < 1e-6);
    }

    #[test]
    fn update_without_message_is_harmless() {
        let mut log = MessageLog::new(2.0);
        log.update(10.0);
        assert!(log.current().is_none());
    }
}
