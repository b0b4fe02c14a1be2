use std::cell::RefCell;

use tracing::warn;

/// User-facing notification channel. On the page this is a blocking alert;
/// the coordinator only needs somewhere to send the message.
pub trait Notifier {
    fn report(&self, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn report(&self, message: &str) {
        (**self).report(message)
    }
}

/// Fans each message out to both notifiers, in order.
impl<A: Notifier, B: Notifier> Notifier for (A, B) {
    fn report(&self, message: &str) {
        self.0.report(message);
        self.1.report(message);
    }
}

/// Sends notifications to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn report(&self, message: &str) {
        warn!(%message, "user notification");
    }
}

/// Keeps every reported message, in order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.messages.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.borrow().is_empty()
    }
}

impl Notifier for RecordingNotifier {
    fn report(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}
