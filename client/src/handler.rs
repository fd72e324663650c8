use parley_protocol::Message;

/// A transient user-facing notice (a toast, in UI terms).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Warning(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Self::Success(text) | Self::Warning(text) | Self::Error(text) => text,
        }
    }
}

/// Trait for observing room-view events.
///
/// Implement this to render notices and message updates. All methods have
/// default no-op implementations, so you only need to implement the
/// events you care about.
///
/// # Example
///
/// ```ignore
/// struct Printer;
///
/// impl ViewHandler for Printer {
///     fn on_notice(&mut self, notice: Notice) {
///         println!("{}", notice.text());
///     }
/// }
/// ```
pub trait ViewHandler {
    /// Called when an operation wants to surface a notice to the user.
    fn on_notice(&mut self, notice: Notice) {
        let _ = notice;
    }

    /// Called when the displayed message list is replaced wholesale
    /// (after a room is selected and its history fetched).
    fn on_messages_replaced(&mut self, messages: &[Message]) {
        let _ = messages;
    }
}
