//! Transient feedback messages.
//!
//! Only one toast is visible at a time. Each [`Toaster::show`] hands out a
//! [`ToastTicket`]; the timer that fires `toast_ms` later calls
//! [`Toaster::expire`] with it, which clears the toast only if no newer one
//! has replaced it in the meantime. A new toast therefore always gets its own
//! full window.

/// Default visibility window.
pub const TOAST_DURATION_MS: u64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

impl NoticeKind {
    /// CSS modifier class.
    pub fn class(&self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
            NoticeKind::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Error,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Info,
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == NoticeKind::Success
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastTicket(u64);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Toaster {
    current: Option<Notice>,
    generation: u64,
}

impl Toaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is showing with `notice`.
    pub fn show(&mut self, notice: Notice) -> ToastTicket {
        self.generation += 1;
        self.current = Some(notice);
        ToastTicket(self.generation)
    }

    /// Clear the toast if `ticket` still belongs to it. Returns whether
    /// anything was cleared.
    pub fn expire(&mut self, ticket: ToastTicket) -> bool {
        if ticket.0 == self.generation && self.current.is_some() {
            self.current = None;
            true
        } else {
            false
        }
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }
}
