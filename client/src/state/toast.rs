//! Toast notification queue.
//!
//! Toasts are pushed by stores and hooks through `notify` and rendered by
//! `components::toast_host`, which also schedules their expiry.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use super::StateCell;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    /// Auto-dismiss delay in milliseconds.
    pub fn duration_ms(self) -> u32 {
        match self {
            Self::Success | Self::Info => 4_000,
            Self::Error => 6_000,
            Self::Warning => 5_000,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "toast toast--success",
            Self::Error => "toast toast--error",
            Self::Warning => "toast toast--warning",
            Self::Info => "toast toast--info",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastState {
    pub items: Vec<Toast>,
    next_id: u64,
}

impl ToastState {
    pub fn push(&mut self, kind: ToastKind, title: &str, description: Option<&str>) -> u64 {
        self.next_id += 1;
        self.items.push(Toast {
            id: self.next_id,
            kind,
            title: title.to_owned(),
            description: description.filter(|d| !d.is_empty()).map(str::to_owned),
        });
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|toast| toast.id != id);
    }

    /// Toasts pushed after `after_id`, i.e. not yet scheduled for expiry.
    pub fn pending_since(&self, after_id: u64) -> Vec<Toast> {
        self.items.iter().filter(|toast| toast.id > after_id).cloned().collect()
    }

    pub fn last_id(&self) -> u64 {
        self.next_id
    }
}

pub fn notify<C: StateCell<ToastState>>(cell: &C, kind: ToastKind, title: &str, description: Option<&str>) {
    cell.update_state(|toasts| {
        toasts.push(kind, title, description);
    });
}
