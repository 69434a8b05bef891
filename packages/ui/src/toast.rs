//! The single toast slot shared by every page.

use api::toast::{ToastTicket, Toaster};
use api::Notice;
use dioxus::core::Task;
use dioxus::prelude::*;

use crate::timer::sleep_ms;

/// Handle for showing toasts. Copy it into event handlers freely.
#[derive(Clone, Copy, PartialEq)]
pub struct Toasts {
    toaster: Signal<Toaster>,
    pending: Signal<Option<ToastTicket>>,
}

impl Toasts {
    /// Show `notice`, replacing the current toast and restarting the timer.
    pub fn show(&mut self, notice: Notice) {
        let ticket = self.toaster.write().show(notice);
        self.pending.set(Some(ticket));
    }

    pub fn dismiss(&mut self) {
        self.toaster.write().dismiss();
        self.pending.set(None);
    }
}

pub fn use_toasts() -> Toasts {
    use_context::<Toasts>()
}

/// Owns the toast state and renders the current toast. The clear timer
/// runs here so it outlives the page that raised the toast.
#[component]
pub fn ToastHost(duration_ms: u64, children: Element) -> Element {
    let toaster = use_signal(Toaster::new);
    let pending = use_signal(|| None::<ToastTicket>);
    let mut toasts = use_context_provider(|| Toasts { toaster, pending });
    let mut timer = use_signal(|| None::<Task>);

    use_effect(move || {
        let Some(ticket) = pending() else {
            return;
        };
        if let Some(previous) = timer.write().take() {
            previous.cancel();
        }
        let mut toaster = toaster;
        let task = spawn(async move {
            sleep_ms(duration_ms).await;
            toaster.write().expire(ticket);
        });
        timer.set(Some(task));
    });

    let current = toaster.read().current().cloned();

    rsx! {
        {children}
        if let Some(notice) = current {
            div {
                class: "toast show {notice.kind.class()}",
                role: "status",
                onclick: move |_| toasts.dismiss(),
                "{notice.message}"
            }
        }
    }
}
