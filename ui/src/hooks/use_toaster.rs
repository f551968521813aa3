use std::time::Duration;

use api::panel::Notice;
use dioxus::prelude::*;

/// How long a toast stays up unless clicked away.
const TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Clone, PartialEq, Debug)]
pub struct Toast {
    pub id: u64,
    pub notice: Notice,
}

#[derive(Clone, Copy)]
pub struct Toaster {
    toasts: Signal<Vec<Toast>>,
    next_id: Signal<u64>,
}

impl Toaster {
    pub fn new(toasts: Signal<Vec<Toast>>, next_id: Signal<u64>) -> Self {
        Self { toasts, next_id }
    }

    /// Shows `notice` and schedules its removal.
    pub fn notify(&mut self, notice: Notice) {
        match &notice {
            Notice::Success(m) => dioxus_logger::tracing::info!("toast: {}", m),
            Notice::Error(m) => dioxus_logger::tracing::warn!("toast: {}", m),
        }

        let id = *self.next_id.peek();
        self.next_id.set(id + 1);
        self.toasts.write().push(Toast { id, notice });

        let mut toaster = *self;
        spawn(async move {
            api::timer::sleep(TOAST_DURATION).await;
            toaster.dismiss(id);
        });
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.write().retain(|t| t.id != id);
    }

    /// Returns the signal of visible toasts, oldest first.
    pub fn toasts(&self) -> Signal<Vec<Toast>> {
        self.toasts
    }
}

pub fn use_toaster() -> Toaster {
    use_context::<Toaster>()
}
