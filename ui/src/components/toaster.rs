use dioxus::prelude::*;

use crate::hooks::use_toaster::use_toaster;

/// Stack of transient notices in the top-right corner. Click one to dismiss it.
#[component]
pub fn ToastStack() -> Element {
    let mut toaster = use_toaster();
    let toasts = toaster.toasts().read().clone();

    rsx! {
        div {
            class: "toaster",
            for toast in toasts {
                div {
                    key: "{toast.id}",
                    class: if toast.notice.is_success() { "toast toast-success" } else { "toast toast-error" },
                    role: if toast.notice.is_error() { "alert" } else { "status" },
                    onclick: move |_| toaster.dismiss(toast.id),
                    "{toast.notice.message()}"
                }
            }
        }
    }
}
