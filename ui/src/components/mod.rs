//! Shared components. The pico module wraps Pico.css primitives; the rest are
//! the admin panel's own building blocks.
pub mod empty_state;
pub mod pico;
pub mod report_card;
pub mod report_list;
pub mod toaster;
pub mod wallet_bar;
