//! This crate contains everything the admin panel does that is not rendering:
//! the report model and backend client, ether amounts, the reports contract
//! binding, the wallet session, and the panel's user actions.

pub mod config;
pub mod contract;
pub mod ether_amount;
pub mod panel;
pub mod report;
pub mod session;
pub mod timer;
pub mod wallet;

pub type ApiError = anyhow::Error;
