// Pricing page: static catalog plus the simulated checkout that unlocks premium items.

pub mod catalog;
pub mod handlers;
pub mod payment;

pub use payment::{PaymentForm, PaymentProcessor, SimulatedProcessor};
