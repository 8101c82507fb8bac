//! Shared Kernel - vocabulary shared by every feature crate
//!
//! Only things whose meaning is identical across auth and habits live here:
//! - Unified error type ([`error::app_error::AppError`]) and its HTTP classification
//! - Typed entity identifiers ([`id`])
//! - The clock abstraction used for session expiry and calendar-day logic ([`clock`])

pub mod clock;
pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
