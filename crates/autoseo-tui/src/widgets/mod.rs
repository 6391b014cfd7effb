//! Small reusable rendering helpers.

pub mod status_badge;
pub mod time_fmt;
