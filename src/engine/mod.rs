//! Pure presentation core plus the two outbound HTTP calls.

pub mod composer;
pub mod identity;
pub mod loader;
pub mod prefill;
pub mod renderer;
