//! Timed presentation effects: boot log, typing banner, scroll reveals.
pub mod boot;
pub mod reveal;
pub mod scheduler;
pub mod typing;
