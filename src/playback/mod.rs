//! Play-head clock, narration reconciliation and transient notices.

pub(crate) mod audio;
pub(crate) mod clock;
pub(crate) mod notice;
