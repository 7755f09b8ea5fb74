//! HTTP middleware layers.

pub(crate) mod cors;
pub(crate) mod recover;
pub(crate) mod security;
