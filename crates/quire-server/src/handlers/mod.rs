//! HTTP request handlers.

pub(crate) mod docs;
pub(crate) mod health;
pub(crate) mod tokens;
