//! `invtrack-app` — application state and session service.
//!
//! Wires the catalog, the count repository and the snapshot store into one
//! explicit state struct. There are no ambient globals: every operation takes
//! and returns state through [`Session`], and every successful mutation
//! rewrites the relevant snapshot slot before returning.

pub mod session;

pub use session::{AppError, AppView, Session};
