//! Ops Commander desk — core library.
//!
//! A single-session IT incident desk: mock tickets are generated into
//! an in-memory table, auto-assigned to on-shift personnel from a
//! loosely-structured roster via a cascading shift resolver, and
//! annotated with advisory resolution text (external service optional,
//! deterministic offline templates always available).
//!
//! All state lives in a [`session::DeskSession`] for the duration of a
//! session; there is no persistence, no background thread, and no
//! cross-session sharing. Callers drive everything through synchronous
//! operations and a polled timer.

pub mod advisor;
pub mod auth;
pub mod clock;
pub mod error;
pub mod event;
pub mod export;
pub mod incident;
pub mod resolver;
pub mod rng;
pub mod roster;
pub mod session;
pub mod shift;
pub mod types;
