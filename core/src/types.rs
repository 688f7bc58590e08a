//! Shared primitive types used across the desk.

/// A ticket identifier, e.g. "INC48213".
pub type TicketId = String;

/// A named assignment group ("Network", "Storage", ...).
pub type GroupName = String;

/// The canonical session identifier.
pub type SessionId = String;
