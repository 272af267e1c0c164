//! Protobuf definitions for PRS and HSS types.

/// Protobuf for the PRS encryption scheme and the HSS protocol.
pub mod prs;
