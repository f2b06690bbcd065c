//! Outbound adapters implementing domain ports.
//!
//! - **upstream**: reqwest-backed admin providers
//! - **token**: HS256 JWT signing and verification
//!
//! Adapters translate between domain types and wire formats. They contain
//! no business logic.

pub mod token;
pub mod upstream;
