/// Account entity: identity, owner, balance and frozen flag, with the
/// non-negative balance invariant enforced on the entity itself.
pub mod account;

/// Immutable transaction records forming the append-only audit log.
pub mod transaction;

/// Store traits the service depends on, plus in-memory implementations.
/// Swapping in a durable backend only requires implementing these traits.
pub mod store;

/// The account service. Sole authority for balance mutation; coordinates
/// the two stores and enforces every operation precondition.
pub mod service;

/// Ideally, this module should exist in its own crate, as a way to
/// bootstrap the core logic. However, I want to use it for integration
/// tests so I put it here.
pub mod bin_utils;
