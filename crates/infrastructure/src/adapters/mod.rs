//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod transport_nsw_adapter;

pub use transport_nsw_adapter::TransportNswAdapter;
