//! Fundamental types for the Catamount consensus engine.
//!
//! This crate defines the value vocabulary shared by the proof-of-work
//! engine and its callers: the 256-bit work [`Target`], its packed 32-bit
//! [`CompactTarget`] encoding, block hashes and samples, network identity,
//! and per-network [`ConsensusParams`].

pub mod block;
pub mod compact;
pub mod error;
pub mod network;
pub mod params;
pub mod target;

pub use block::{BlockHash, BlockSample};
pub use compact::{CompactTarget, DecodedTarget};
pub use error::MalformedCompact;
pub use network::NetworkId;
pub use params::ConsensusParams;
pub use target::Target;
