//! Difficulty retargeting and proof-of-work validation.
//!
//! The consensus-critical core of the chain: given the chain up to some
//! tip, compute the compact work threshold the next block's hash must
//! satisfy, and check a candidate hash against its claimed threshold.
//! Eight mutually incompatible retargeting algorithms sit behind a height-
//! and network-keyed dispatch table; every node must compute byte-identical
//! results or the network forks.
//!
//! Everything here is a pure function over a read-only [`chain::ChainView`]
//! snapshot and an explicit [`catamount_types::ConsensusParams`] value —
//! no global state, no I/O, safe to call from any number of threads.

pub mod chain;
pub mod digishield;
pub mod ensemble;
pub mod gravity;
pub mod interval;
pub mod lwma;
pub mod peercoin;
pub mod pid;
pub mod selector;
pub mod validator;

pub use chain::{walk_back, ChainView, MemoryChain, WalkBack};
pub use selector::{next_required_target, select_algorithm, AlgorithmId};
pub use validator::check_proof_of_work;
