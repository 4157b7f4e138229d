//! Data-driven battle content and loaders.
//!
//! This crate reads static battle content from RON/TOML files:
//! - Enemy, skill, spell and status definitions (RON)
//! - The player party (RON)
//! - Battle configuration (TOML)
//!
//! Content feeds the engine's oracles through
//! [`MasterDataSnapshot`](battle_core::MasterDataSnapshot) and never appears in
//! battle state. All loaders use battle-core types directly with serde.

pub mod loaders;

pub use loaders::{ConfigLoader, ContentFactory, MasterDataLoader, PartyLoader, PartyMemberSpec};
