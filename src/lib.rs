//! # Swiss Pairings
//!
//! A Swiss-system tournament pairing engine.
//!
//! Each round, every competitor is assigned one opponent of comparable
//! current standing who they have not faced before. The engine reads a
//! win-ordered standings snapshot and a match-history predicate from a
//! [`store::StandingsStore`], then runs a four-stage pipeline: group the
//! standings by win count, build a weighted graph of legal candidate
//! pairings, solve a maximum-weight matching over it (Edmonds blossom
//! algorithm), and resolve the matching into canonical pair records.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (players, snapshots, groups, pairings)
//! - **engine**: The pairing pipeline and its error taxonomy
//! - **store**: Standings store trait + in-memory implementation
//! - **config**: Configuration loading (tie-break seed, pairing policy)
//!
//! ## Example
//!
//! ```
//! use swiss_pairings::engine::PairingEngine;
//! use swiss_pairings::store::InMemoryStore;
//!
//! let mut store = InMemoryStore::new();
//! let tid = store.create_tournament("Chess Tournament");
//! for name in ["Twilight Sparkle", "Fluttershy", "Applejack", "Pinkie Pie"] {
//!     store.register_player(tid, name).unwrap();
//! }
//!
//! let engine = PairingEngine::default();
//! let pairings = engine.compute_pairings(&store, tid).unwrap();
//! assert_eq!(pairings.len(), 2);
//! ```

pub mod config;
pub mod engine;
pub mod models;
pub mod store;

pub use config::EngineConfig;
pub use engine::{PairingEngine, PairingError};
pub use models::*;
pub use store::{InMemoryStore, StandingsStore, StoreError};
