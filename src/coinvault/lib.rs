//! # Coinvault Architecture
//!
//! Coinvault is a **UI-agnostic coin catalogue library**. The `coinvault` binary is one
//! client of it; nothing below the CLI knows that a terminal exists.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (args.rs + main.rs)                              │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (key=value text → typed FieldValues)   │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One function per user-facing operation                   │
//! │  - Operates on Rust types, returns CmdResult                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - CoinStore: the collection, identifiers, queries, stats   │
//! │  - CollectionBackend trait                                  │
//! │  - FileBackend (production), MemBackend (testing)           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identifiers
//!
//! Every coin gets a code of the form `PPP-YYYY-NNNNNN` when it is added: a country
//! prefix, the mint year and a per-(prefix, year) sequence. Codes never change and are
//! never reused while the coin that holds them exists. See [`code`].
//!
//! ## Persistence
//!
//! The whole collection lives in one pretty-printed JSON array. Every mutation rewrites
//! the file in full before returning, so what is on disk always matches the last
//! successful operation.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per operation
//! - [`store`]: The coin store and its backends
//! - [`model`]: Core data types (`Coin`, `Field`, `FieldValue`)
//! - [`code`]: Identifier generation
//! - [`query`]: Search criteria
//! - [`stats`]: Counts and distributions
//! - [`config`]: Vault configuration
//! - [`images`]: Copying coin images into the vault
//! - [`error`]: Error types

pub mod api;
pub mod code;
pub mod commands;
pub mod config;
pub mod error;
pub mod images;
pub mod model;
pub mod query;
pub mod stats;
pub mod store;
