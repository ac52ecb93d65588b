//! # Rallylog Architecture
//!
//! Rallylog is a **UI-agnostic practice-log library**. This is not a CLI
//! application that happens to have some library code—it's a library that
//! happens to have a CLI client.
//!
//! It keeps two tightly-coupled pieces of state for a padel training app:
//! the local **clip vault** (recorded practice videos plus a persisted
//! index) and the **progress analytics** built from per-user, per-shot
//! score history.
//!
//! ## The Layer Stack
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs + args.rs)                              │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Wires the opportunistic sweep and history persistence    │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure business logic                                      │
//! │  - Operates on Rust types, returns Rust types               │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage & Analytics (store/, analytics.rs)                 │
//! │  - Abstract MediaStore trait                                │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! │  - Append-only score history with streaming aggregates      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Consistency Model
//!
//! The vault index is the source of truth for what is stored, and every
//! entry must point at a live payload. Operations are ordered so the two
//! reachable crash states are "save never happened" and "payload orphaned,
//! index clean"; an index entry for a missing or partial file is the one
//! state the design rules out. Listing reconciles on the fly and
//! `doctor` repairs in both directions.
//!
//! All mutation is single-process, single-writer: `&mut self` receivers
//! serialize save/delete/sweep against each other, so there is no lock.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward (API, commands, storage, analytics), code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<CmdResult>`)
//! - **Never** writes to stdout/stderr
//! - **Never** calls `std::process::exit`
//! - **Never** assumes a terminal environment
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade—entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`store`]: Vault abstraction, persisted index, and implementations
//! - [`analytics`]: Score history, aggregates, and trend classification
//! - [`compare`]: Record-time comparison verdicts
//! - [`retention`]: Age-based sweep policy
//! - [`model`]: Core data types (`MediaFile`, `ScoreRecord`, `ShotType`)
//! - [`config`]: Vault configuration
//! - [`error`]: Error types

pub mod analytics;
pub mod api;
pub mod commands;
pub mod compare;
pub mod config;
pub mod error;
pub mod model;
pub mod retention;
pub mod store;
