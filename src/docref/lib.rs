//! # Docref Architecture
//!
//! Docref is a **UI-agnostic document reference library**. This is not a CLI
//! application that happens to have some library code; it's a library that
//! happens to have a CLI client.
//!
//! The problem it solves: a JSON record holds a URI to a file somewhere (local
//! disk, memory, an archive), and that reference must stay consistent when the
//! file is opened, moved, copied, overwritten, or removed. The [`Document`]
//! accessor binds a record and a JSON Pointer together so every physical
//! operation keeps the stored reference in sync.
//!
//! [`Document`]: document::Document
//!
//! ## The Layered Architecture
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
//! │  - Holds the store, scheme registry, and hook registry      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure business logic                                      │
//! │  - Operates on Rust types, returns Rust types               │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                    │                      │
//!                    ▼                      ▼
//! ┌──────────────────────────┐  ┌───────────────────────────────┐
//! │  Storage Layer (store/)  │  │  Document Core                │
//! │  - RecordStore trait     │  │  - document.rs accessor       │
//! │  - FileStore (prod)      │  │  - pointer.rs / patch.rs      │
//! │  - InMemoryStore (tests) │  │  - vfs/ scheme → backend      │
//! └──────────────────────────┘  └───────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward (API, commands, storage, document core), code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<CmdResult>`)
//! - **Never** writes to stdout/stderr
//! - **Never** calls `std::process::exit`
//! - **Never** assumes a terminal environment
//!
//! This means the same core could serve a REST API, a sync daemon, or any
//! other UI.
//!
//! ## Testing Strategy
//!
//! 1. **Document core** (`document.rs`, `pointer.rs`, `vfs/`): thorough unit
//!    tests over `MemFs`, the shared in-memory backend. This is where the
//!    lion's share of testing lives.
//! 2. **Commands** (`commands/*.rs`): unit tests of each operation against
//!    `InMemoryStore`.
//! 3. **API** (`api.rs`): dispatch tests checking the right command gets the
//!    right arguments.
//! 4. **CLI** (`tests/`): end-to-end tests driving the compiled binary.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, the entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`document`]: The record + pointer accessor
//! - [`pointer`]: JSON Pointer resolution and mutation
//! - [`patch`]: JSON Patch operations returned by copy
//! - [`vfs`]: Scheme registry and file backends (os, memory, tar)
//! - [`store`]: Record storage abstraction and implementations
//! - [`model`]: Core data types (`Record`, `RecordMeta`)
//! - [`hooks`]: Before/after notification callbacks
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod hooks;
pub mod model;
pub mod patch;
pub mod pointer;
pub mod store;
pub mod vfs;
