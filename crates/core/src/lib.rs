//! Core library for gamesmith
//!
//! This crate implements the **Functional Core** of the gamesmith backend,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! - **`gamesmith_core`** (this crate): Pure transformation functions with zero I/O
//! - **`gamesmith`**: I/O operations and orchestration (the Imperative Shell)
//!
//! All functions in this crate are deterministic, perform no I/O, and can be
//! tested with simple fixture data, no mocking required.
//!
//! # Module Organization
//!
//! - [`generate`]: Prompt composition and completion-text normalization for
//!   the code generation pipeline
//! - [`assets`]: Naming, mime inference, and record shaping for uploaded
//!   game assets

pub mod assets;
pub mod generate;
