// MatrixMeta - core/mod.rs
//
// Core business logic layer.
// Dependencies: standard library and serde only.
// Must NOT depend on: platform, app, or any file I/O.

pub mod filter;
pub mod markers;
pub mod model;
