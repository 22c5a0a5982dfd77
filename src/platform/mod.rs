// MatrixMeta - platform/mod.rs
//
// Platform abstraction layer: file access and configuration.
// Dependencies: standard library, directories, toml, core types.
// Must NOT depend on: app.

pub mod config;
pub mod fs;
