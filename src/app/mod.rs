// MatrixMeta - app/mod.rs
//
// Application layer: orchestrates core selection logic with platform file I/O.

pub mod extract;
