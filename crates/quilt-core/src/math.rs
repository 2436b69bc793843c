//! Math types, re-exported from [`glam`].
//!
//! Pointer coordinates (page, client, screen) and drag offsets are carried as [`Vec2`].
//!
//! [`glam`]: https://docs.rs/glam

pub use glam::{Vec2, vec2};
