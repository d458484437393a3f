//! Plain-text level persistence for Ledge.
//!
//! A level file is a sequence of lines. Lines that begin with the
//! [`TAG`] each describe one living entity; every other line is ignored.
//!
//! # Format
//!
//! ```text
//! Entity: type=<u16> posx=<f32> posy=<f32> radiusx=<f32> radiusy=<f32> move_speed=<f32> facing=<i32>\n
//! ```
//!
//! Fields are positional: each `label=value` token must appear in exactly
//! this order. Floats are written in Rust's shortest round-trip form, so
//! decoding an encoded record reproduces it bit for bit. `type` and
//! `facing` use the raw values of [`EntityKind`](ledge_core::EntityKind)
//! and [`Facing`](ledge_core::Facing).
//!
//! Any deviation inside a tagged line is a hard [`PersistError`]; the
//! decoder never yields a partially parsed entity.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod error;
pub mod types;

pub use codec::{decode_bytes, decode_entities, encode_entities, encode_record};
pub use error::PersistError;
pub use types::EntityRecord;

/// Literal prefix of every entity line.
pub const TAG: &str = "Entity:";

/// Field labels in the order they must appear.
pub const FIELD_LABELS: [&str; 7] = [
    "type",
    "posx",
    "posy",
    "radiusx",
    "radiusy",
    "move_speed",
    "facing",
];
