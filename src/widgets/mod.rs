//! What a placed widget shows: field kinds, the palette catalog, and the
//! resolver that turns a snapshot into display text.

pub mod catalog;
pub mod field;
pub mod resolver;

pub use field::{Category, FieldKind, Formatter};
pub use resolver::{preview, resolve};
