//! Media module for kinds, resolved items and kind inference.

pub mod item;
pub mod parser;

pub use item::{MediaKind, ResolvedMedia};
pub use parser::{is_hypertext, kind_from_content_type, kind_from_link};
