//! Core types: Tag, TagKey, and input validation

mod tag;
mod validate;

pub use tag::{Tag, TagKey};
pub use validate::{ValidationError, validate_string, validate_tag_list};
