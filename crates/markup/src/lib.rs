//! Content tree model.
//!
//! Content to be truncated is held as a [`Fragment`]: an ordered list of
//! element, text and comment [`Node`]s. Fragments are parsed leniently from
//! inline markup, deep-cloned per truncation attempt, flattened into
//! [`TextLeaf`] ranges, and serialized deterministically for snapshots.

mod builder;
mod entities;
mod serialize;
mod tokenizer;
mod traverse;
mod types;

pub use crate::builder::{MAX_NESTING_DEPTH, build_fragment, parse_fragment};
pub use crate::entities::{decode_entities, escape_attr, escape_text};
pub use crate::serialize::{node_to_markup, outline, to_markup};
pub use crate::tokenizer::tokenize;
pub use crate::traverse::{TextLeaf, flatten};
pub use crate::types::{Attributes, Fragment, Node, Token};
