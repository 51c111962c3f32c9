mod breaker;
mod engine;
mod options;
mod tokens;
mod types;

pub use engine::layout_fragment;
pub use options::InlineLayoutOptions;
pub use types::{InlineContext, LineBox, LineFragment};
