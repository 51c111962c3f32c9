//! Content-aware ellipsis truncation.
//!
//! Given a container ([`Surface`]) and some content, find the longest prefix
//! of the content's text that fits the container's box, cut a copy of the
//! content tree there (never inside a character, optionally only at word
//! boundaries), append an indicator and render it. The search is a binary
//! search over real renders, so a pass costs O(log N) layouts.
//!
//! [`Ellipsis`] keeps one container truncated across resizes and content
//! changes without re-triggering itself.

mod content;
mod coordinator;
mod error;
mod events;
mod options;
pub mod overflow;
mod resize;
pub mod search;
mod state;
pub mod truncator;

pub use content::{Content, TemplateFn};
pub use coordinator::{Ellipsis, PassReport, Phase, Trigger, TriggerQueue};
pub use error::{OptionsError, UnknownStrategy};
pub use events::{Emitter, Subscription};
pub use layout::Surface;
pub use options::EllipsisOptions;
pub use overflow::is_overflowing;
pub use resize::{ResizeDetector, ResizeStrategy, SharedResizeDetector};
pub use search::find_max_fitting_length;
pub use state::{DEFAULT_INDICATOR, Indicator, MORE_CLASS, TruncationState, WordBoundaries};
pub use tools::Substring;
pub use truncator::{Cut, append_indicator, truncate_at, truncated_copy};
