//! Rule tables turning a single label/answer pair into a weighted severity.
//!
//! Every table is an ordered list scanned first-match-wins and built once per
//! process.

mod headers;
mod lexicon;
mod weights;

pub use headers::should_skip_header;
pub use lexicon::normalize_answer;
pub use weights::{resolve_weight, QuestionCategory, QuestionWeight, BASE_WEIGHT};
