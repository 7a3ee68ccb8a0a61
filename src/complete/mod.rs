//! Completion candidates, ranking and matching.
//!
//! Arguments produce [`CompletionList`]s by running their candidates
//! through a [`Matcher`]: [`PrefixMatcher`] by default, or
//! [`SubstringMatcher`] for substring-decorated arguments. Enumeration is
//! bounded by a deadline and a cut-off list is marked `truncated`.

mod matcher;
mod response;
mod substring;

pub(crate) use matcher::{deadline_from_now, match_candidates};
pub use matcher::{collect, Matcher, PrefixMatcher};
pub use response::{Completion, CompletionList};
pub use substring::{prefer_shortest, SubstringMatcher};
