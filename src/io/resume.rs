//! Resume prefixes: a known partial assignment replayed before searching

use crate::algorithm::{bitset::BoxSet, propagation::place, state::SearchState};
use crate::io::error::{Result, SearchError};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Boxes of the integers `1..=len`, given in order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResumePrefix {
    boxes: Vec<usize>,
}

impl ResumePrefix {
    /// Wrap an explicit box sequence; entry `i` is the box of `i + 1`
    pub const fn new(boxes: Vec<usize>) -> Self {
        Self { boxes }
    }

    /// Parse the operator text form, box indices separated by commas or whitespace
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MalformedPrefix`] for a token that is not a
    /// non-negative integer
    pub fn parse(text: &str) -> Result<Self> {
        text.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .enumerate()
            .map(|(position, token)| {
                token
                    .parse::<usize>()
                    .ok()
                    .ok_or_else(|| SearchError::MalformedPrefix {
                        position,
                        token: token.to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()
            .map(Self::new)
    }

    /// Box of each integer of the prefix
    pub fn boxes(&self) -> &[usize] {
        &self.boxes
    }

    /// Number of integers the prefix places
    pub const fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Whether the prefix places nothing
    pub const fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Apply the prefix to `state` with full propagation
    ///
    /// Boxes must be opened in increasing index order, the same order the
    /// search itself uses. Lower boxes are withdrawn from each replayed value
    /// as the search loop withdraws them, so resumed and searched states agree.
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending integer when the prefix is
    /// longer than the domain, names a box out of range, opens a box out of
    /// order, or places an integer into a box that cannot take it
    pub fn replay(&self, state: &SearchState) -> Result<SearchState> {
        if self.len() > state.domain_bound() {
            return Err(SearchError::PrefixTooLong {
                length: self.len(),
                domain_bound: state.domain_bound(),
            });
        }

        let mut next = state.clone();
        for (offset, &box_index) in self.boxes.iter().enumerate() {
            let value = offset + 1;

            if box_index >= next.box_count() {
                return Err(SearchError::BoxOutOfRange {
                    value,
                    box_index,
                    box_count: next.box_count(),
                });
            }

            if !next.is_occupied(box_index) {
                let expected = next.occupied().first_absent(next.box_count());
                if expected != Some(box_index) {
                    return Err(SearchError::BoxOutOfOrder {
                        value,
                        box_index,
                        expected: expected.unwrap_or(next.box_count()),
                    });
                }
            }

            if !next.eligible(value).contains(box_index) {
                return Err(SearchError::IneligiblePlacement { value, box_index });
            }

            // The search has already tried every lower box for this value
            next.exclude_all(value, BoxSet::all(box_index));
            place(&mut next, value, box_index);
        }

        debug!(length = self.len(), prefix = %self, "Replayed resume prefix");
        Ok(next)
    }
}

impl FromStr for ResumePrefix {
    type Err = SearchError;

    fn from_str(text: &str) -> Result<Self> {
        Self::parse(text)
    }
}

impl fmt::Display for ResumePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.boxes.iter().map(ToString::to_string).collect();
        write!(f, "{}", rendered.join(","))
    }
}
