use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single income tax bracket.
///
/// Tax for a salary landing in this bracket is
/// `lump_sum + (salary - threshold) * rate_percent / 100` per year.
/// `upper` is `None` for the topmost bracket, which applies to every salary
/// above the last finite limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub lower: Decimal,
    pub upper: Option<Decimal>,
    pub rate_percent: Decimal,
    pub lump_sum: Decimal,
    pub threshold: Decimal,
}

impl TaxBracket {
    /// Whether `salary` falls inside this bracket's range.
    pub fn contains(&self, salary: Decimal) -> bool {
        salary >= self.lower
            && match self.upper {
                None => true,
                Some(upper) => salary <= upper,
            }
    }
}

/// Errors raised while validating a bracket table or looking up a salary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxTableError {
    /// The configuration contained no brackets at all.
    #[error("no tax brackets provided")]
    Empty,

    /// The first bracket must start at zero income.
    #[error("first bracket lower limit must be 0, got {0}")]
    FirstLowerNotZero(Decimal),

    /// A bounded bracket whose lower limit is not below its upper limit.
    #[error("bracket {index}: lower limit {lower} is not below upper limit {upper}")]
    InvertedBounds {
        index: usize,
        lower: Decimal,
        upper: Decimal,
    },

    /// A bracket whose lower limit does not clear the previous bracket's
    /// upper limit, so the two ranges would overlap or touch.
    #[error("bracket {index}: lower limit {lower} must exceed previous upper limit {prev_upper}")]
    OverlapsPrevious {
        index: usize,
        lower: Decimal,
        prev_upper: Decimal,
    },

    /// An unbounded bracket appeared before the end of the table.
    #[error("bracket {index} is unbounded but is not the last bracket")]
    UnboundedNotLast { index: usize },

    /// The table ends without an unbounded topmost bracket.
    #[error("last bracket must be unbounded")]
    MissingTopBracket,

    /// No bracket matched the salary. Unreachable for a validated table,
    /// but lookup still has to answer for the general case.
    #[error("no tax bracket matches salary {0}")]
    NoMatchingBracket(Decimal),
}

/// An ordered, validated set of tax brackets.
///
/// Built once at startup from configuration and immutable afterwards; it can
/// be shared freely across any number of processing runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracketTable {
    brackets: Vec<TaxBracket>,
}

impl TaxBracketTable {
    /// Validates `brackets` and wraps them in a table.
    ///
    /// The sequence must be sorted ascending by lower limit. Validation
    /// walks the sequence once, carrying the previous bracket's upper limit:
    ///
    /// - the table must be non-empty,
    /// - the first bracket must start at 0,
    /// - every bounded bracket needs `lower < upper`,
    /// - each lower limit must strictly exceed the previous upper limit,
    /// - exactly the last bracket is unbounded.
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, TaxTableError> {
        if brackets.is_empty() {
            return Err(TaxTableError::Empty);
        }

        let mut prev_upper: Option<Decimal> = None;
        for (index, bracket) in brackets.iter().enumerate() {
            if index == 0 {
                if bracket.lower != Decimal::ZERO {
                    return Err(TaxTableError::FirstLowerNotZero(bracket.lower));
                }
            } else {
                // A missing previous upper limit means the unbounded bracket
                // showed up before the end of the table.
                let prev_upper = prev_upper
                    .ok_or(TaxTableError::UnboundedNotLast { index: index - 1 })?;
                if bracket.lower <= prev_upper {
                    return Err(TaxTableError::OverlapsPrevious {
                        index,
                        lower: bracket.lower,
                        prev_upper,
                    });
                }
            }

            if let Some(upper) = bracket.upper {
                if bracket.lower >= upper {
                    return Err(TaxTableError::InvertedBounds {
                        index,
                        lower: bracket.lower,
                        upper,
                    });
                }
            }

            prev_upper = bracket.upper;
        }

        if prev_upper.is_some() {
            return Err(TaxTableError::MissingTopBracket);
        }

        Ok(Self { brackets })
    }

    /// Returns the bracket covering `salary`.
    ///
    /// Linear scan in which a later match replaces an earlier one. Validated
    /// tables have disjoint ranges, so at most one bracket can match; the
    /// last-match-wins scan order is still deliberate and load-bearing for
    /// tables built without validation.
    pub fn bracket_for(&self, salary: Decimal) -> Result<&TaxBracket, TaxTableError> {
        let mut found = None;
        for bracket in &self.brackets {
            if bracket.contains(salary) {
                found = Some(bracket);
            }
        }
        found.ok_or(TaxTableError::NoMatchingBracket(salary))
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }
}
