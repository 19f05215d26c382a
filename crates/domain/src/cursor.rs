use std::fmt;

/// High-water mark: the last row number known to be fully delivered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor(u64);

impl Cursor {
    pub const ZERO: Cursor = Cursor(0);

    pub fn new(row_number: u64) -> Self {
        Self(row_number)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Parse the persisted text form. Anything that is not a decimal
    /// non-negative integer yields `None`.
    pub fn parse(text: &str) -> Option<Self> {
        text.trim().parse::<u64>().ok().map(Self)
    }

    /// Whether `row_number` lies beyond the mark.
    pub fn is_behind(&self, row_number: u64) -> bool {
        row_number > self.0
    }
}

impl From<u64> for Cursor {
    fn from(row_number: u64) -> Self {
        Self(row_number)
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
