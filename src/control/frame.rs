use crate::foundation::core::YearIndex;

/// Current-year state machine over `[0, last]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameSelector {
    index: YearIndex,
    last: YearIndex,
}

impl FrameSelector {
    /// Selector positioned at index 0.
    pub fn new(last: YearIndex) -> Self {
        Self {
            index: YearIndex(0),
            last,
        }
    }

    /// Current index.
    pub fn index(&self) -> YearIndex {
        self.index
    }

    /// Highest valid index.
    pub fn last(&self) -> YearIndex {
        self.last
    }

    /// Advance one year, wrapping from the last index back to 0.
    pub fn step(&mut self) -> YearIndex {
        self.index = if self.index < self.last {
            YearIndex(self.index.0 + 1)
        } else {
            YearIndex(0)
        };
        self.index
    }

    /// Jump to `index`, clamped to `[0, last]`.
    pub fn seek(&mut self, index: YearIndex) -> YearIndex {
        self.index = index.min(self.last);
        self.index
    }

    /// Jump to a calendar year, clamped to the dataset's years.
    pub fn seek_year(&mut self, year: u32, first_year: u16) -> YearIndex {
        self.seek(YearIndex::from_calendar_year(year, first_year))
    }

    /// Calendar year of the current index.
    pub fn year(&self, first_year: u16) -> u32 {
        self.index.calendar_year(first_year)
    }

    /// Back to index 0.
    pub fn reset(&mut self) -> YearIndex {
        self.index = YearIndex(0);
        self.index
    }
}
