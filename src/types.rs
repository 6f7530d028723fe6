use crate::consts::MAX_RANGE_DAYS;
use crate::error::RangeError;

use time::Date;
use tracing::warn;

/// Inclusive range of days one statistics fetch covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    from: Date,
    to: Date,
}

impl DateRange {
    pub fn new(from: Date, to: Date) -> Result<Self, RangeError> {
        if from > to {
            return Err(RangeError { from, to });
        }
        let days = (to - from).whole_days();
        if days > MAX_RANGE_DAYS {
            // The API enforces its own limit; let it answer.
            warn!(%from, %to, days, "date range is longer than the API supports");
        }
        Ok(Self { from, to })
    }

    pub fn from(&self) -> Date {
        self.from
    }

    pub fn to(&self) -> Date {
        self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn rejects_inverted_range() {
        let err = DateRange::new(date!(2021 - 04 - 16), date!(2021 - 04 - 11)).unwrap_err();
        assert_eq!(err.from, date!(2021 - 04 - 16));
    }

    #[test]
    fn single_day_range_is_valid() {
        let range = DateRange::new(date!(2021 - 04 - 11), date!(2021 - 04 - 11)).unwrap();
        assert_eq!(range.from(), range.to());
    }

    #[test]
    fn long_range_is_kept() {
        let range = DateRange::new(date!(2021 - 04 - 01), date!(2021 - 04 - 30)).unwrap();
        assert_eq!(range.to(), date!(2021 - 04 - 30));
    }
}
