use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Number of weeks offered for date selection.
pub const WEEKS_SHOWN: usize = 2;

/// Builds the two-week date grid from which a consultation day is picked.
#[derive(Debug, Clone, Copy)]
pub struct CalendarNavigator {
    week_start: Weekday,
}

impl Default for CalendarNavigator {
    fn default() -> Self {
        Self::new(Weekday::Mon)
    }
}

impl CalendarNavigator {
    pub fn new(week_start: Weekday) -> Self {
        Self { week_start }
    }

    /// Most recent week-start day on or before `date`.
    pub fn start_of_week(&self, date: NaiveDate) -> NaiveDate {
        let offset = (7 + date.weekday().num_days_from_monday()
            - self.week_start.num_days_from_monday())
            % 7;
        date - Duration::days(i64::from(offset))
    }

    /// Two contiguous weeks of dates, one row per week.
    pub fn weeks_from(&self, base: NaiveDate) -> Vec<Vec<NaiveDate>> {
        let first = self.start_of_week(base);
        (0..WEEKS_SHOWN)
            .map(|week| {
                (0..7)
                    .map(|day| first + Duration::days((week * 7 + day) as i64))
                    .collect()
            })
            .collect()
    }

    /// Past dates are shown in the grid but cannot be picked.
    pub fn is_selectable(&self, date: NaiveDate, today: NaiveDate) -> bool {
        date >= today
    }

    pub fn grid(&self, base: NaiveDate, today: NaiveDate) -> CalendarResponse {
        let weeks = self
            .weeks_from(base)
            .into_iter()
            .map(|week| {
                week.into_iter()
                    .map(|date| CalendarDay {
                        date,
                        weekday: date.weekday(),
                        selectable: self.is_selectable(date, today),
                    })
                    .collect()
            })
            .collect();

        CalendarResponse {
            week_start: self.week_start,
            weeks,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub selectable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarResponse {
    pub week_start: Weekday,
    pub weeks: Vec<Vec<CalendarDay>>,
}
