use chrono::{Days, NaiveDate};

/// Day 0 of the garden unless configured otherwise.
pub const DEFAULT_START_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2024, 2, 14) {
    Some(d) => d,
    None => NaiveDate::MIN,
};

/// Number of days planted by `today`, counting the start date itself.
///
/// Zero or negative before the garden starts; pass the result straight to
/// [`crate::generate_garden`].
pub fn days_elapsed(start: NaiveDate, today: NaiveDate) -> i64 {
    (today - start).num_days() + 1
}

/// Calendar date of day `id`.
pub fn date_for_day(start: NaiveDate, id: u64) -> NaiveDate {
    start.checked_add_days(Days::new(id)).unwrap_or(NaiveDate::MAX)
}

/// Today's date in the local timezone.
pub fn today_local() -> NaiveDate {
    chrono::Local::now().date_naive()
}
