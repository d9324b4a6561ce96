use crate::model::{CalendarDate, DayCell, Schedule, WeekStart};
use chrono::{Datelike, Duration, NaiveDate};

pub const WEEK_LEN: usize = 7;

/// Builds the empty grid for the month containing `reference`: leading days
/// of the previous month up to the week start, every day of the month, and
/// trailing days of the next month so each row has seven cells.
pub fn build_schedule(reference: NaiveDate, week_start: WeekStart) -> Schedule {
    let first = month_start(reference);
    let last = month_end(reference);

    let lead = leading_days(first, week_start);
    let mut days: Vec<DayCell> = (1..=lead)
        .rev()
        .map(|back| DayCell::new(CalendarDate::new(first - Duration::days(back)), false))
        .collect();
    days.extend(
        first
            .iter_days()
            .take_while(|d| *d <= last)
            .map(|d| DayCell::new(CalendarDate::new(d), true)),
    );

    let mut weeks = split_into_groups(days, WEEK_LEN);
    pad_last_group(&mut weeks, WEEK_LEN, |prev: &DayCell| {
        let next = prev.date.naive() + Duration::days(1);
        DayCell::new(CalendarDate::new(next), false)
    });

    log::debug!(
        "built {} week grid for {}",
        weeks.len(),
        first.format("%B %Y")
    );
    Schedule {
        year: first.year(),
        month: first.month(),
        weeks,
    }
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn month_end(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

/// Moves `date` by whole months, keeping the day where the target month
/// allows it.
pub fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let total = date.year() * 12 + date.month0() as i32 + months;
    let (year, month) = (total.div_euclid(12), total.rem_euclid(12) as u32 + 1);
    let first = match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(d) => d,
        None => return date,
    };
    let day = date.day().min(month_end(first).day());
    first.with_day(day).unwrap_or(first)
}

/// Header labels in column order.
pub fn weekday_labels(week_start: WeekStart) -> [&'static str; WEEK_LEN] {
    match week_start {
        WeekStart::Monday => ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
        WeekStart::Sunday => ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
    }
}

fn leading_days(first: NaiveDate, week_start: WeekStart) -> i64 {
    let offset = match week_start {
        WeekStart::Monday => first.weekday().num_days_from_monday(),
        WeekStart::Sunday => first.weekday().num_days_from_sunday(),
    };
    offset as i64
}

pub fn split_into_groups<T>(items: Vec<T>, size: usize) -> Vec<Vec<T>> {
    let mut groups = Vec::new();
    let mut current = Vec::with_capacity(size);
    for item in items {
        current.push(item);
        if current.len() == size {
            groups.push(std::mem::replace(&mut current, Vec::with_capacity(size)));
        }
    }
    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

/// Extends the final group to `size` entries, deriving each new entry from
/// the one before it.
pub fn pad_last_group<T, F>(groups: &mut [Vec<T>], size: usize, mut next: F)
where
    F: FnMut(&T) -> T,
{
    if let Some(last) = groups.last_mut() {
        while last.len() < size {
            let filler = match last.last() {
                Some(prev) => next(prev),
                None => break,
            };
            last.push(filler);
        }
    }
}
