use chrono::{NaiveDate, NaiveDateTime};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pattern used to decide whether two dates are the same day.
pub const DAY_LABEL_FORMAT: &str = "%B %Y %d %A";

const DROP_ZONE_FORMAT: &str = "%a %b %d %Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn new(date: NaiveDate) -> Self {
        CalendarDate(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(CalendarDate)
    }

    /// The calendar day an instant falls on.
    pub fn of(instant: NaiveDateTime) -> Self {
        CalendarDate(instant.date())
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    pub fn label(&self) -> String {
        self.0.format(DAY_LABEL_FORMAT).to_string()
    }

    pub fn same_day(&self, other: &CalendarDate) -> bool {
        self.label() == other.label()
    }

    pub fn drop_zone_id(&self) -> String {
        format!("events{}", self.0.format(DROP_ZONE_FORMAT))
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub time: String,
    pub title: String,
}

impl Task {
    pub fn new(time: impl Into<String>, title: impl Into<String>) -> Self {
        Task {
            time: time.into(),
            title: title.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: CalendarDate,
    pub tasks: Vec<Task>,
    pub drop_zone_id: String,
    /// False for padding days borrowed from the neighbouring months.
    pub in_month: bool,
}

impl DayCell {
    pub fn new(date: CalendarDate, in_month: bool) -> Self {
        DayCell {
            drop_zone_id: date.drop_zone_id(),
            date,
            tasks: Vec::new(),
            in_month,
        }
    }
}

pub type Week = Vec<DayCell>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Week>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZoneRef {
    pub zone_id: String,
    pub index: usize,
}

impl ZoneRef {
    pub fn new(zone_id: impl Into<String>, index: usize) -> Self {
        ZoneRef {
            zone_id: zone_id.into(),
            index,
        }
    }
}

/// Outcome of a finished drag gesture. No destination means the task was
/// released outside every drop zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragResult {
    pub source: ZoneRef,
    pub destination: Option<ZoneRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("this month does not contain {0}")]
    DateNotInDisplayedMonth(String),
    #[error("drag ended outside any drop zone")]
    DropOutsideValidZone,
    #[error("drop zone not found: {0}")]
    ZoneNotFound(String),
    #[error("no task {index} in {zone} ({len} tasks)")]
    TaskIndexOutOfRange {
        zone: String,
        index: usize,
        len: usize,
    },
}

impl Schedule {
    pub fn cells(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flat_map(|week| week.iter())
    }

    /// (week, day) of the first cell labelled like `date`.
    pub fn find_cell(&self, date: &CalendarDate) -> Option<(usize, usize)> {
        self.weeks.iter().enumerate().find_map(|(w, week)| {
            week.iter()
                .position(|cell| cell.date.same_day(date))
                .map(|d| (w, d))
        })
    }

    pub fn find_zone(&self, zone_id: &str) -> Option<(usize, usize)> {
        self.weeks.iter().enumerate().find_map(|(w, week)| {
            week.iter()
                .position(|cell| cell.drop_zone_id == zone_id)
                .map(|d| (w, d))
        })
    }

    pub fn contains(&self, date: &CalendarDate) -> bool {
        self.find_cell(date).is_some()
    }

    pub fn cell(&self, date: &CalendarDate) -> Option<&DayCell> {
        self.find_cell(date).map(|(w, d)| &self.weeks[w][d])
    }

    pub fn task_count(&self) -> usize {
        self.cells().map(|cell| cell.tasks.len()).sum()
    }

    pub fn try_add_task(
        &mut self,
        date: &CalendarDate,
        title: &str,
        time: &str,
    ) -> Result<(usize, usize), ScheduleError> {
        let (w, d) = self
            .find_cell(date)
            .ok_or_else(|| ScheduleError::DateNotInDisplayedMonth(date.label()))?;
        self.weeks[w][d].tasks.push(Task::new(time, title));
        Ok((w, d))
    }

    /// Removes the task at `source.index` and inserts it at `dest.index`,
    /// counted after the removal. Nothing is touched unless both zones and
    /// the source task exist.
    pub fn try_move_task(&mut self, source: &ZoneRef, dest: &ZoneRef) -> Result<(), ScheduleError> {
        let (sw, sd) = self
            .find_zone(&source.zone_id)
            .ok_or_else(|| ScheduleError::ZoneNotFound(source.zone_id.clone()))?;
        let (dw, dd) = self
            .find_zone(&dest.zone_id)
            .ok_or_else(|| ScheduleError::ZoneNotFound(dest.zone_id.clone()))?;
        let len = self.weeks[sw][sd].tasks.len();
        if source.index >= len {
            return Err(ScheduleError::TaskIndexOutOfRange {
                zone: source.zone_id.clone(),
                index: source.index,
                len,
            });
        }
        let task = self.weeks[sw][sd].tasks.remove(source.index);
        let target = &mut self.weeks[dw][dd].tasks;
        let at = dest.index.min(target.len());
        target.insert(at, task);
        Ok(())
    }
}
