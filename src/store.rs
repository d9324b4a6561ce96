use crate::grid::build_schedule;
use crate::model::{CalendarDate, DragResult, Schedule, ScheduleError, WeekStart};
use chrono::{Datelike, NaiveDate};
use std::rc::Rc;

/// Copy of `schedule` with a task appended to the cell for `date`. When the
/// date is not part of the grid the copy comes back unchanged.
pub fn add_task(schedule: &Schedule, date: &CalendarDate, title: &str, time: &str) -> Schedule {
    let mut copy = schedule.clone();
    match copy.try_add_task(date, title, time) {
        Ok((week, day)) => log::debug!("added task to {} at [{}][{}]", date, week, day),
        Err(err) => log::warn!("{}", err),
    }
    copy
}

/// Copy of `schedule` with the dragged task moved. A drag without a
/// destination, or one that cannot be resolved, leaves the copy unchanged.
pub fn move_task(schedule: &Schedule, drag: &DragResult) -> Schedule {
    let mut copy = schedule.clone();
    let result = match &drag.destination {
        Some(dest) => copy.try_move_task(&drag.source, dest),
        None => Err(ScheduleError::DropOutsideValidZone),
    };
    match result {
        Ok(()) => {}
        Err(ScheduleError::DropOutsideValidZone) => {
            log::debug!("drag from {} dropped outside the grid", drag.source.zone_id)
        }
        Err(err) => log::warn!("move ignored: {}", err),
    }
    copy
}

/// Holds the one published schedule. Readers keep whatever `Rc` they were
/// handed; every mutation publishes a fresh one.
pub struct ScheduleStore {
    current: Rc<Schedule>,
    week_start: WeekStart,
}

impl ScheduleStore {
    pub fn new(reference: NaiveDate, week_start: WeekStart) -> Self {
        ScheduleStore {
            current: Rc::new(build_schedule(reference, week_start)),
            week_start,
        }
    }

    pub fn current(&self) -> Rc<Schedule> {
        Rc::clone(&self.current)
    }

    pub fn publish(&mut self, schedule: Schedule) {
        self.current = Rc::new(schedule);
    }

    /// Rebuilds the grid when `reference` falls in another month than the
    /// displayed one. Returns whether a rebuild happened; tasks do not
    /// survive it.
    pub fn select_month(&mut self, reference: NaiveDate) -> bool {
        if self.current.year == reference.year() && self.current.month == reference.month() {
            return false;
        }
        let dropped = self.current.task_count();
        self.current = Rc::new(build_schedule(reference, self.week_start));
        log::info!(
            "displaying {} (discarded {} task(s))",
            reference.format("%B %Y"),
            dropped
        );
        true
    }

    pub fn add_task(&mut self, date: &CalendarDate, title: &str, time: &str) {
        let next = add_task(&self.current, date, title, time);
        self.publish(next);
    }

    pub fn move_task(&mut self, drag: &DragResult) {
        let next = move_task(&self.current, drag);
        self.publish(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ZoneRef;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn april() -> Schedule {
        build_schedule(ymd(2024, 4, 1), WeekStart::Monday)
    }

    fn titles(schedule: &Schedule, date: NaiveDate) -> Vec<String> {
        schedule
            .cell(&CalendarDate::new(date))
            .unwrap()
            .tasks
            .iter()
            .map(|t| t.title.clone())
            .collect()
    }

    #[test]
    fn add_twice_appends_to_same_cell() {
        let base = april();
        let day = CalendarDate::new(ymd(2024, 4, 10));
        let once = add_task(&base, &day, "standup", "09:00");
        let twice = add_task(&once, &day, "standup", "09:00");
        assert_eq!(titles(&twice, ymd(2024, 4, 10)), vec!["standup", "standup"]);
        assert_eq!(twice.task_count(), 2);
        assert_eq!(base.task_count(), 0);
    }

    #[test]
    fn add_outside_grid_is_content_equal_copy() {
        let base = april();
        let next = add_task(&base, &CalendarDate::new(ymd(2024, 7, 4)), "x", "10:00");
        assert_eq!(next, base);
    }

    #[test]
    fn store_publishes_fresh_schedule_for_noop_add() {
        let mut store = ScheduleStore::new(ymd(2024, 4, 1), WeekStart::Monday);
        store.add_task(&CalendarDate::new(ymd(2024, 4, 9)), "review", "14:00");
        let before = store.current();
        store.add_task(&CalendarDate::new(ymd(2024, 7, 4)), "x", "10:00");
        let after = store.current();
        assert!(!Rc::ptr_eq(&before, &after));
        assert_eq!(*before, *after);
        assert_eq!(after.task_count(), 1);
    }

    #[test]
    fn add_accepts_padding_day_and_empty_title() {
        let base = april();
        let next = add_task(&base, &CalendarDate::new(ymd(2024, 5, 3)), "", "");
        assert_eq!(next.task_count(), 1);
        assert_eq!(titles(&next, ymd(2024, 5, 3)), vec![""]);
    }

    #[test]
    fn move_across_cells_conserves_tasks() {
        let from = CalendarDate::new(ymd(2024, 4, 2));
        let to = CalendarDate::new(ymd(2024, 4, 20));
        let mut schedule = april();
        for title in ["a", "b", "c"] {
            schedule = add_task(&schedule, &from, title, "08:00");
        }
        schedule = add_task(&schedule, &to, "z", "12:00");
        let total = schedule.task_count();

        let moved = move_task(
            &schedule,
            &DragResult {
                source: ZoneRef::new(from.drop_zone_id(), 1),
                destination: Some(ZoneRef::new(to.drop_zone_id(), 0)),
            },
        );
        assert_eq!(titles(&moved, ymd(2024, 4, 2)), vec!["a", "c"]);
        assert_eq!(titles(&moved, ymd(2024, 4, 20)), vec!["b", "z"]);
        assert_eq!(moved.task_count(), total);
    }

    #[test]
    fn move_within_cell_to_later_index() {
        let day = CalendarDate::new(ymd(2024, 4, 5));
        let mut schedule = april();
        for title in ["a", "b", "c", "d", "e"] {
            schedule = add_task(&schedule, &day, title, "08:00");
        }
        let zone = day.drop_zone_id();
        let moved = move_task(
            &schedule,
            &DragResult {
                source: ZoneRef::new(zone.clone(), 1),
                destination: Some(ZoneRef::new(zone, 3)),
            },
        );
        assert_eq!(titles(&moved, ymd(2024, 4, 5)), vec!["a", "c", "d", "b", "e"]);
    }

    #[test]
    fn drop_outside_is_noop() {
        let day = CalendarDate::new(ymd(2024, 4, 5));
        let schedule = add_task(&april(), &day, "a", "08:00");
        let moved = move_task(
            &schedule,
            &DragResult {
                source: ZoneRef::new(day.drop_zone_id(), 0),
                destination: None,
            },
        );
        assert_eq!(moved, schedule);
    }

    #[test]
    fn store_publishes_new_reference_per_mutation() {
        let mut store = ScheduleStore::new(ymd(2024, 4, 1), WeekStart::Monday);
        let before = store.current();
        store.add_task(&CalendarDate::new(ymd(2024, 4, 9)), "review", "14:00");
        let after = store.current();
        assert!(!Rc::ptr_eq(&before, &after));
        assert_eq!(before.task_count(), 0);
        assert_eq!(after.task_count(), 1);
    }

    #[test]
    fn select_month_rebuilds_only_on_month_change() {
        let mut store = ScheduleStore::new(ymd(2024, 4, 1), WeekStart::Monday);
        store.add_task(&CalendarDate::new(ymd(2024, 4, 9)), "review", "14:00");

        assert!(!store.select_month(ymd(2024, 4, 28)));
        assert_eq!(store.current().task_count(), 1);

        assert!(store.select_month(ymd(2024, 5, 1)));
        let current = store.current();
        assert_eq!((current.year, current.month), (2024, 5));
        assert_eq!(current.task_count(), 0);
    }
}
