use crate::model::{CalendarDate, Schedule, Task};
use chrono::Datelike;

/// What one grid cell shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub date: CalendarDate,
    pub day_number: u32,
    pub is_today: bool,
    pub in_month: bool,
    pub tasks: Vec<Task>,
    pub drop_zone_id: String,
}

pub fn project(schedule: &Schedule, today: CalendarDate) -> Vec<Vec<CellView>> {
    schedule
        .weeks
        .iter()
        .map(|week| {
            week.iter()
                .map(|cell| CellView {
                    date: cell.date,
                    day_number: cell.date.naive().day(),
                    is_today: cell.date.same_day(&today),
                    in_month: cell.in_month,
                    tasks: cell.tasks.clone(),
                    drop_zone_id: cell.drop_zone_id.clone(),
                })
                .collect()
        })
        .collect()
}

pub fn month_title(schedule: &Schedule) -> String {
    chrono::NaiveDate::from_ymd_opt(schedule.year, schedule.month, 1)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_else(|| format!("{}-{:02}", schedule.year, schedule.month))
}

/// Plain-text rendition of the grid, one line per week.
pub fn grid_text(schedule: &Schedule, labels: &[String], today: CalendarDate) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:^48}\n", month_title(schedule)));
    let header: Vec<String> = labels.iter().map(|l| format!("{:>6}", l)).collect();
    out.push_str(&header.join(" "));
    out.push('\n');
    for week in project(schedule, today) {
        let row: Vec<String> = week
            .iter()
            .map(|cell| {
                let mark = if cell.is_today {
                    '*'
                } else if cell.in_month {
                    ' '
                } else {
                    '.'
                };
                format!("{:>5}{}", cell.day_number, mark)
            })
            .collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{build_schedule, weekday_labels};
    use crate::model::WeekStart;
    use crate::store::add_task;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn exactly_one_today_cell_in_current_month() {
        let now = ymd(2024, 4, 17).and_hms_opt(16, 45, 0).unwrap();
        let schedule = build_schedule(now.date(), WeekStart::Monday);
        let today = CalendarDate::of(now);
        let flagged: Vec<CellView> = project(&schedule, today)
            .into_iter()
            .flatten()
            .filter(|cell| cell.is_today)
            .collect();
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].date.label(), today.label());
    }

    #[test]
    fn no_today_cell_for_other_month() {
        let schedule = build_schedule(ymd(2024, 4, 1), WeekStart::Monday);
        let today = CalendarDate::new(ymd(2024, 9, 1));
        assert!(project(&schedule, today)
            .iter()
            .flatten()
            .all(|cell| !cell.is_today));
    }

    #[test]
    fn projection_mirrors_schedule_without_touching_it() {
        let schedule = build_schedule(ymd(2024, 4, 1), WeekStart::Monday);
        let schedule = add_task(&schedule, &CalendarDate::new(ymd(2024, 4, 3)), "gym", "07:00");
        let before = schedule.clone();
        let view = project(&schedule, CalendarDate::new(ymd(2024, 4, 3)));
        assert_eq!(schedule, before);
        assert_eq!(view.len(), schedule.weeks.len());
        let cell = &view[0][2];
        assert_eq!(cell.day_number, 3);
        assert_eq!(cell.tasks[0].title, "gym");
        assert_eq!(cell.drop_zone_id, "eventsWed Apr 03 2024");
    }

    #[test]
    fn grid_text_marks_today_and_padding() {
        let schedule = build_schedule(ymd(2024, 4, 1), WeekStart::Monday);
        let labels: Vec<String> = weekday_labels(WeekStart::Monday)
            .iter()
            .map(|l| l.to_string())
            .collect();
        let text = grid_text(&schedule, &labels, CalendarDate::new(ymd(2024, 4, 1)));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2 + 5);
        assert!(lines[0].contains("April 2024"));
        assert!(lines[2].starts_with("    1*"));
        assert!(lines[6].ends_with("    5."));
    }
}
