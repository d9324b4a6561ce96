use crate::model::CalendarDate;
use crate::store::ScheduleStore;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum EditorField {
    Title,
    Time,
}

#[derive(Clone, Debug, Default)]
pub struct FieldValue {
    pub value: String,
    cursor: usize,
}

impl FieldValue {
    pub fn new(value: &str) -> Self {
        FieldValue {
            value: value.to_string(),
            cursor: value.len(),
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor = prev_char(self.cursor, &self.value);
    }

    pub fn move_right(&mut self) {
        if self.cursor >= self.value.len() {
            return;
        }
        self.cursor = next_char(self.cursor, &self.value);
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = prev_char(self.cursor, &self.value);
        self.value.drain(prev..self.cursor);
        self.cursor = prev;
    }

    pub fn insert_char(&mut self, ch: char) {
        self.value.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    pub fn with_caret(&self) -> String {
        let mut text = self.value.clone();
        text.insert_str(self.cursor, "▌");
        text
    }
}

/// Popup state for adding a task to the clicked day.
#[derive(Debug)]
pub struct TaskEditor {
    current_cell: Option<CalendarDate>,
    pub title: FieldValue,
    pub time: FieldValue,
    pub field: EditorField,
}

impl Default for TaskEditor {
    fn default() -> Self {
        TaskEditor {
            current_cell: None,
            title: FieldValue::new(""),
            time: FieldValue::new(""),
            field: EditorField::Title,
        }
    }
}

impl TaskEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, date: CalendarDate) {
        *self = TaskEditor {
            current_cell: Some(date),
            ..TaskEditor::default()
        };
    }

    pub fn close(&mut self) {
        *self = TaskEditor::default();
    }

    pub fn is_open(&self) -> bool {
        self.current_cell.is_some()
    }

    pub fn current_cell(&self) -> Option<CalendarDate> {
        self.current_cell
    }

    pub fn next_field(&mut self) {
        self.field = match self.field {
            EditorField::Title => EditorField::Time,
            EditorField::Time => EditorField::Title,
        };
    }

    pub fn prev_field(&mut self) {
        self.next_field();
    }

    pub fn active_field_mut(&mut self) -> &mut FieldValue {
        match self.field {
            EditorField::Title => &mut self.title,
            EditorField::Time => &mut self.time,
        }
    }

    /// Hands the entered task to the store and closes. Returns the date the
    /// task was submitted for, if any.
    pub fn submit(&mut self, store: &mut ScheduleStore) -> Option<CalendarDate> {
        let date = self.current_cell?;
        store.add_task(&date, &self.title.value, &self.time.value);
        self.close();
        Some(date)
    }
}

fn prev_char(cursor: usize, text: &str) -> usize {
    text[..cursor]
        .char_indices()
        .next_back()
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}

fn next_char(cursor: usize, text: &str) -> usize {
    text[cursor..]
        .chars()
        .next()
        .map(|ch| cursor + ch.len_utf8())
        .unwrap_or(cursor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WeekStart;
    use chrono::NaiveDate;

    fn type_into(field: &mut FieldValue, text: &str) {
        for ch in text.chars() {
            field.insert_char(ch);
        }
    }

    #[test]
    fn field_editing_handles_multibyte_chars() {
        let mut field = FieldValue::new("");
        type_into(&mut field, "café");
        field.move_left();
        field.insert_char('x');
        assert_eq!(field.value, "cafxé");
        field.move_right();
        field.backspace();
        assert_eq!(field.value, "cafx");
        assert_eq!(field.with_caret(), "cafx▌");
    }

    #[test]
    fn submit_adds_task_for_current_cell_and_closes() {
        let reference = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let mut store = ScheduleStore::new(reference, WeekStart::Monday);
        let day = CalendarDate::from_ymd(2024, 4, 12).unwrap();

        let mut editor = TaskEditor::new();
        editor.open(day);
        type_into(editor.active_field_mut(), "Dentist");
        editor.next_field();
        type_into(editor.active_field_mut(), "15:30");

        assert_eq!(editor.submit(&mut store), Some(day));
        assert!(!editor.is_open());
        let schedule = store.current();
        let cell = schedule.cell(&day).unwrap();
        assert_eq!(cell.tasks.len(), 1);
        assert_eq!(cell.tasks[0].title, "Dentist");
        assert_eq!(cell.tasks[0].time, "15:30");
    }

    #[test]
    fn submit_without_cell_changes_nothing() {
        let reference = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let mut store = ScheduleStore::new(reference, WeekStart::Monday);
        let mut editor = TaskEditor::new();
        assert_eq!(editor.submit(&mut store), None);
        assert_eq!(store.current().task_count(), 0);
    }

    #[test]
    fn reopening_clears_previous_input() {
        let mut editor = TaskEditor::new();
        editor.open(CalendarDate::from_ymd(2024, 4, 1).unwrap());
        type_into(editor.active_field_mut(), "draft");
        editor.open(CalendarDate::from_ymd(2024, 4, 2).unwrap());
        assert!(editor.title.value.is_empty());
        assert_eq!(editor.field, EditorField::Title);
    }
}
