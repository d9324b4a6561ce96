use crate::config::Settings;
use crate::drag::DragCoordinator;
use crate::editor::{EditorField, FieldValue, TaskEditor};
use crate::grid::{month_start, shift_month};
use crate::model::{CalendarDate, DayCell, ZoneRef};
use crate::render::{month_title, project, CellView};
use crate::store::ScheduleStore;
use anyhow::Result;
use chrono::{Duration as ChronoDuration, Local, NaiveDate, NaiveDateTime};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Alignment, Color, Modifier, Rect, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Terminal;
use std::io::{stdout, Stdout};
use std::time::Duration;

pub fn run(settings: Settings, reference: NaiveDate) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let mut app = App::new(&settings, reference, local_now);
    let result = app.event_loop(&mut terminal);
    teardown_terminal(&mut terminal)?;
    result
}

struct App {
    store: ScheduleStore,
    labels: Vec<String>,
    reference: NaiveDate,
    cursor: CalendarDate,
    selected_task: usize,
    editor: TaskEditor,
    drag: DragCoordinator,
    status: String,
    cell_areas: Vec<CellArea>,
    now: fn() -> NaiveDateTime,
}

/// Screen area of one drawn cell, refreshed on every frame.
struct CellArea {
    date: CalendarDate,
    zone_id: String,
    rect: Rect,
    task_count: usize,
    rows: Vec<CellRow>,
}

/// One drawn line inside a cell. The marker carries the slot it drops into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CellRow {
    Task(usize),
    Marker(usize),
}

impl CellArea {
    fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.rect.x
            && column < self.rect.x.saturating_add(self.rect.width)
            && row >= self.rect.y
            && row < self.rect.y.saturating_add(self.rect.height)
    }

    /// Content line under `row`; `None` on the borders.
    fn line_at(&self, row: u16) -> Option<usize> {
        let bottom = self.rect.y.saturating_add(self.rect.height).saturating_sub(1);
        if row <= self.rect.y || row >= bottom {
            return None;
        }
        Some((row - self.rect.y - 1) as usize)
    }

    /// Task drawn on `row`, if any. Borders, the title and the drop marker
    /// hold no task.
    fn task_at(&self, row: u16) -> Option<usize> {
        match self.line_at(row).and_then(|line| self.rows.get(line)) {
            Some(CellRow::Task(idx)) => Some(*idx),
            _ => None,
        }
    }

    /// Insertion slot for a drop on `row`, counted after `lifted` (the
    /// dragged task, when it comes from this cell) is taken out.
    fn drop_slot_at(&self, row: u16, lifted: Option<usize>) -> usize {
        let limit = self.task_count.saturating_sub(lifted.is_some() as usize);
        if row <= self.rect.y {
            return 0;
        }
        let slot = match self.line_at(row).and_then(|line| self.rows.get(line)) {
            Some(CellRow::Task(idx)) => match lifted {
                Some(from) if *idx > from => idx - 1,
                _ => *idx,
            },
            Some(CellRow::Marker(slot)) => *slot,
            None => limit,
        };
        slot.min(limit)
    }
}

/// Line at which the drop marker is drawn among `len` tasks. `slot` counts
/// positions with the lifted task removed, so the marker skips over it.
fn marker_row(len: usize, lifted: Option<usize>, slot: usize) -> usize {
    let row = match lifted {
        Some(from) if slot >= from => slot + 1,
        _ => slot,
    };
    row.min(len)
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

impl App {
    fn new(settings: &Settings, reference: NaiveDate, now: fn() -> NaiveDateTime) -> Self {
        let store = ScheduleStore::new(reference, settings.week_start);
        let today = CalendarDate::of(now());
        let cursor = if store.current().contains(&today) {
            today
        } else {
            CalendarDate::new(reference)
        };
        App {
            store,
            labels: settings.header_labels(),
            reference,
            cursor,
            selected_task: 0,
            editor: TaskEditor::new(),
            drag: DragCoordinator::new(),
            status: format!("Showing {}", reference.format("%B %Y")),
            cell_areas: Vec::new(),
            now,
        }
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;
            if event::poll(Duration::from_millis(200))? {
                match event::read()? {
                    Event::Key(key) => {
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        if self.handle_key(key) {
                            break;
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.editor.is_open() {
            self.handle_editor_key(key);
            return false;
        }
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(-1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-7),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(7),
            KeyCode::Tab => self.step_task(1),
            KeyCode::BackTab => self.step_task(-1),
            KeyCode::Enter | KeyCode::Char('a') => self.open_editor(self.cursor),
            KeyCode::Char(' ') => self.toggle_lift(),
            KeyCode::Esc => {
                if self.drag.is_dragging() {
                    self.finish_drag(None);
                }
            }
            KeyCode::Char('<') => self.change_month(-1),
            KeyCode::Char('>') => self.change_month(1),
            KeyCode::Char('t') => self.jump_to_today(),
            _ => {}
        }
        false
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.editor.close();
                self.status = "Canceled".into();
            }
            KeyCode::Tab => self.editor.next_field(),
            KeyCode::BackTab => self.editor.prev_field(),
            KeyCode::Left => self.editor.active_field_mut().move_left(),
            KeyCode::Right => self.editor.active_field_mut().move_right(),
            KeyCode::Backspace => self.editor.active_field_mut().backspace(),
            KeyCode::Enter => self.submit_editor(),
            KeyCode::Char(c) => {
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                {
                    self.editor.active_field_mut().insert_char(c);
                }
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.editor.is_open() {
            return;
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let hit = self
                    .cell_area_at(mouse.column, mouse.row)
                    .map(|area| (area.date, area.zone_id.clone(), area.task_at(mouse.row)));
                match hit {
                    Some((date, zone_id, Some(idx))) => {
                        self.cursor = date;
                        self.selected_task = idx;
                        self.drag.begin(ZoneRef::new(zone_id, idx));
                        self.status = format!("Dragging task from {}", date);
                    }
                    Some((date, _, None)) => {
                        self.cursor = date;
                        self.open_editor(date);
                    }
                    None => {}
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some((date, zone)) = self.drop_zone_at(mouse.column, mouse.row) {
                    self.cursor = date;
                    if self.drag.is_dragging() {
                        self.selected_task = zone.index;
                    }
                    self.clamp_selection();
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if !self.drag.is_dragging() {
                    return;
                }
                let destination = self.drop_zone_at(mouse.column, mouse.row);
                match destination {
                    Some((date, zone)) => {
                        self.cursor = date;
                        self.selected_task = zone.index;
                        self.finish_drag(Some(zone));
                    }
                    None => self.finish_drag(None),
                }
            }
            _ => {}
        }
    }

    fn cell_area_at(&self, column: u16, row: u16) -> Option<&CellArea> {
        self.cell_areas.iter().find(|area| area.contains(column, row))
    }

    /// Drop target under the pointer, with the slot the lifted task would
    /// take there.
    fn drop_zone_at(&self, column: u16, row: u16) -> Option<(CalendarDate, ZoneRef)> {
        let area = self.cell_area_at(column, row)?;
        let lifted = self
            .drag
            .lifted()
            .filter(|source| source.zone_id == area.zone_id)
            .map(|source| source.index);
        let slot = area.drop_slot_at(row, lifted);
        Some((area.date, ZoneRef::new(area.zone_id.clone(), slot)))
    }

    fn toggle_lift(&mut self) {
        if self.drag.is_dragging() {
            let zone = ZoneRef::new(self.cursor.drop_zone_id(), self.selected_task);
            self.finish_drag(Some(zone));
            return;
        }
        let count = self.cursor_cell().map(|c| c.tasks.len()).unwrap_or(0);
        if self.selected_task < count {
            self.drag
                .begin(ZoneRef::new(self.cursor.drop_zone_id(), self.selected_task));
            self.status = "Lifted task (move and press Space to drop, Esc to cancel)".into();
        } else {
            self.status = "No task selected to move".into();
        }
    }

    fn finish_drag(&mut self, destination: Option<ZoneRef>) {
        let dropped = destination.is_some();
        if let Some(result) = self.drag.end(destination) {
            let before = self.store.current();
            self.store.move_task(&result);
            let unchanged = *before == *self.store.current();
            self.status = if !dropped {
                "Move canceled".into()
            } else if unchanged && result.destination.as_ref() != Some(&result.source) {
                "Could not move task".into()
            } else {
                format!("Moved task to {}", self.cursor)
            };
        }
        self.clamp_selection();
    }

    fn open_editor(&mut self, date: CalendarDate) {
        if self.drag.is_dragging() {
            return;
        }
        self.editor.open(date);
        self.status = format!("New task on {} (Tab switch field, Enter save, Esc cancel)", date);
    }

    fn submit_editor(&mut self) {
        let before = self.store.current().task_count();
        if let Some(date) = self.editor.submit(&mut self.store) {
            self.status = if self.store.current().task_count() > before {
                format!("Added task to {}", date)
            } else {
                format!("{} is not in this month", date)
            };
        }
    }

    fn move_cursor(&mut self, days: i64) {
        let target = match self
            .cursor
            .naive()
            .checked_add_signed(ChronoDuration::days(days))
        {
            Some(d) => CalendarDate::new(d),
            None => return,
        };
        if self.store.current().contains(&target) {
            self.cursor = target;
            if !self.drag.is_dragging() {
                self.selected_task = 0;
            }
            self.clamp_selection();
        }
    }

    fn step_task(&mut self, delta: isize) {
        let next = self.selected_task as isize + delta;
        self.selected_task = next.max(0) as usize;
        self.clamp_selection();
    }

    /// Keeps the selection on an existing task, or on a valid insertion slot
    /// while a task is lifted.
    fn clamp_selection(&mut self) {
        let count = self.cursor_cell().map(|c| c.tasks.len()).unwrap_or(0);
        let limit = match self.drag.lifted() {
            Some(source) if source.zone_id == self.cursor.drop_zone_id() => count.saturating_sub(1),
            Some(_) => count,
            None => count.saturating_sub(1),
        };
        self.selected_task = self.selected_task.min(limit);
    }

    fn change_month(&mut self, months: i32) {
        let target = shift_month(self.reference, months);
        self.show_month(target, CalendarDate::new(month_start(target)));
    }

    fn jump_to_today(&mut self) {
        let today = CalendarDate::of((self.now)());
        self.show_month(today.naive(), today);
    }

    fn show_month(&mut self, reference: NaiveDate, cursor: CalendarDate) {
        self.drag.cancel();
        let had_tasks = self.store.current().task_count();
        self.reference = reference;
        if self.store.select_month(reference) {
            self.status = if had_tasks > 0 {
                format!(
                    "Showing {} ({} task(s) from the previous month discarded)",
                    reference.format("%B %Y"),
                    had_tasks
                )
            } else {
                format!("Showing {}", reference.format("%B %Y"))
            };
        }
        self.cursor = cursor;
        self.selected_task = 0;
    }

    fn cursor_cell(&self) -> Option<DayCell> {
        self.store.current().cell(&self.cursor).cloned()
    }

    fn draw(&mut self, f: &mut ratatui::Frame<'_>) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(8),
                Constraint::Length(4),
            ])
            .split(f.size());

        self.draw_header(f, layout[0]);
        self.draw_weekdays(f, layout[1]);
        self.draw_grid(f, layout[2]);
        self.draw_footer(f, layout[3]);

        if self.editor.is_open() {
            self.draw_editor(f);
        }
    }

    fn draw_header(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let schedule = self.store.current();
        let mut spans = vec![
            Span::styled(
                "daygrid ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                month_title(&schedule),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  •  "),
            Span::styled(
                format!("{} task(s)", schedule.task_count()),
                Style::default().fg(Color::Green),
            ),
        ];
        if let Some(source) = self.drag.lifted() {
            spans.push(Span::raw("  •  "));
            spans.push(Span::styled(
                format!("dragging from {}", source.zone_id.trim_start_matches("events")),
                Style::default().fg(Color::Magenta),
            ));
        }
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray));
        let paragraph = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(paragraph, area);
    }

    fn draw_weekdays(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let columns = seven_columns(area);
        for (idx, label) in self.labels.iter().enumerate().take(columns.len()) {
            let heading = Paragraph::new(Span::styled(
                label.clone(),
                Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center);
            f.render_widget(heading, columns[idx]);
        }
    }

    fn draw_grid(&mut self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let schedule = self.store.current();
        let today = CalendarDate::of((self.now)());
        let weeks = project(&schedule, today);
        self.cell_areas.clear();
        if weeks.is_empty() {
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                weeks
                    .iter()
                    .map(|_| Constraint::Ratio(1, weeks.len() as u32))
                    .collect::<Vec<_>>(),
            )
            .split(area);

        for (week, row) in weeks.iter().zip(rows.iter()) {
            let columns = seven_columns(*row);
            for (cell, rect) in week.iter().zip(columns.iter()) {
                let drawn = self.draw_cell(f, cell, *rect);
                self.cell_areas.push(CellArea {
                    date: cell.date,
                    zone_id: cell.drop_zone_id.clone(),
                    rect: *rect,
                    task_count: cell.tasks.len(),
                    rows: drawn,
                });
            }
        }
    }

    fn draw_cell(&self, f: &mut ratatui::Frame<'_>, cell: &CellView, area: Rect) -> Vec<CellRow> {
        let is_cursor = cell.date == self.cursor;
        let accent = if is_cursor {
            Color::Cyan
        } else if cell.is_today {
            Color::LightYellow
        } else if cell.in_month {
            Color::Gray
        } else {
            Color::DarkGray
        };
        let title_style = Style::default().fg(accent).add_modifier(if cell.is_today {
            Modifier::BOLD | Modifier::UNDERLINED
        } else {
            Modifier::BOLD
        });

        let lifted = self
            .drag
            .lifted()
            .filter(|source| source.zone_id == cell.drop_zone_id)
            .map(|source| source.index);
        let width = area.width.saturating_sub(2) as usize;
        let marker = if is_cursor && self.drag.is_dragging() {
            Some(marker_row(cell.tasks.len(), lifted, self.selected_task))
        } else {
            None
        };
        let mut lines: Vec<Line<'static>> = Vec::new();
        let mut rows = Vec::new();
        for (idx, task) in cell.tasks.iter().enumerate() {
            if marker == Some(idx) {
                lines.push(drop_marker());
                rows.push(CellRow::Marker(self.selected_task));
            }
            let mut style = Style::default().fg(if cell.in_month {
                Color::White
            } else {
                Color::DarkGray
            });
            if lifted == Some(idx) {
                style = style.bg(Color::Magenta).fg(Color::Black);
            } else if is_cursor && !self.drag.is_dragging() && idx == self.selected_task {
                style = style
                    .bg(Color::LightCyan)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD);
            }
            lines.push(Line::from(Span::styled(task_line(&task.time, &task.title, width), style)));
            rows.push(CellRow::Task(idx));
        }
        if marker == Some(cell.tasks.len()) {
            lines.push(drop_marker());
            rows.push(CellRow::Marker(self.selected_task));
        }

        let block = Block::default()
            .title(Span::styled(format!("{:>2}", cell.day_number), title_style))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent));
        f.render_widget(Paragraph::new(lines).block(block), area);
        rows
    }

    fn draw_footer(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Length(2)])
            .split(area);

        let help_bar = Paragraph::new(self.footer_help_line())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        f.render_widget(help_bar, rows[0]);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[1]);

        let status = Paragraph::new(self.status.clone())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        f.render_widget(status, bottom[0]);

        let detail = Paragraph::new(self.detail_line())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title("Selected"),
            );
        f.render_widget(detail, bottom[1]);
    }

    fn footer_help_line(&self) -> Line<'static> {
        let mut spans = vec![
            Span::styled("←↑↓→ / h j k l", Style::default().fg(Color::LightCyan)),
            Span::raw(" day  "),
            Span::styled("Tab", Style::default().fg(Color::LightCyan)),
            Span::raw(" task  "),
        ];
        if self.drag.is_dragging() {
            spans.extend([
                Span::styled("Space", Style::default().fg(Color::LightGreen)),
                Span::raw(" drop  "),
                Span::styled("Esc", Style::default().fg(Color::LightRed)),
                Span::raw(" cancel  "),
            ]);
        } else {
            spans.extend([
                Span::styled("Space", Style::default().fg(Color::LightGreen)),
                Span::raw(" lift  "),
                Span::styled("Enter/a", Style::default().fg(Color::LightMagenta)),
                Span::raw(" add  "),
                Span::styled("</>", Style::default().fg(Color::LightYellow)),
                Span::raw(" month  "),
                Span::styled("t", Style::default().fg(Color::LightYellow)),
                Span::raw(" today  "),
            ]);
        }
        spans.extend([
            Span::styled("q", Style::default().fg(Color::LightRed)),
            Span::raw(" quit"),
        ]);
        Line::from(spans)
    }

    fn detail_line(&self) -> Line<'static> {
        let cell = match self.cursor_cell() {
            Some(cell) => cell,
            None => return Line::from("No day selected"),
        };
        let mut spans = vec![Span::styled(
            cell.date.naive().format("%A %d %B").to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )];
        match cell.tasks.get(self.selected_task) {
            Some(task) => {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(task.time.clone(), Style::default().fg(Color::LightRed)));
                spans.push(Span::raw(" "));
                spans.push(Span::raw(task.title.clone()));
            }
            None => spans.push(Span::raw("  no tasks")),
        }
        Line::from(spans)
    }

    fn draw_editor(&self, f: &mut ratatui::Frame<'_>) {
        let area = centered_rect(60, 35, f.size());
        let title = match self.editor.current_cell() {
            Some(date) => format!("New Task • {}", date.naive().format("%A %d %B %Y")),
            None => "New Task".into(),
        };
        let fields = vec![
            field_line("Title", &self.editor.title, self.editor.field == EditorField::Title),
            field_line("Time", &self.editor.time, self.editor.field == EditorField::Time),
            Line::from(""),
            Line::from(Span::styled(
                "Enter to save • Esc to cancel • Tab/Shift-Tab to move",
                Style::default().fg(Color::Gray),
            )),
        ];
        let dialog = Paragraph::new(fields)
            .block(
                Block::default()
                    .title(Span::styled(
                        title,
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .wrap(Wrap { trim: true });

        f.render_widget(Clear, area);
        f.render_widget(dialog, area);
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn teardown_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

fn seven_columns(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 7); 7])
        .split(area)
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn drop_marker() -> Line<'static> {
    Line::from(Span::styled(
        "▸ drop here",
        Style::default()
            .fg(Color::LightGreen)
            .add_modifier(Modifier::BOLD),
    ))
}

fn task_line(time: &str, title: &str, max: usize) -> String {
    let text = if time.is_empty() {
        title.to_string()
    } else {
        format!("{} {}", time, title)
    };
    truncate_text(&text, max)
}

fn truncate_text(text: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn field_line(label: &str, field: &FieldValue, active: bool) -> Line<'static> {
    let label_style = Style::default()
        .fg(Color::Gray)
        .add_modifier(Modifier::BOLD | Modifier::DIM);
    let value_style = Style::default().fg(if active { Color::Cyan } else { Color::White });
    let text = if active {
        field.with_caret()
    } else {
        field.value.clone()
    };
    Line::from(vec![
        Span::styled(format!("{}: ", label), label_style),
        Span::styled(text, value_style),
    ])
}
