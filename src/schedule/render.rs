use crate::appointments::{AppointmentStatus, AppointmentType, DisplayAppointment};
use crate::schedule::view::{Column, ColumnVisibility};
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
    Default,
    Secondary,
    Destructive,
    Outline,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub variant: BadgeVariant,
}

impl Badge {
    pub fn for_status(status: &AppointmentStatus) -> Self {
        let variant = match status {
            AppointmentStatus::Scheduled => BadgeVariant::Secondary,
            AppointmentStatus::Completed => BadgeVariant::Default,
            AppointmentStatus::Cancelled => BadgeVariant::Destructive,
            AppointmentStatus::NoShow => BadgeVariant::Outline,
            AppointmentStatus::Other(_) => BadgeVariant::Default,
        };
        Self {
            label: status.label(),
            variant,
        }
    }

    pub fn for_type(kind: &AppointmentType) -> Self {
        let variant = match kind {
            AppointmentType::Training => BadgeVariant::Default,
            AppointmentType::Consultation => BadgeVariant::Secondary,
            _ => BadgeVariant::Outline,
        };
        Self {
            label: kind.label(),
            variant,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionTone {
    Normal,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    Edit,
    Reschedule,
    SetStatus(AppointmentStatus),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowAction {
    pub label: &'static str,
    pub kind: ActionKind,
    pub tone: ActionTone,
}

impl RowAction {
    /// Command line that performs this action for appointment `id`
    pub fn command(&self, id: &str) -> String {
        match &self.kind {
            ActionKind::Edit => format!("coachdesk update {}", id),
            ActionKind::Reschedule => format!("coachdesk update {} --date <date> --time <time>", id),
            ActionKind::SetStatus(status) => format!("coachdesk set-status {} {}", id, status),
        }
    }
}

/// Menu offered for a row; only scheduled appointments can change status.
pub fn row_actions(status: &AppointmentStatus) -> Vec<RowAction> {
    let mut actions = vec![RowAction {
        label: "Edit",
        kind: ActionKind::Edit,
        tone: ActionTone::Normal,
    }];

    if *status == AppointmentStatus::Scheduled {
        actions.extend([
            RowAction {
                label: "Reschedule",
                kind: ActionKind::Reschedule,
                tone: ActionTone::Normal,
            },
            RowAction {
                label: "Mark as Completed",
                kind: ActionKind::SetStatus(AppointmentStatus::Completed),
                tone: ActionTone::Normal,
            },
            RowAction {
                label: "Cancel",
                kind: ActionKind::SetStatus(AppointmentStatus::Cancelled),
                tone: ActionTone::Danger,
            },
            RowAction {
                label: "Mark as No-show",
                kind: ActionKind::SetStatus(AppointmentStatus::NoShow),
                tone: ActionTone::Warning,
            },
        ]);
    }

    actions
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Badge(Badge),
    Actions(Vec<RowAction>),
}

impl Cell {
    pub fn plain(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Badge(badge) => badge.label.clone(),
            Cell::Actions(actions) => format!("{} actions", actions.len()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub id: String,
    pub cells: Vec<(Column, Cell)>,
    pub actions: Vec<RowAction>,
}

impl TableRow {
    pub fn cell(&self, column: Column) -> Option<&Cell> {
        self.cells.iter().find(|(c, _)| *c == column).map(|(_, cell)| cell)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<TableRow>,
}

pub const EMPTY_MESSAGE: &str = "No results.";

/// Render-ready rows for the visible columns.
pub fn build_table(rows: &[&DisplayAppointment], visibility: &ColumnVisibility, date_format: &str) -> Table {
    let columns = visibility.visible_columns();
    let rows = rows
        .iter()
        .map(|row| {
            let actions = row_actions(&row.status);
            let cells = columns
                .iter()
                .map(|column| (*column, cell_for(row, *column, &actions, date_format)))
                .collect();
            TableRow {
                id: row.id.clone(),
                cells,
                actions,
            }
        })
        .collect();

    Table { columns, rows }
}

fn cell_for(row: &DisplayAppointment, column: Column, actions: &[RowAction], date_format: &str) -> Cell {
    match column {
        Column::Client => Cell::Text(row.client_name.clone()),
        Column::Trainer => Cell::Text(row.trainer_name.clone().unwrap_or_default()),
        Column::Date => Cell::Text(format_date(&row.date, date_format)),
        Column::Time => Cell::Text(row.time.clone()),
        Column::Duration => Cell::Text(row.duration.clone()),
        Column::Location => Cell::Text(row.location.clone()),
        Column::Type => Cell::Badge(Badge::for_type(&row.kind)),
        Column::Status => Cell::Badge(Badge::for_status(&row.status)),
        Column::Actions => Cell::Actions(actions.to_vec()),
    }
}

/// Format an ISO `YYYY-MM-DD` date; anything chrono can't parse (or a format
/// it can't render) is shown as received.
pub fn format_date(raw: &str, format: &str) -> String {
    let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") else {
        return raw.to_string();
    };
    let mut out = String::new();
    match write!(out, "{}", date.format(format)) {
        Ok(()) => out,
        Err(_) => raw.to_string(),
    }
}

/// Fixed-width terminal rendering of a table.
pub fn render_text(table: &Table, color: bool) -> String {
    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            table
                .rows
                .iter()
                .map(|row| row.cells[i].1.plain().chars().count())
                .max()
                .unwrap_or(0)
                .max(column.header().len())
        })
        .collect();

    let mut out = String::new();

    let header: Vec<String> = table
        .columns
        .iter()
        .zip(&widths)
        .map(|(column, width)| format!("{:<width$}", column.header(), width = width))
        .collect();
    let header = header.join("  ");
    if color {
        let _ = writeln!(out, "{}", header.bold());
    } else {
        let _ = writeln!(out, "{}", header);
    }
    let _ = writeln!(out, "{}", "-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));

    if table.rows.is_empty() {
        let _ = writeln!(out, "{}", EMPTY_MESSAGE);
        return out;
    }

    for row in &table.rows {
        let line: Vec<String> = row
            .cells
            .iter()
            .zip(&widths)
            .map(|((_, cell), width)| {
                let padded = format!("{:<width$}", cell.plain(), width = width);
                match cell {
                    Cell::Badge(badge) if color => paint_badge(&padded, badge.variant),
                    _ => padded,
                }
            })
            .collect();
        let _ = writeln!(out, "{}", line.join("  ").trim_end());
    }

    out
}

/// Per-row action menus, one block per row.
pub fn render_actions(table: &Table, color: bool) -> String {
    let mut out = String::new();
    for row in &table.rows {
        let _ = writeln!(out, "#{}", row.id);
        for action in &row.actions {
            let label = match (color, action.tone) {
                (true, ActionTone::Danger) => action.label.red().to_string(),
                (true, ActionTone::Warning) => action.label.yellow().to_string(),
                _ => action.label.to_string(),
            };
            let _ = writeln!(out, "  {:<18} {}", label, action.command(&row.id));
        }
    }
    out
}

fn paint_badge(text: &str, variant: BadgeVariant) -> String {
    match variant {
        BadgeVariant::Default => text.bold().to_string(),
        BadgeVariant::Secondary => text.cyan().to_string(),
        BadgeVariant::Destructive => text.red().to_string(),
        BadgeVariant::Outline => text.dimmed().to_string(),
    }
}
