//! Filter and column-visibility state for the schedule table.
//!
//! A row is shown when it matches the free-text filter and both its status and
//! its type are checked. Unchecking every entry of a checklist hides every row;
//! an empty checklist is never read as "no filter".

use crate::appointments::{AppointmentStatus, AppointmentType, DisplayAppointment};
use crate::session::Role;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::Hash;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Client,
    Trainer,
    Date,
    Time,
    Duration,
    Location,
    Type,
    Status,
    Actions,
}

impl Column {
    pub const ALL: [Column; 9] = [
        Column::Client,
        Column::Trainer,
        Column::Date,
        Column::Time,
        Column::Duration,
        Column::Location,
        Column::Type,
        Column::Status,
        Column::Actions,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            Column::Client => "Client",
            Column::Trainer => "Trainer",
            Column::Date => "Date",
            Column::Time => "Time",
            Column::Duration => "Duration",
            Column::Location => "Location",
            Column::Type => "Type",
            Column::Status => "Status",
            Column::Actions => "Actions",
        }
    }

    /// Field key of the display row this column reads
    pub fn key(&self) -> &'static str {
        match self {
            Column::Client => "clientName",
            Column::Trainer => "trainerName",
            Column::Date => "date",
            Column::Time => "time",
            Column::Duration => "duration",
            Column::Location => "location",
            Column::Type => "type",
            Column::Status => "status",
            Column::Actions => "actions",
        }
    }

    pub fn can_hide(&self) -> bool {
        !matches!(self, Column::Actions)
    }

    /// Accepts the header ("Client") or the field key ("clientName"), any case.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| {
            c.header().eq_ignore_ascii_case(s) || c.key().eq_ignore_ascii_case(s)
        })
    }
}

/// Per-column visibility. Columns without an entry are visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnVisibility {
    visible: HashMap<Column, bool>,
}

impl ColumnVisibility {
    /// Clients don't see the client column, trainers don't see the trainer column.
    pub fn for_role(role: Role) -> Self {
        let mut visibility = Self::default();
        match role {
            Role::Client => {
                visibility.set(Column::Client, false);
            }
            Role::Trainer => {
                visibility.set(Column::Trainer, false);
            }
            Role::Admin => {}
        }
        visibility
    }

    pub fn is_visible(&self, column: Column) -> bool {
        self.visible.get(&column).copied().unwrap_or(true)
    }

    /// Returns false, leaving state untouched, for a column that can't be hidden.
    pub fn set(&mut self, column: Column, visible: bool) -> bool {
        if !column.can_hide() {
            return false;
        }
        self.visible.insert(column, visible);
        true
    }

    pub fn visible_columns(&self) -> Vec<Column> {
        Column::ALL
            .into_iter()
            .filter(|c| self.is_visible(*c))
            .collect()
    }
}

/// Inclusion map for one categorical field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checklist<K: Ord> {
    entries: BTreeMap<K, bool>,
}

impl<K: Ord + Clone> Checklist<K> {
    pub fn all_checked(values: &[K]) -> Self {
        Self {
            entries: values.iter().cloned().map(|v| (v, true)).collect(),
        }
    }

    pub fn set(&mut self, value: K, checked: bool) {
        self.entries.insert(value, checked);
    }

    /// Values never added to the list count as unchecked.
    pub fn is_checked(&self, value: &K) -> bool {
        self.entries.get(value).copied().unwrap_or(false)
    }

    pub fn any_checked(&self) -> bool {
        self.entries.values().any(|checked| *checked)
    }

    pub fn includes(&self, value: &K) -> bool {
        self.any_checked() && self.is_checked(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub filter_text: String,
    pub statuses: Checklist<AppointmentStatus>,
    pub types: Checklist<AppointmentType>,
    pub columns: ColumnVisibility,
}

impl Default for ViewState {
    /// Used when the session's role is unrecognized: no role-derived hiding.
    fn default() -> Self {
        Self {
            filter_text: String::new(),
            statuses: Checklist::all_checked(AppointmentStatus::KNOWN),
            types: Checklist::all_checked(AppointmentType::KNOWN),
            columns: ColumnVisibility::default(),
        }
    }
}

impl ViewState {
    /// Fresh state for a newly mounted table: everything checked, no text,
    /// role-derived column visibility.
    pub fn new(role: Role) -> Self {
        Self {
            columns: ColumnVisibility::for_role(role),
            ..Self::default()
        }
    }

    pub fn set_filter_text(&mut self, text: impl Into<String>) {
        self.filter_text = text.into();
    }

    pub fn set_status_checked(&mut self, status: AppointmentStatus, checked: bool) {
        self.statuses.set(status, checked);
    }

    pub fn set_type_checked(&mut self, kind: AppointmentType, checked: bool) {
        self.types.set(kind, checked);
    }

    pub fn matches(&self, row: &DisplayAppointment) -> bool {
        let text_match = self.filter_text.is_empty() || {
            let needle = self.filter_text.to_lowercase();
            row.client_name.to_lowercase().contains(&needle)
                || row.location.to_lowercase().contains(&needle)
        };

        text_match && self.statuses.includes(&row.status) && self.types.includes(&row.kind)
    }

    pub fn apply<'a>(&self, rows: &'a [DisplayAppointment]) -> Vec<&'a DisplayAppointment> {
        rows.iter().filter(|row| self.matches(row)).collect()
    }
}

/// Distinct statuses present in `rows`, in order of first appearance.
pub fn status_options(rows: &[DisplayAppointment]) -> Vec<AppointmentStatus> {
    distinct(rows.iter().map(|r| r.status.clone()))
}

/// Distinct types present in `rows`, in order of first appearance.
pub fn type_options(rows: &[DisplayAppointment]) -> Vec<AppointmentType> {
    distinct(rows.iter().map(|r| r.kind.clone()))
}

/// Narrow an option list by a case-insensitive substring; empty query keeps all.
pub fn search_options<T: ToString + Clone>(options: &[T], query: &str) -> Vec<T> {
    if query.is_empty() {
        return options.to_vec();
    }
    let query = query.to_lowercase();
    options
        .iter()
        .filter(|o| o.to_string().to_lowercase().contains(&query))
        .cloned()
        .collect()
}

fn distinct<T: Eq + Hash + Clone>(values: impl Iterator<Item = T>) -> Vec<T> {
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(v.clone())).collect()
}
