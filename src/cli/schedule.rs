use crate::appointments::{AppointmentStatus, AppointmentType};
use crate::cli::{connect, require_login};
use crate::config::{self, Config};
use crate::error::{Error, Result};
use crate::schedule::view::{search_options, status_options, type_options};
use crate::schedule::{render_actions, render_text, Column, SchedulePage, TerminalNotifier, ViewState};
use clap::Args;

#[derive(Args, Default)]
pub struct ScheduleArgs {
    /// Only rows whose client or location contains this text (case-insensitive)
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Uncheck a status (repeatable); unchecking all of them shows nothing
    #[arg(long = "uncheck-status", value_name = "STATUS")]
    pub uncheck_status: Vec<String>,

    /// Uncheck a type (repeatable); unchecking all of them shows nothing
    #[arg(long = "uncheck-type", value_name = "TYPE")]
    pub uncheck_type: Vec<String>,

    /// Hide a column by header or key (repeatable)
    #[arg(long, value_name = "COLUMN")]
    pub hide: Vec<String>,

    /// Show a column hidden by default for your role (repeatable)
    #[arg(long, value_name = "COLUMN")]
    pub show: Vec<String>,

    /// List the statuses and types present, optionally narrowed by a search
    #[arg(long, value_name = "SEARCH", num_args = 0..=1, default_missing_value = "")]
    pub options: Option<String>,

    /// Print each row's action menu below the table
    #[arg(long)]
    pub actions: bool,

    /// Output visible rows as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ScheduleArgs) -> Result<()> {
    let config = config::load()?;
    let client = connect(&config).await?;
    require_login(&client).await?;

    let notifier = TerminalNotifier::new(config.display.color);
    let mut page = SchedulePage::mount(&client, &notifier).await?;
    apply_args(&mut page.view, &args)?;

    print_page(&page, &config, &args)
}

/// Fold command-line filter flags into a freshly mounted view.
pub fn apply_args(view: &mut ViewState, args: &ScheduleArgs) -> Result<()> {
    if let Some(text) = &args.filter {
        view.set_filter_text(text.clone());
    }
    for status in &args.uncheck_status {
        view.set_status_checked(AppointmentStatus::from(status.as_str()), false);
    }
    for kind in &args.uncheck_type {
        view.set_type_checked(AppointmentType::from(kind.as_str()), false);
    }
    for name in &args.hide {
        let column = parse_column(name)?;
        if !view.columns.set(column, false) {
            return Err(Error::ConfigError(format!("Column '{}' cannot be hidden", column.header())));
        }
    }
    for name in &args.show {
        view.columns.set(parse_column(name)?, true);
    }
    Ok(())
}

fn parse_column(name: &str) -> Result<Column> {
    Column::parse(name).ok_or_else(|| {
        let known: Vec<_> = Column::ALL.iter().map(|c| c.header()).collect();
        Error::ConfigError(format!("Unknown column '{}'. Expected one of: {}", name, known.join(", ")))
    })
}

pub(crate) fn print_page(page: &SchedulePage<'_>, config: &Config, args: &ScheduleArgs) -> Result<()> {
    if let Some(message) = page.error() {
        eprintln!("Could not load appointments: {}", message);
        return Ok(());
    }

    if let Some(query) = &args.options {
        let rows = page.appointments();
        let statuses: Vec<String> = search_options(&status_options(rows), query)
            .iter()
            .map(|s| checkbox(page.view.statuses.is_checked(s), &s.label()))
            .collect();
        let types: Vec<String> = search_options(&type_options(rows), query)
            .iter()
            .map(|t| checkbox(page.view.types.is_checked(t), &t.label()))
            .collect();
        println!("Status: {}", statuses.join("  "));
        println!("Type:   {}", types.join("  "));
        println!();
    }

    if args.json {
        let rows = page.visible_rows();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if let Some(table) = page.table(&config.display.date_format) {
        print!("{}", render_text(&table, config.display.color));
        if args.actions && !table.rows.is_empty() {
            println!();
            print!("{}", render_actions(&table, config.display.color));
        }
    }

    Ok(())
}

fn checkbox(checked: bool, label: &str) -> String {
    format!("[{}] {}", if checked { "x" } else { " " }, label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Role;

    #[test]
    fn args_fold_into_view() {
        let mut view = ViewState::new(Role::Trainer);
        let args = ScheduleArgs {
            filter: Some("anna".to_string()),
            uncheck_status: vec!["scheduled".to_string()],
            hide: vec!["location".to_string()],
            show: vec!["Trainer".to_string()],
            ..Default::default()
        };
        apply_args(&mut view, &args).unwrap();

        assert_eq!(view.filter_text, "anna");
        assert!(!view.statuses.is_checked(&AppointmentStatus::Scheduled));
        assert!(view.statuses.is_checked(&AppointmentStatus::Completed));
        assert!(!view.columns.is_visible(Column::Location));
        assert!(view.columns.is_visible(Column::Trainer));
    }

    #[test]
    fn hiding_actions_is_rejected() {
        let mut view = ViewState::new(Role::Admin);
        let args = ScheduleArgs {
            hide: vec!["actions".to_string()],
            ..Default::default()
        };
        assert!(apply_args(&mut view, &args).is_err());
    }

    #[test]
    fn unknown_column_is_rejected() {
        let mut view = ViewState::new(Role::Admin);
        let args = ScheduleArgs {
            show: vec!["notes".to_string()],
            ..Default::default()
        };
        assert!(matches!(apply_args(&mut view, &args), Err(Error::ConfigError(_))));
    }
}
