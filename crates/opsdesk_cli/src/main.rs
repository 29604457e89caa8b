//! OpsDesk command-line front end.
//!
//! # Responsibility
//! - Map the section menu (incidents, dashboard, satisfaction, tasks) to
//!   subcommands and fill the matching form from flags.
//! - Print results as text or JSON; print errors verbatim and exit non-zero.

mod render;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use opsdesk_core::{
    default_log_level, init_logging, Desk, IncidentForm, IncidentStatus, Locator, Score,
    StoreConfig, StoreError, SurveyForm, TaskForm, TaskStatus, DATA_DIR_ENV,
};
use render::Output;
use std::path::PathBuf;
use std::process::ExitCode;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "opsdesk", version, about = "Incident, satisfaction and task records")]
struct Cli {
    /// Directory holding the CSV tables.
    #[arg(long, global = true, env = DATA_DIR_ENV, default_value = ".")]
    data_dir: PathBuf,

    /// Absolute directory for rotating log files. Logging is off when unset.
    #[arg(long, global = true, env = "OPSDESK_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[arg(long, global = true, env = "OPSDESK_LOG_LEVEL")]
    log_level: Option<String>,

    /// Print machine-readable JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Register, list, delete and modify incidents.
    #[command(subcommand)]
    Incidents(IncidentCommand),
    /// Incident counts plus satisfaction averages.
    Dashboard,
    /// Record and summarize customer satisfaction surveys.
    #[command(subcommand)]
    Satisfaction(SatisfactionCommand),
    /// Task summary, creation and status editing.
    #[command(subcommand)]
    Tasks(TaskCommand),
}

#[derive(Debug, Subcommand)]
enum IncidentCommand {
    Add(IncidentArgs),
    List,
    Delete(RowSelector),
    Modify {
        #[command(flatten)]
        row: RowSelector,
        #[command(flatten)]
        changes: IncidentChanges,
    },
}

#[derive(Debug, Args)]
struct IncidentArgs {
    #[arg(long)]
    name: String,
    /// Defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,
    #[arg(long)]
    description: String,
    #[arg(long, default_value_t = IncidentStatus::Pending)]
    status: IncidentStatus,
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct RowSelector {
    /// Zero-based row position as shown by `incidents list`.
    #[arg(long)]
    position: Option<usize>,
    /// Stable incident id.
    #[arg(long)]
    id: Option<Uuid>,
}

#[derive(Debug, Args)]
struct IncidentChanges {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    date: Option<NaiveDate>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    status: Option<IncidentStatus>,
}

#[derive(Debug, Subcommand)]
enum SatisfactionCommand {
    Add(SurveyArgs),
    Summary,
}

#[derive(Debug, Args)]
struct SurveyArgs {
    #[arg(long)]
    date: Option<NaiveDate>,
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long, default_value = "")]
    second_last_name: String,
    #[arg(long)]
    email: String,
    #[arg(long, default_value_t = Score::max())]
    design: Score,
    #[arg(long, default_value_t = Score::max())]
    speed: Score,
    #[arg(long, default_value_t = Score::max())]
    clarity: Score,
    #[arg(long, default_value_t = Score::max())]
    overall: Score,
    #[arg(long, default_value = "")]
    comments: String,
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    Summary,
    Add(TaskArgs),
    EditStatus {
        /// Every task with this exact title is updated.
        #[arg(long)]
        title: String,
        #[arg(long)]
        status: TaskStatus,
    },
}

#[derive(Debug, Args)]
struct TaskArgs {
    #[arg(long)]
    title: String,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long)]
    created: Option<NaiveDate>,
    #[arg(long)]
    due: Option<NaiveDate>,
    #[arg(long, default_value_t = TaskStatus::Pending)]
    status: TaskStatus,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    }
    log::debug!(
        "event=cli_start module=cli status=ok core_version={}",
        opsdesk_core::core_version()
    );

    let desk = Desk::open(&StoreConfig::new(&cli.data_dir));
    let output = Output::new(cli.json);
    match run(&desk, cli.command, &output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(desk: &Desk, command: Command, output: &Output) -> Result<(), StoreError> {
    match command {
        Command::Incidents(command) => run_incidents(desk, command, output),
        Command::Dashboard => {
            output.dashboard(&desk.dashboard()?);
            Ok(())
        }
        Command::Satisfaction(SatisfactionCommand::Add(args)) => {
            let mut form = survey_form(args);
            desk.surveys.add(&mut form)?;
            output.message("satisfaction response recorded");
            Ok(())
        }
        Command::Satisfaction(SatisfactionCommand::Summary) => {
            output.satisfaction(&desk.surveys.summary()?);
            Ok(())
        }
        Command::Tasks(command) => run_tasks(desk, command, output),
    }
}

fn run_incidents(desk: &Desk, command: IncidentCommand, output: &Output) -> Result<(), StoreError> {
    match command {
        IncidentCommand::Add(args) => {
            let mut form = IncidentForm {
                name: args.name,
                description: args.description,
                status: args.status,
                ..IncidentForm::default()
            };
            if let Some(date) = args.date {
                form.set_date(date);
            }
            let id = desk.incidents.add(&mut form)?;
            output.message(&format!("incident recorded with id {id}"));
        }
        IncidentCommand::List => {
            output.incidents(&desk.incidents.list()?);
        }
        IncidentCommand::Delete(row) => {
            let removed = match row {
                RowSelector { id: Some(id), .. } => desk.incidents.delete_by_id(id)?,
                RowSelector { position, .. } => desk.incidents.delete(position.unwrap_or(0))?,
            };
            output.message(&format!("deleted incident `{}` ({})", removed.name, removed.id));
        }
        IncidentCommand::Modify { row, changes } => {
            let (position, current) = match row.id {
                Some(id) => {
                    let dataset = desk.incidents.list()?;
                    let position = dataset
                        .position_of(id)
                        .ok_or(StoreError::NotFound(Locator::Id(id)))?;
                    let current = dataset.get(position).cloned().ok_or(StoreError::NotFound(
                        Locator::Position {
                            position,
                            len: dataset.len(),
                        },
                    ))?;
                    (position, current)
                }
                None => {
                    let position = row.position.unwrap_or(0);
                    (position, desk.incidents.get(position)?)
                }
            };

            let mut form = IncidentForm::from_incident(&current);
            apply_changes(&mut form, changes);
            match row.id {
                Some(id) => desk.incidents.modify_by_id(id, &form)?,
                None => desk.incidents.modify(position, &form)?,
            }
            output.message(&format!("incident at position {position} updated"));
        }
    }
    Ok(())
}

fn apply_changes(form: &mut IncidentForm, changes: IncidentChanges) {
    if let Some(name) = changes.name {
        form.name = name;
    }
    if let Some(date) = changes.date {
        form.set_date(date);
    }
    if let Some(description) = changes.description {
        form.description = description;
    }
    if let Some(status) = changes.status {
        form.status = status;
    }
}

fn survey_form(args: SurveyArgs) -> SurveyForm {
    let mut form = SurveyForm {
        first_name: args.first_name,
        last_name: args.last_name,
        second_last_name: args.second_last_name,
        email: args.email,
        design_score: args.design,
        speed_score: args.speed,
        clarity_score: args.clarity,
        overall_score: args.overall,
        comments: args.comments,
        ..SurveyForm::default()
    };
    if let Some(date) = args.date {
        form.date = date;
    }
    form
}

fn run_tasks(desk: &Desk, command: TaskCommand, output: &Output) -> Result<(), StoreError> {
    match command {
        TaskCommand::Summary => {
            output.tasks(&desk.tasks.summary()?, &desk.tasks.list_by_due_date()?);
        }
        TaskCommand::Add(args) => {
            let mut form = TaskForm {
                title: args.title,
                description: args.description,
                status: args.status,
                ..TaskForm::default()
            };
            if let Some(created) = args.created {
                form.created_date = created;
            }
            if let Some(due) = args.due {
                form.due_date = due;
            }
            let id = desk.tasks.add(&mut form)?;
            output.message(&format!("task recorded with id {id}"));
        }
        TaskCommand::EditStatus { title, status } => {
            let updated = desk.tasks.set_status(&title, status)?;
            output.message(&format!(
                "status of `{title}` set to `{status}` on {updated} task(s)"
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{apply_changes, Cli, Command, IncidentChanges, IncidentCommand, TaskCommand};
    use chrono::NaiveDate;
    use clap::{CommandFactory, Parser};
    use opsdesk_core::{IncidentForm, IncidentStatus, TaskStatus};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_incident_add_with_localized_status() {
        let cli = Cli::try_parse_from([
            "opsdesk",
            "incidents",
            "add",
            "--name",
            "Ana",
            "--description",
            "Server down",
            "--status",
            "En proceso",
        ])
        .unwrap();
        match cli.command {
            Command::Incidents(IncidentCommand::Add(args)) => {
                assert_eq!(args.status, IncidentStatus::InProgress);
                assert!(args.date.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn delete_requires_exactly_one_selector() {
        assert!(Cli::try_parse_from(["opsdesk", "incidents", "delete"]).is_err());
        assert!(Cli::try_parse_from([
            "opsdesk",
            "incidents",
            "delete",
            "--position",
            "0",
            "--id",
            "11111111-2222-4333-8444-555555555555",
        ])
        .is_err());
    }

    #[test]
    fn parses_task_edit_status() {
        let cli = Cli::try_parse_from([
            "opsdesk",
            "--json",
            "tasks",
            "edit-status",
            "--title",
            "Backup",
            "--status",
            "finished",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Command::Tasks(TaskCommand::EditStatus { title, status }) => {
                assert_eq!(title, "Backup");
                assert_eq!(status, TaskStatus::Finished);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn modify_changes_only_the_given_fields() {
        let mut form = IncidentForm {
            name: "Ana".to_string(),
            date: "03/01/2024".to_string(),
            description: "Server down".to_string(),
            status: IncidentStatus::Pending,
        };
        apply_changes(
            &mut form,
            IncidentChanges {
                name: None,
                date: None,
                description: None,
                status: Some(IncidentStatus::Done),
            },
        );
        assert_eq!(form.date, "03/01/2024");
        assert_eq!(form.status, IncidentStatus::Done);

        apply_changes(
            &mut form,
            IncidentChanges {
                name: None,
                date: NaiveDate::from_ymd_opt(2024, 3, 1),
                description: None,
                status: None,
            },
        );
        assert_eq!(form.date, "2024-03-01");
        assert_eq!(form.name, "Ana");
    }
}
