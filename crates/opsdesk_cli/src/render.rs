//! Text and JSON rendering for CLI results.

use opsdesk_core::{
    Dashboard, Dataset, Incident, IncidentSummary, SatisfactionSummary, Task, TaskSummary,
};
use serde::Serialize;

pub struct Output {
    json: bool,
}

#[derive(Serialize)]
struct PositionedIncident<'a> {
    position: usize,
    #[serde(flatten)]
    incident: &'a Incident,
}

#[derive(Serialize)]
struct TaskOverview<'a> {
    summary: &'a TaskSummary,
    tasks: &'a [Task],
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn message(&self, text: &str) {
        if self.json {
            self.print_json(&serde_json::json!({ "message": text }));
        } else {
            println!("{text}");
        }
    }

    pub fn incidents(&self, dataset: &Dataset<Incident>) {
        if self.json {
            let rows: Vec<PositionedIncident<'_>> = dataset
                .records()
                .enumerate()
                .map(|(position, incident)| PositionedIncident { position, incident })
                .collect();
            self.print_json(&rows);
            return;
        }
        if dataset.is_empty() {
            println!("no incidents recorded");
            return;
        }
        println!("{}", dataset.columns().join(" | "));
        for position in 0..dataset.len() {
            if let Some(line) = incident_line(dataset, position) {
                println!("{line}");
            }
        }
    }

    pub fn dashboard(&self, dashboard: &Dashboard) {
        if self.json {
            self.print_json(dashboard);
            return;
        }
        print_incident_summary(&dashboard.incidents);
        println!();
        print_satisfaction_summary(&dashboard.satisfaction);
    }

    pub fn satisfaction(&self, summary: &SatisfactionSummary) {
        if self.json {
            self.print_json(summary);
        } else {
            print_satisfaction_summary(summary);
        }
    }

    pub fn tasks(&self, summary: &TaskSummary, tasks: &[Task]) {
        if self.json {
            self.print_json(&TaskOverview { summary, tasks });
            return;
        }
        if summary.total == 0 {
            println!("no tasks recorded");
            return;
        }
        println!(
            "Tasks: total {} | pending {} | in progress {} | finished {}",
            summary.total, summary.pending, summary.in_progress, summary.finished
        );
        for task in tasks {
            println!(
                "{} | due {} | {} | {}",
                task.title, task.due_date, task.status, task.description
            );
        }
    }

    fn print_json<T: Serialize + ?Sized>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(text) => println!("{text}"),
            Err(err) => eprintln!("error: failed to encode output: {err}"),
        }
    }
}

/// One listing row in `Dataset::columns()` order, extras included.
fn incident_line(dataset: &Dataset<Incident>, position: usize) -> Option<String> {
    let incident = dataset.get(position)?;
    let status = incident.status.to_string();
    let id = incident.id.to_string();
    let mut cells = vec![
        incident.name.as_str(),
        incident.date.as_str(),
        incident.description.as_str(),
        status.as_str(),
        id.as_str(),
    ];
    for column in dataset.extra_columns() {
        cells.push(dataset.extra_value(position, column).unwrap_or(""));
    }
    Some(format!("[{position}] {}", cells.join(" | ")))
}

fn print_incident_summary(summary: &IncidentSummary) {
    println!(
        "Incidents: total {} | pending {} | in progress {} | done {}",
        summary.total, summary.pending, summary.in_progress, summary.done
    );
}

fn print_satisfaction_summary(summary: &SatisfactionSummary) {
    let Some(means) = summary.means else {
        println!("no satisfaction data recorded");
        return;
    };
    let show = |mean: Option<f64>| match mean {
        Some(value) => format!("{value:.2}/10"),
        None => "n/a".to_string(),
    };
    println!("Satisfaction: {} responses", summary.total);
    println!(
        "design {} | speed {} | clarity {} | overall {}",
        show(means.design),
        show(means.speed),
        show(means.clarity),
        show(means.overall)
    );
}
