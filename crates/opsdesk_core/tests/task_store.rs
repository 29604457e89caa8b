use opsdesk_core::{
    CsvRecordStore, Dataset, Locator, RecordStore, StoreError, Task, TaskForm, TaskService,
    TaskStatus, TaskSummary,
};
use chrono::NaiveDate;
use std::fs;

fn task(title: &str, due: &str, status: TaskStatus) -> Task {
    Task::new(title, format!("{title} details"), "2024-01-01", due, status)
}

#[test]
fn summary_counts_tasks_by_status() {
    let mut dataset = Dataset::new();
    dataset.append(task("T1", "2024-02-01", TaskStatus::Pending));
    dataset.append(task("T2", "2024-02-02", TaskStatus::Finished));

    assert_eq!(
        dataset.summarize(),
        TaskSummary {
            total: 2,
            pending: 1,
            in_progress: 0,
            finished: 1,
        }
    );
    assert_eq!(Dataset::<Task>::new().summarize(), TaskSummary::default());
}

#[test]
fn status_update_by_title_hits_every_duplicate_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvRecordStore::<Task>::in_dir(dir.path());

    let mut dataset = Dataset::new();
    dataset.append(task("X", "2024-02-01", TaskStatus::Pending));
    dataset.append(task("Y", "2024-02-01", TaskStatus::Pending));
    dataset.append(task("X", "2024-03-01", TaskStatus::Finished));
    store.save(&dataset).unwrap();

    let mut dataset = store.load().unwrap();
    let updated = dataset
        .update_status_by_title("X", TaskStatus::InProgress)
        .unwrap();
    assert_eq!(updated, 2);
    store.save(&dataset).unwrap();

    let statuses: Vec<(String, TaskStatus)> = store
        .load()
        .unwrap()
        .records()
        .map(|task| (task.title.clone(), task.status))
        .collect();
    assert_eq!(
        statuses,
        vec![
            ("X".to_string(), TaskStatus::InProgress),
            ("Y".to_string(), TaskStatus::Pending),
            ("X".to_string(), TaskStatus::InProgress),
        ]
    );
}

#[test]
fn title_match_is_exact() {
    let mut dataset = Dataset::new();
    dataset.append(task("Deploy", "2024-02-01", TaskStatus::Pending));

    let err = dataset
        .update_status_by_title("deploy", TaskStatus::Finished)
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(Locator::Title(_))));
    assert_eq!(dataset.get(0).unwrap().status, TaskStatus::Pending);
}

#[test]
fn localized_headers_and_labels_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvRecordStore::<Task>::in_dir(dir.path());
    fs::write(
        store.path(),
        "Tarea,Descripción,Fecha Creación,Fecha Límite,Estado\n\
         Informe,Mensual,2024-01-01,2024-01-31,Finalizada\n\
         Backup,,2024-01-02,2024-01-05,\n",
    )
    .unwrap();

    let dataset = store.load().unwrap();
    assert_eq!(dataset.get(0).unwrap().status, TaskStatus::Finished);
    assert_eq!(dataset.get(1).unwrap().status, TaskStatus::Pending);
    assert_eq!(dataset.get(1).unwrap().description, "");

    store.save(&dataset).unwrap();
    let raw = fs::read_to_string(store.path()).unwrap();
    assert!(raw.starts_with("Tarea,Descripción,Fecha Creación,Fecha Límite,Estado,Id\n"));
    assert!(raw.contains("Informe,Mensual,2024-01-01,2024-01-31,Finalizada,"));
    assert!(raw.contains("Backup,,2024-01-02,2024-01-05,Pendiente,"));
}

#[test]
fn service_lists_by_due_date_and_reopens_finished_tasks() {
    let dir = tempfile::tempdir().unwrap();
    let service = TaskService::new(CsvRecordStore::<Task>::in_dir(dir.path()));

    for (title, due, status) in [
        ("Later", (2024, 3, 1), TaskStatus::Pending),
        ("Sooner", (2024, 1, 10), TaskStatus::Finished),
        ("Middle", (2024, 2, 1), TaskStatus::InProgress),
    ] {
        let mut form = TaskForm {
            title: title.to_string(),
            due_date: NaiveDate::from_ymd_opt(due.0, due.1, due.2).unwrap(),
            status,
            ..TaskForm::default()
        };
        service.add(&mut form).unwrap();
    }

    let titles: Vec<String> = service
        .list_by_due_date()
        .unwrap()
        .into_iter()
        .map(|task| task.title)
        .collect();
    assert_eq!(titles, vec!["Sooner", "Middle", "Later"]);
    assert_eq!(service.editable_titles().unwrap(), vec!["Later", "Middle"]);

    service.set_status("Sooner", TaskStatus::Pending).unwrap();
    let summary = service.summary().unwrap();
    assert_eq!(summary.finished, 0);
    assert_eq!(summary.pending, 2);
}
