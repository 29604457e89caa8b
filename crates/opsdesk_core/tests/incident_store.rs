use opsdesk_core::{
    CsvRecordStore, Dataset, Incident, IncidentFields, IncidentForm, IncidentService,
    IncidentStatus, RecordStore, StorageError, StoreError, TableRecord,
};
use std::fs;

fn fields(name: &str, date: &str, description: &str, status: IncidentStatus) -> IncidentFields {
    IncidentFields {
        name: name.to_string(),
        date: date.to_string(),
        description: description.to_string(),
        status,
    }
}

#[test]
fn missing_file_loads_empty_dataset_with_canonical_columns() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvRecordStore::<Incident>::in_dir(dir.path());

    let dataset = store.load().unwrap();
    assert!(dataset.is_empty());
    assert_eq!(dataset.columns(), vec!["Name", "Date", "Incidencia", "Estado", "Id"]);
    assert!(!store.path().exists());
}

#[test]
fn append_save_load_returns_the_same_row() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvRecordStore::<Incident>::in_dir(dir.path());

    let mut dataset = store.load().unwrap();
    let incident = Incident::new(fields(
        "Ana",
        "2024-01-01",
        "Server down",
        IncidentStatus::Pending,
    ));
    dataset.append(incident.clone());
    store.save(&dataset).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded.get(0), Some(&incident));
    assert_eq!(&loaded.columns()[..4], &["Name", "Date", "Incidencia", "Estado"]);

    let raw = fs::read_to_string(store.path()).unwrap();
    let mut lines = raw.lines();
    assert_eq!(lines.next(), Some("Name,Date,Incidencia,Estado,Id"));
    assert_eq!(
        lines.next(),
        Some(format!("Ana,2024-01-01,Server down,Pendiente,{}", incident.id).as_str())
    );
}

#[test]
fn append_keeps_existing_rows_and_order() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvRecordStore::<Incident>::in_dir(dir.path());

    let mut dataset = Dataset::new();
    for name in ["a", "b", "c"] {
        dataset.append(Incident::new(fields(name, "2024-01-01", "x", IncidentStatus::Done)));
    }
    store.save(&dataset).unwrap();
    let before: Vec<Incident> = store.load().unwrap().records().cloned().collect();

    let mut dataset = store.load().unwrap();
    let added = Incident::new(fields("d", "2024-01-02", "y", IncidentStatus::InProgress));
    dataset.append(added.clone());
    store.save(&dataset).unwrap();

    let after: Vec<Incident> = store.load().unwrap().records().cloned().collect();
    assert_eq!(after.len(), 4);
    assert_eq!(&after[..3], before.as_slice());
    assert_eq!(after.last(), Some(&added));
}

#[test]
fn update_then_delete_persists_one_fewer_row() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvRecordStore::<Incident>::in_dir(dir.path());

    let mut dataset = Dataset::new();
    for name in ["a", "b", "c"] {
        dataset.append(Incident::new(fields(name, "2024-01-01", "x", IncidentStatus::Pending)));
    }
    store.save(&dataset).unwrap();

    let mut dataset = store.load().unwrap();
    let original_b = dataset.get(1).unwrap().clone();
    dataset
        .update_at(1, fields("b", "2024-05-05", "edited", IncidentStatus::Done))
        .unwrap();
    let removed = dataset.delete_at(1).unwrap();
    store.save(&dataset).unwrap();

    assert_eq!(removed.id, original_b.id);
    let names: Vec<String> = store
        .load()
        .unwrap()
        .records()
        .map(|incident| incident.name.clone())
        .collect();
    assert_eq!(names, vec!["a".to_string(), "c".to_string()]);
}

#[test]
fn legacy_file_without_status_or_id_is_backfilled() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvRecordStore::<Incident>::in_dir(dir.path());
    fs::write(
        store.path(),
        "Nombre,Fecha,Incidencia\nAna,2024-01-01 00:00:00,Server down\nLuis,2024-01-03,Printer jam\n",
    )
    .unwrap();

    let dataset = store.load().unwrap();
    assert_eq!(dataset.len(), 2);
    assert!(dataset.extra_columns().is_empty());
    for incident in dataset.records() {
        assert_eq!(incident.status, IncidentStatus::Pending);
        assert!(!incident.id.is_nil());
    }
    assert_eq!(dataset.get(0).unwrap().name, "Ana");
    assert_eq!(dataset.get(0).unwrap().date, "2024-01-01");

    store.save(&dataset).unwrap();
    let raw = fs::read_to_string(store.path()).unwrap();
    assert!(raw.starts_with("Name,Date,Incidencia,Estado,Id\n"));

    let reloaded = store.load().unwrap();
    assert_eq!(reloaded, dataset);
}

#[test]
fn unknown_columns_survive_mutation_and_save() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvRecordStore::<Incident>::in_dir(dir.path());
    fs::write(
        store.path(),
        "Name,Date,Incidencia,Estado,Owner\nAna,2024-01-01,Server down,En proceso,ops-team\n",
    )
    .unwrap();

    let mut dataset = store.load().unwrap();
    assert_eq!(dataset.extra_columns(), ["Owner".to_string()]);
    dataset.append(Incident::new(fields("Luis", "2024-01-02", "VPN", IncidentStatus::Pending)));
    store.save(&dataset).unwrap();

    let reloaded = store.load().unwrap();
    assert_eq!(
        reloaded.columns(),
        vec!["Name", "Date", "Incidencia", "Estado", "Id", "Owner"]
    );
    assert_eq!(reloaded.extra_value(0, "Owner"), Some("ops-team"));
    assert_eq!(reloaded.extra_value(1, "Owner"), Some(""));
    assert_eq!(reloaded.get(0).unwrap().status, IncidentStatus::InProgress);
}

#[test]
fn unknown_status_label_is_a_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvRecordStore::<Incident>::in_dir(dir.path());
    fs::write(
        store.path(),
        "Name,Date,Incidencia,Estado\nAna,2024-01-01,Server down,Pendiente\nLuis,2024-01-02,VPN,Archivada\n",
    )
    .unwrap();

    let err = store.load().unwrap_err();
    match err {
        StoreError::Storage(StorageError::InvalidData {
            position, message, ..
        }) => {
            assert_eq!(position, 1);
            assert!(message.contains("Archivada"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn ragged_rows_are_a_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvRecordStore::<Incident>::in_dir(dir.path());
    fs::write(
        store.path(),
        "Name,Date,Incidencia,Estado\nAna,2024-01-01\n",
    )
    .unwrap();

    assert!(matches!(
        store.load(),
        Err(StoreError::Storage(StorageError::Csv { .. }))
    ));
}

#[test]
fn save_creates_data_dir_and_leaves_no_temp_files() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("nested").join("data");
    let store = CsvRecordStore::<Incident>::in_dir(&data_dir);

    let mut dataset = Dataset::new();
    dataset.append(Incident::new(fields("Ana", "2024-01-01", "x", IncidentStatus::Pending)));
    store.save(&dataset).unwrap();
    store.save(&dataset).unwrap();

    let entries: Vec<String> = fs::read_dir(&data_dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries, vec![Incident::FILE_NAME.to_string()]);
}

#[test]
fn saving_empty_dataset_truncates_to_header() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvRecordStore::<Incident>::in_dir(dir.path());

    let mut dataset = Dataset::new();
    dataset.append(Incident::new(fields("Ana", "2024-01-01", "x", IncidentStatus::Pending)));
    store.save(&dataset).unwrap();

    let mut dataset = store.load().unwrap();
    dataset.delete_at(0).unwrap();
    store.save(&dataset).unwrap();

    assert_eq!(
        fs::read_to_string(store.path()).unwrap(),
        "Name,Date,Incidencia,Estado,Id\n"
    );
    let reloaded = store.load().unwrap();
    assert!(reloaded.is_empty());
    assert_eq!(reloaded.summarize().total, 0);
}

#[test]
fn status_only_edit_keeps_legacy_dates() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvRecordStore::<Incident>::in_dir(dir.path());
    fs::write(
        store.path(),
        "Name,Date,Incidencia,Estado\nAna,2024-01-01 13:45:00,Server down,Pendiente\nLuis,03/01/2024,Printer jam,Pendiente\n",
    )
    .unwrap();
    let service = IncidentService::new(store.clone());

    for position in 0..2 {
        let mut edit = IncidentForm::from_incident(&service.get(position).unwrap());
        edit.status = IncidentStatus::Done;
        service.modify(position, &edit).unwrap();
    }

    let dataset = store.load().unwrap();
    let dates: Vec<&str> = dataset.records().map(|incident| incident.date.as_str()).collect();
    assert_eq!(dates, vec!["2024-01-01 13:45:00", "03/01/2024"]);
    assert!(dataset
        .records()
        .all(|incident| incident.status == IncidentStatus::Done));
}

#[test]
fn ids_listed_from_file_without_id_column_resolve_before_first_save() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvRecordStore::<Incident>::in_dir(dir.path());
    let legacy = "Name,Date,Incidencia,Estado\nAna,2024-01-01,Server down,Pendiente\nAna,2024-01-01,Server down,Pendiente\nLuis,2024-01-03,Printer jam,En proceso\n";
    fs::write(store.path(), legacy).unwrap();
    let service = IncidentService::new(store.clone());

    let listed = service.list().unwrap();
    let ids: Vec<_> = listed.records().map(|incident| incident.id).collect();
    assert_ne!(ids[0], ids[1]);
    assert_eq!(fs::read_to_string(store.path()).unwrap(), legacy);
    assert_eq!(service.list().unwrap(), listed);

    let removed = service.delete_by_id(ids[1]).unwrap();
    assert_eq!(removed.id, ids[1]);

    let mut edit = IncidentForm::from_incident(&service.get(1).unwrap());
    edit.status = IncidentStatus::Done;
    service.modify_by_id(ids[2], &edit).unwrap();

    let remaining = store.load().unwrap();
    assert_eq!(remaining.len(), 2);
    assert_eq!(remaining.position_of(ids[0]), Some(0));
    assert_eq!(remaining.get(1).unwrap().id, ids[2]);
    assert_eq!(remaining.get(1).unwrap().status, IncidentStatus::Done);
}
