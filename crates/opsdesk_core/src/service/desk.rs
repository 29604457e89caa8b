//! File-backed facade bundling the three services.

use super::incident_service::IncidentService;
use super::survey_service::SurveyService;
use super::task_service::TaskService;
use crate::config::StoreConfig;
use crate::model::incident::Incident;
use crate::model::survey::SatisfactionResponse;
use crate::model::task::Task;
use crate::store::{CsvRecordStore, RecordStore, StoreResult};
use crate::summary::Dashboard;
use log::info;

/// Builds the dashboard view from the incident and survey tables.
pub fn dashboard<I, S>(
    incidents: &IncidentService<I>,
    surveys: &SurveyService<S>,
) -> StoreResult<Dashboard>
where
    I: RecordStore<Incident>,
    S: RecordStore<SatisfactionResponse>,
{
    Ok(Dashboard {
        incidents: incidents.summary()?,
        satisfaction: surveys.summary()?,
    })
}

/// All services over CSV files in one data directory.
pub struct Desk {
    pub incidents: IncidentService<CsvRecordStore<Incident>>,
    pub surveys: SurveyService<CsvRecordStore<SatisfactionResponse>>,
    pub tasks: TaskService<CsvRecordStore<Task>>,
}

impl Desk {
    pub fn open(config: &StoreConfig) -> Self {
        info!(
            "event=desk_open module=service status=ok data_dir={}",
            config.data_dir.display()
        );
        Self {
            incidents: IncidentService::new(CsvRecordStore::in_dir(config.data_dir())),
            surveys: SurveyService::new(CsvRecordStore::in_dir(config.data_dir())),
            tasks: TaskService::new(CsvRecordStore::in_dir(config.data_dir())),
        }
    }

    pub fn dashboard(&self) -> StoreResult<Dashboard> {
        dashboard(&self.incidents, &self.surveys)
    }
}
