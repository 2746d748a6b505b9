use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::dates::{parse_date, IntoDate};
use crate::error::{GanttError, Result};
use crate::model::{Activity, Status};
use crate::workbook;

/// Typed update request: each `Some` field overwrites the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityUpdate {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub person: Option<String>,
    pub status: Option<Status>,
}

impl ActivityUpdate {
    /// Build an update from untyped `key=value` pairs.
    ///
    /// Keys match the field names or the workbook column headers, ignoring
    /// case. Unknown keys are logged and returned so the caller can report
    /// them; the remaining keys still apply. Unparseable dates or statuses
    /// are errors.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<(Self, Vec<String>)>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut update = Self::default();
        let mut ignored = Vec::new();
        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            match key.to_ascii_lowercase().replace('_', "").as_str() {
                "name" => update.name = Some(value.to_string()),
                "startdate" | "start" => update.start_date = Some(parse_date(value)?),
                "enddate" | "end" => update.end_date = Some(parse_date(value)?),
                "person" => update.person = Some(value.to_string()),
                "status" => update.status = Some(Status::parse(value)?),
                _ => {
                    warn!(field = key, "ignoring unknown activity field");
                    ignored.push(key.to_string());
                }
            }
        }
        Ok((update, ignored))
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn apply(&self, activity: &mut Activity) {
        if let Some(name) = &self.name {
            activity.name.clone_from(name);
        }
        if let Some(start) = self.start_date {
            activity.start_date = start;
        }
        if let Some(end) = self.end_date {
            activity.end_date = end;
        }
        if let Some(person) = &self.person {
            activity.person.clone_from(person);
        }
        if let Some(status) = self.status {
            activity.status = status;
        }
    }
}

/// In-memory, insertion-ordered table of activities.
#[derive(Debug, Clone, Default)]
pub struct ActivityStore {
    activities: Vec<Activity>,
}

impl ActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing records, e.g. ones read back from a
    /// workbook. Every record must be valid and ids must be unique.
    pub fn from_activities(activities: Vec<Activity>) -> Result<Self> {
        let mut seen = HashSet::new();
        for activity in &activities {
            activity.validate()?;
            if !seen.insert(activity.id) {
                return Err(GanttError::DuplicateId(activity.id));
            }
        }
        Ok(Self { activities })
    }

    /// Load the workbook at `path`, or start empty if it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no workbook yet, starting empty");
            return Ok(Self::new());
        }
        let store = Self::from_activities(workbook::import(path)?)?;
        debug!(path = %path.display(), count = store.len(), "loaded workbook");
        Ok(store)
    }

    /// Write all activities to the workbook at `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        workbook::export(&self.activities, path)?;
        Ok(())
    }

    fn next_id(&self) -> Result<u32> {
        match self.activities.iter().map(|a| a.id).max() {
            None => Ok(1),
            Some(max) => max
                .checked_add(1)
                .ok_or_else(|| GanttError::validation("activity id space exhausted")),
        }
    }

    fn position(&self, id: u32) -> Option<usize> {
        self.activities.iter().position(|a| a.id == id)
    }

    /// Add an activity and return its id. Dates may be date values or
    /// parseable strings. Rejects blank names/persons and ranges where the
    /// end is not after the start.
    pub fn add(
        &mut self,
        name: &str,
        start_date: impl IntoDate,
        end_date: impl IntoDate,
        person: &str,
        status: Status,
    ) -> Result<u32> {
        let activity = Activity {
            id: self.next_id()?,
            name: name.to_string(),
            start_date: start_date.into_date()?,
            end_date: end_date.into_date()?,
            person: person.to_string(),
            status,
        };
        activity.validate()?;
        let id = activity.id;
        debug!(id, activity = name, person, "added activity");
        self.activities.push(activity);
        Ok(id)
    }

    /// Apply `update` to activity `id`. Returns `Ok(false)` if there is no
    /// such activity. If the updated record would be invalid, nothing is
    /// changed and the validation error is returned.
    pub fn update(&mut self, id: u32, update: &ActivityUpdate) -> Result<bool> {
        let Some(idx) = self.position(id) else {
            warn!(id, "activity not found");
            return Ok(false);
        };
        let mut updated = self.activities[idx].clone();
        update.apply(&mut updated);
        updated.validate()?;
        self.activities[idx] = updated;
        debug!(id, "updated activity");
        Ok(true)
    }

    /// Remove activity `id`. Returns false if there is no such activity.
    pub fn delete(&mut self, id: u32) -> bool {
        let Some(idx) = self.position(id) else {
            warn!(id, "activity not found");
            return false;
        };
        self.activities.remove(idx);
        debug!(id, "deleted activity");
        true
    }

    pub fn get(&self, id: u32) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == id)
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Distinct persons in first-seen order.
    pub fn unique_persons(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.activities
            .iter()
            .filter(|a| seen.insert(a.person.as_str()))
            .map(|a| a.person.clone())
            .collect()
    }

    pub fn activities_for(&self, person: &str) -> Vec<&Activity> {
        self.activities.iter().filter(|a| a.person == person).collect()
    }
}
