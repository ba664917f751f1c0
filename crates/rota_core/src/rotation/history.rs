//! Append-only history of archived periods, newest first.

use crate::model::record::BiweeklyRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryLog {
    records: Vec<BiweeklyRecord>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a log from records already ordered newest first.
    pub fn from_newest_first(records: Vec<BiweeklyRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Most recently archived period.
    pub fn latest(&self) -> Option<&BiweeklyRecord> {
        self.records.first()
    }

    /// Record at `index`, where 0 is the newest.
    pub fn get(&self, index: usize) -> Option<&BiweeklyRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BiweeklyRecord> {
        self.records.iter()
    }

    pub(crate) fn prepend(&mut self, record: BiweeklyRecord) -> &BiweeklyRecord {
        self.records.insert(0, record);
        &self.records[0]
    }
}
