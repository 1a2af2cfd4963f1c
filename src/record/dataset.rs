//! The per-run collection of inmate records
//!
//! Records are created from the roster page, updated in place while detail
//! pages are processed, and then frozen. Only [`DatasetBuilder`] can change
//! a record; [`Dataset`] is read-only.

use crate::record::inmate::{InmateDetail, InmateRecord};
use crate::LookupError;

/// Mutable dataset under construction
#[derive(Debug, Clone, Default)]
pub struct DatasetBuilder {
    records: Vec<InmateRecord>,
}

impl DatasetBuilder {
    /// Creates a builder holding the given rows, in order
    pub fn new(records: Vec<InmateRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[InmateRecord] {
        &self.records
    }

    /// Merges a parsed detail page into the row with the same inmate id
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The row was updated and its note cleared
    /// * `Err(LookupError::NotFound)` - No row has this id
    /// * `Err(LookupError::Ambiguous)` - More than one row has this id
    pub fn merge_detail(&mut self, detail: InmateDetail, url: &str) -> Result<(), LookupError> {
        let mut matches = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.inmate_id == detail.inmate_id)
            .map(|(ix, _)| ix);

        let ix = matches
            .next()
            .ok_or_else(|| LookupError::NotFound(detail.inmate_id.clone()))?;

        let extra = matches.count();
        if extra > 0 {
            return Err(LookupError::Ambiguous {
                inmate_id: detail.inmate_id,
                matches: extra + 1,
            });
        }

        tracing::debug!("Merging detail page for inmate {}", detail.inmate_id);
        self.records[ix].apply_detail(detail, url);
        Ok(())
    }

    /// Freezes the builder into an immutable dataset
    pub fn finish(self) -> Dataset {
        Dataset {
            records: self.records,
        }
    }
}

/// Finished, read-only dataset in roster order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<InmateRecord>,
}

impl Dataset {
    pub fn records(&self) -> &[InmateRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InmateRecord> {
        self.records.iter()
    }

    /// Number of records whose detail page was merged
    pub fn detail_count(&self) -> usize {
        self.records.iter().filter(|r| r.has_detail()).count()
    }
}

impl From<Vec<InmateRecord>> for Dataset {
    fn from(records: Vec<InmateRecord>) -> Self {
        Self { records }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::inmate::DETAIL_FAILED_NOTE;

    fn record(id: &str) -> InmateRecord {
        InmateRecord {
            inmate_id: id.to_string(),
            url: "http://example.com/roster.asp".to_string(),
            notes: DETAIL_FAILED_NOTE.to_string(),
            ..Default::default()
        }
    }

    fn detail(id: &str) -> InmateDetail {
        InmateDetail {
            inmate_id: id.to_string(),
            agency: "ATHENS-CLARKE COUNTY POLICE".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_merge_updates_matching_row_only() {
        let mut builder = DatasetBuilder::new(vec![record("1"), record("2"), record("3")]);

        builder
            .merge_detail(detail("2"), "http://example.com/detailsNEW.asp?id=2")
            .unwrap();

        let dataset = builder.finish();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.records()[0].notes, DETAIL_FAILED_NOTE);
        assert_eq!(dataset.records()[1].notes, "");
        assert_eq!(
            dataset.records()[1].url,
            "http://example.com/detailsNEW.asp?id=2"
        );
        assert_eq!(dataset.records()[1].agency, "ATHENS-CLARKE COUNTY POLICE");
        assert_eq!(dataset.records()[2].notes, DETAIL_FAILED_NOTE);
        assert_eq!(dataset.detail_count(), 1);
    }

    #[test]
    fn test_merge_unknown_id() {
        let mut builder = DatasetBuilder::new(vec![record("1")]);
        let result = builder.merge_detail(detail("9"), "http://example.com/d");
        assert_eq!(result, Err(LookupError::NotFound("9".to_string())));
        assert_eq!(builder.records()[0].notes, DETAIL_FAILED_NOTE);
    }

    #[test]
    fn test_merge_requires_exact_id() {
        let mut builder = DatasetBuilder::new(vec![record("12")]);
        let result = builder.merge_detail(detail("1"), "http://example.com/d");
        assert!(matches!(result, Err(LookupError::NotFound(_))));
    }

    #[test]
    fn test_merge_ambiguous_id() {
        let mut builder = DatasetBuilder::new(vec![record("1"), record("1")]);
        let result = builder.merge_detail(detail("1"), "http://example.com/d");
        assert_eq!(
            result,
            Err(LookupError::Ambiguous {
                inmate_id: "1".to_string(),
                matches: 2
            })
        );
        assert!(builder.records().iter().all(|r| !r.has_detail()));
    }

    #[test]
    fn test_finish_keeps_order() {
        let builder = DatasetBuilder::new(vec![record("b"), record("a"), record("c")]);
        let ids: Vec<_> = builder
            .finish()
            .iter()
            .map(|r| r.inmate_id.clone())
            .collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }
}
