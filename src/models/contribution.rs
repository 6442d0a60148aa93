use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRecord {
    pub person: String,
    pub repository: String,
    pub contributions: u64,
}

/// Records in discovery order: members in enumeration order, repositories in
/// listing order. Only positive counts are ever stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContributionTable {
    records: Vec<ContributionRecord>,
}

impl ContributionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends every repository resolved for one member. Zero counts are dropped.
    pub fn append_member(&mut self, person: &str, repos: Vec<(String, u64)>) {
        self.records.extend(
            repos
                .into_iter()
                .filter(|(_, count)| *count > 0)
                .map(|(repository, contributions)| ContributionRecord {
                    person: person.to_string(),
                    repository,
                    contributions,
                }),
        );
    }

    pub fn records(&self) -> &[ContributionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContributionRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a ContributionTable {
    type Item = &'a ContributionRecord;
    type IntoIter = std::slice::Iter<'a, ContributionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedMember {
    pub login: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub organization: String,
    pub table: ContributionTable,
    pub skipped: Vec<SkippedMember>,
}
