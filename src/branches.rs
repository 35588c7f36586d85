//! Branch-number directory for the department report.
//!
//! The department sheet names its subjects with branch labels; the numeric
//! identifier each label maps to is deployment data owned by the operator,
//! so the transform only sees the [`BranchDirectory`] contract and the
//! concrete table is loaded from a YAML file at startup.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ReportResult;

/// Resolves a branch label from the sheet into its numeric identifier.
pub trait BranchDirectory {
    fn branch_number(&self, label: &str) -> Option<u32>;
}

/// YAML-backed branch table:
///
/// ```yaml
/// branches:
///   営業１課: 101
///   営業２課: 102
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct BranchTable {
    #[serde(default)]
    branches: HashMap<String, u32>,
}

impl BranchTable {
    pub fn load<P: AsRef<Path>>(path: P) -> ReportResult<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    #[cfg(test)]
    pub(crate) fn from_entries(entries: &[(&str, u32)]) -> Self {
        Self {
            branches: entries
                .iter()
                .map(|(label, number)| (label.to_string(), *number))
                .collect(),
        }
    }
}

impl BranchDirectory for BranchTable {
    fn branch_number(&self, label: &str) -> Option<u32> {
        self.branches.get(label).copied()
    }
}
