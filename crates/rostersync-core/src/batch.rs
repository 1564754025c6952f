//! Import batch assembly.
//!
//! Raw roster rows become [`ImportRecord`]s here: the field fixups the
//! engine depends on are applied (first address of a semicolon-separated
//! e-mail list, `"0"` sentinel clearing), group labels are canonicalized
//! into the batch-wide [`GroupCatalog`], and login uniqueness is enforced
//! before anything reaches the engine.

use std::collections::{BTreeSet, HashSet};

use crate::catalog::GroupCatalog;
use crate::error::{BatchError, Result};
use crate::ids::Login;
use crate::normalize::normalize_group_field;
use crate::record::ImportRecord;

/// One roster row as extracted from the tabular source, before any
/// normalization.
#[derive(Debug, Clone, Default)]
pub struct RawImportRow {
    /// 1-based source line number, for error reporting.
    pub line: usize,
    pub login: String,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub telephone_number: String,
    pub mobile_telephone_number: String,
    /// The raw separator-delimited group membership field.
    pub groups: String,
}

impl RawImportRow {
    /// Create a row with the given line number and login.
    pub fn new(line: usize, login: impl Into<String>) -> Self {
        Self {
            line,
            login: login.into(),
            ..Self::default()
        }
    }

    pub fn with_first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = value.into();
        self
    }

    pub fn with_last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = value.into();
        self
    }

    pub fn with_email(mut self, value: impl Into<String>) -> Self {
        self.email_address = value.into();
        self
    }

    pub fn with_phone(mut self, value: impl Into<String>) -> Self {
        self.telephone_number = value.into();
        self
    }

    pub fn with_mobile(mut self, value: impl Into<String>) -> Self {
        self.mobile_telephone_number = value.into();
        self
    }

    pub fn with_groups(mut self, value: impl Into<String>) -> Self {
        self.groups = value.into();
        self
    }
}

/// A validated import batch: normalized records in source order plus the
/// group catalog accumulated while normalizing them.
#[derive(Debug, Clone, Default)]
pub struct ImportBatch {
    records: Vec<ImportRecord>,
    catalog: GroupCatalog,
}

impl ImportBatch {
    /// Build a batch from raw rows.
    ///
    /// Applies the pre-engine fixups, canonicalizes group fields with
    /// `separator`, and rejects the whole batch on an empty or duplicate
    /// login.
    pub fn from_rows(rows: Vec<RawImportRow>, separator: char) -> Result<Self> {
        let mut records = Vec::with_capacity(rows.len());
        let mut catalog = GroupCatalog::new();
        let mut seen: HashSet<Login> = HashSet::with_capacity(rows.len());

        for row in rows {
            let login = Login::new(row.login.trim());
            if login.is_empty() {
                return Err(BatchError::EmptyLogin { line: row.line });
            }
            if !seen.insert(login.clone()) {
                return Err(BatchError::DuplicateLogin {
                    login,
                    line: row.line,
                });
            }

            let mut groups = BTreeSet::new();
            for (id, label) in normalize_group_field(&row.groups, separator) {
                catalog.record(id.clone(), label);
                groups.insert(id);
            }

            records.push(ImportRecord {
                login,
                first_name: row.first_name,
                last_name: row.last_name,
                email_address: fix_email(&row.email_address),
                telephone_number: fix_zero_sentinel(&row.telephone_number),
                mobile_telephone_number: fix_zero_sentinel(&row.mobile_telephone_number),
                groups,
            });
        }

        Ok(Self { records, catalog })
    }

    /// The records in source order.
    #[must_use]
    pub fn records(&self) -> &[ImportRecord] {
        &self.records
    }

    /// The group catalog accumulated over the whole batch.
    #[must_use]
    pub fn catalog(&self) -> &GroupCatalog {
        &self.catalog
    }

    /// Number of records in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the batch has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The logins of all records, in source order.
    pub fn logins(&self) -> impl Iterator<Item = &Login> {
        self.records.iter().map(|r| &r.login)
    }
}

/// Reduce a multi-address e-mail field to its first address, then apply
/// the `"0"` sentinel rule.
fn fix_email(raw: &str) -> String {
    let first = match raw.split_once(';') {
        Some((first, _)) => first,
        None => raw,
    };
    fix_zero_sentinel(first)
}

/// A trimmed `"0"` means "no value" in the roster export.
fn fix_zero_sentinel(raw: &str) -> String {
    if raw.trim() == "0" {
        String::new()
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::GroupId;

    #[test]
    fn test_batch_preserves_row_order() {
        let rows = vec![
            RawImportRow::new(2, "alice"),
            RawImportRow::new(3, "bob"),
            RawImportRow::new(4, "carol"),
        ];
        let batch = ImportBatch::from_rows(rows, '/').unwrap();
        let logins: Vec<&str> = batch.logins().map(Login::as_str).collect();
        assert_eq!(logins, vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn test_duplicate_login_rejects_batch() {
        let rows = vec![
            RawImportRow::new(2, "jdoe"),
            RawImportRow::new(3, "jdoe"),
        ];
        let err = ImportBatch::from_rows(rows, '/').unwrap_err();
        assert_eq!(
            err,
            BatchError::DuplicateLogin {
                login: Login::new("jdoe"),
                line: 3
            }
        );
    }

    #[test]
    fn test_login_is_trimmed_before_uniqueness_check() {
        let rows = vec![
            RawImportRow::new(2, "jdoe "),
            RawImportRow::new(3, " jdoe"),
        ];
        assert!(ImportBatch::from_rows(rows, '/').is_err());
    }

    #[test]
    fn test_empty_login_rejects_batch() {
        let rows = vec![RawImportRow::new(5, "  ")];
        let err = ImportBatch::from_rows(rows, '/').unwrap_err();
        assert_eq!(err, BatchError::EmptyLogin { line: 5 });
    }

    #[test]
    fn test_email_reduced_to_first_address() {
        let rows = vec![RawImportRow::new(2, "jdoe")
            .with_email("a@example.com;b@example.com;c@example.com")];
        let batch = ImportBatch::from_rows(rows, '/').unwrap();
        assert_eq!(batch.records()[0].email_address, "a@example.com");
    }

    #[test]
    fn test_zero_sentinel_cleared() {
        let rows = vec![RawImportRow::new(2, "jdoe")
            .with_email("0")
            .with_phone(" 0 ")
            .with_mobile("+49 151 0000")];
        let batch = ImportBatch::from_rows(rows, '/').unwrap();
        let record = &batch.records()[0];
        assert_eq!(record.email_address, "");
        assert_eq!(record.telephone_number, "");
        assert_eq!(record.mobile_telephone_number, "+49 151 0000");
    }

    #[test]
    fn test_groups_are_canonicalized_and_catalogued() {
        let rows = vec![
            RawImportRow::new(2, "alice").with_groups("Büro/Team"),
            RawImportRow::new(3, "bob").with_groups("BÜRO"),
        ];
        let batch = ImportBatch::from_rows(rows, '/').unwrap();
        assert!(batch.records()[0].groups.contains(&GroupId::new("buero")));
        assert!(batch.records()[0].groups.contains(&GroupId::new("team")));
        assert!(batch.records()[1].groups.contains(&GroupId::new("buero")));
        // First label across the batch wins.
        assert_eq!(batch.catalog().description("buero"), Some("Büro"));
    }

    #[test]
    fn test_catalog_round_trip() {
        // Any label that yields a non-empty id is answerable in the catalog.
        let rows = vec![RawImportRow::new(2, "alice").with_groups("Café-Team/R&D")];
        let batch = ImportBatch::from_rows(rows, '/').unwrap();
        for id in &batch.records()[0].groups {
            assert!(batch.catalog().description(id.as_str()).is_some());
        }
    }

    #[test]
    fn test_unreducible_group_field_contributes_nothing() {
        let rows = vec![RawImportRow::new(2, "alice").with_groups("!!!")];
        let batch = ImportBatch::from_rows(rows, '/').unwrap();
        assert!(batch.records()[0].groups.is_empty());
        assert!(batch.catalog().is_empty());
    }
}
