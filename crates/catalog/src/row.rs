use std::fmt;

/// Identity of a recommendation catalog.
///
/// [`CatalogId::ALL`] is the scan order: CVR rows are considered before
/// common rows, so on equal similarity scores the CVR catalog wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogId {
    /// CVR rules exported from Oracle EBS.
    Cvr,
    /// Common employee load error recommendations.
    Common,
}

impl CatalogId {
    pub const ALL: [CatalogId; 2] = [CatalogId::Cvr, CatalogId::Common];

    pub const fn as_str(self) -> &'static str {
        match self {
            CatalogId::Cvr => "cvr",
            CatalogId::Common => "common",
        }
    }

    /// CSV column holding the error-pattern text.
    pub const fn pattern_column(self) -> &'static str {
        match self {
            CatalogId::Cvr => "ERROR_MESSAGE_TEXT",
            CatalogId::Common => "ERROR_MESSAGE",
        }
    }

    /// CSV column holding the remediation text.
    pub const fn recommendation_column(self) -> &'static str {
        match self {
            CatalogId::Cvr => "RECOMMENDATIONS1",
            CatalogId::Common => "RECOMMENDATIONS",
        }
    }

    /// Default object key under the catalog source root.
    pub const fn default_key(self) -> &'static str {
        match self {
            CatalogId::Cvr => "recommendations/cvr_lines.csv",
            CatalogId::Common => "recommendations/common_errors.csv",
        }
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One catalog entry, kept as stored in the source file. Normalization for
/// comparison happens at match time, not at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRow {
    pub catalog: CatalogId,
    pub pattern: String,
    pub recommendation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_order_is_cvr_first() {
        assert_eq!(CatalogId::ALL, [CatalogId::Cvr, CatalogId::Common]);
    }

    #[test]
    fn column_mappings_differ_per_catalog() {
        assert_eq!(CatalogId::Cvr.pattern_column(), "ERROR_MESSAGE_TEXT");
        assert_eq!(CatalogId::Cvr.recommendation_column(), "RECOMMENDATIONS1");
        assert_eq!(CatalogId::Common.pattern_column(), "ERROR_MESSAGE");
        assert_eq!(CatalogId::Common.recommendation_column(), "RECOMMENDATIONS");
    }
}
