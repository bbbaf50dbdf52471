//! Column set types

use std::collections::BTreeSet;

use serde::Serialize;

/// The set of output column names, fixed between the two passes.
///
/// Iteration is always lexicographic, which is also the column order of
/// the output file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSet {
    names: BTreeSet<String>,
}

impl ColumnSet {
    /// Create an empty column set
    pub fn new() -> Self {
        Self {
            names: BTreeSet::new(),
        }
    }

    /// Add a column name; duplicates are absorbed
    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    /// True if the set holds this exact name
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True if no columns survived inference
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Lexicographic iteration over column names
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Drop every column whose name contains any of the given substrings,
    /// returning how many were removed. Matching is plain substring
    /// containment; names are only ever removed whole.
    pub fn exclude_containing(&mut self, substrings: &[String]) -> usize {
        if substrings.is_empty() {
            return 0;
        }
        let before = self.names.len();
        self.names
            .retain(|name| !substrings.iter().any(|s| name.contains(s.as_str())));
        before - self.names.len()
    }

    /// Column names in lexicographic order
    pub fn to_vec(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }
}

impl FromIterator<String> for ColumnSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a str> for ColumnSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(str::to_string).collect(),
        }
    }
}

/// Serializable summary of an inference pass, printed by the `columns`
/// subcommand in JSON mode
#[derive(Debug, Clone, Serialize)]
pub struct ColumnsReport {
    pub count: usize,
    pub columns: Vec<String>,
}

impl ColumnsReport {
    /// Build a report from a finished column set
    pub fn new(columns: &ColumnSet) -> Self {
        Self {
            count: columns.len(),
            columns: columns.to_vec(),
        }
    }
}
