//! Depth-ordered log table
//!
//! Three trajectory columns (`X_UTME`, `Y_UTMN`, `Z_TVDSS`) always come first,
//! followed by named logs. Every value is stored as `f64` with NaN as the
//! undefined marker; discrete logs hold integer codes in float storage and
//! carry a separate code record (code -> label). The large UNDEF sentinels
//! only appear in the typed copy produced by [`LogTable::filled`].

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::error::WellError;

// ============================================================================
// Column Names & Sentinels
// ============================================================================

/// Easting trajectory column
pub const X_UTME: &str = "X_UTME";
/// Northing trajectory column
pub const Y_UTMN: &str = "Y_UTMN";
/// True vertical depth subsea trajectory column
pub const Z_TVDSS: &str = "Z_TVDSS";
/// Trajectory columns in their fixed order
pub const TRAJECTORY: [&str; 3] = [X_UTME, Y_UTMN, Z_TVDSS];

/// Quasi measured depth, derived from geometry
pub const Q_MDEPTH: &str = "Q_MDEPTH";
/// Quasi inclination, derived from geometry
pub const Q_INCL: &str = "Q_INCL";
/// Horizontal length relative to the first sample
pub const R_HLEN: &str = "R_HLEN";

/// Continuous fill value for typed export
pub const UNDEF: f64 = 10e32;
/// Values above this are treated as undefined continuous values
pub const UNDEF_LIMIT: f64 = 9.9e32;
/// Discrete fill value for typed export
pub const UNDEF_INT: i32 = 2_000_000_000;
/// Values above this are treated as undefined discrete values
pub const UNDEF_INT_LIMIT: i32 = 1_999_999_999;

// ============================================================================
// Log Types & Code Records
// ============================================================================

/// Kind of a log channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogType {
    /// Real-valued measurement
    #[serde(alias = "CONT")]
    Continuous,
    /// Integer-coded category
    #[serde(alias = "DISC")]
    Discrete,
}

/// Code -> label mapping owned by a discrete log
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeRecord(BTreeMap<i32, String>);

impl CodeRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: i32, label: impl Into<String>) -> Option<String> {
        self.0.insert(code, label.into())
    }

    /// Label for a code, `None` when the code is unmapped
    pub fn label(&self, code: i32) -> Option<&str> {
        self.0.get(&code).map(String::as_str)
    }

    /// Codes in ascending order
    pub fn codes(&self) -> Vec<i32> {
        self.0.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(i32, S)> for CodeRecord {
    fn from_iter<I: IntoIterator<Item = (i32, S)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

/// Round a stored discrete value to its integer code, `None` if undefined
pub fn to_code(value: f64) -> Option<i32> {
    if value.is_nan() {
        None
    } else {
        Some(value.round() as i32)
    }
}

// ============================================================================
// Log Table
// ============================================================================

/// Depth-ordered table of trajectory columns and named logs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogTable {
    names: Vec<String>,
    types: Vec<LogType>,
    #[serde(with = "nan_as_null")]
    columns: Vec<Vec<f64>>,
    #[serde(default)]
    records: HashMap<String, CodeRecord>,
}

impl LogTable {
    /// Create a table from the three trajectory columns.
    pub fn new(x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> Result<Self, WellError> {
        let n = x.len();
        for (name, col) in [(Y_UTMN, &y), (Z_TVDSS, &z)] {
            if col.len() != n {
                return Err(WellError::LengthMismatch {
                    name: name.to_string(),
                    expected: n,
                    actual: col.len(),
                });
            }
        }
        Ok(Self {
            names: TRAJECTORY.iter().map(|s| (*s).to_string()).collect(),
            types: vec![LogType::Continuous; 3],
            columns: vec![x, y, z],
            records: HashMap::new(),
        })
    }

    /// Check structural invariants of a table that did not come through
    /// [`LogTable::new`] (e.g. one deserialized from an importer).
    pub fn validate(&self) -> Result<(), WellError> {
        let ncol = self.names.len();
        if self.types.len() != ncol || self.columns.len() != ncol {
            return Err(WellError::InvalidArgument(format!(
                "table has {} names, {} types and {} columns",
                ncol,
                self.types.len(),
                self.columns.len()
            )));
        }
        if ncol < TRAJECTORY.len()
            || self.names[..TRAJECTORY.len()]
                .iter()
                .zip(TRAJECTORY)
                .any(|(n, t)| n != t)
        {
            return Err(WellError::InvalidArgument(
                "first three columns must be X_UTME, Y_UTMN, Z_TVDSS".to_string(),
            ));
        }
        if self.types[..TRAJECTORY.len()]
            .iter()
            .any(|t| *t != LogType::Continuous)
        {
            return Err(WellError::InvalidArgument(
                "trajectory columns must be continuous".to_string(),
            ));
        }
        for (i, name) in self.names.iter().enumerate() {
            if self.names[..i].contains(name) {
                return Err(WellError::DuplicateLog(name.clone()));
            }
            self.check_len(name, &self.columns[i])?;
        }
        Ok(())
    }

    /// Number of rows (samples)
    pub fn nrow(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Number of columns including the trajectory
    pub fn ncol(&self) -> usize {
        self.columns.len()
    }

    /// Number of logs excluding the trajectory
    pub fn nlogs(&self) -> usize {
        self.columns.len() - TRAJECTORY.len()
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    fn is_trajectory(name: &str) -> bool {
        TRAJECTORY.contains(&name)
    }

    /// Column values by name, `None` if no such column.
    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.index_of(name).map(|i| self.columns[i].as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    pub fn x(&self) -> &[f64] {
        &self.columns[0]
    }

    pub fn y(&self) -> &[f64] {
        &self.columns[1]
    }

    pub fn z(&self) -> &[f64] {
        &self.columns[2]
    }

    /// Log type by name, `None` if no such column
    pub fn log_type(&self, name: &str) -> Option<LogType> {
        self.index_of(name).map(|i| self.types[i])
    }

    /// Column names in table order, trajectory included only on request
    pub fn log_names(&self, include_trajectory: bool) -> Vec<&str> {
        let skip = if include_trajectory { 0 } else { TRAJECTORY.len() };
        self.names.iter().skip(skip).map(String::as_str).collect()
    }

    fn check_len(&self, name: &str, values: &[f64]) -> Result<(), WellError> {
        if values.len() != self.nrow() {
            return Err(WellError::LengthMismatch {
                name: name.to_string(),
                expected: self.nrow(),
                actual: values.len(),
            });
        }
        Ok(())
    }

    /// Append a new log. Discrete logs start with an empty code record.
    pub fn add_log(
        &mut self,
        name: &str,
        log_type: LogType,
        values: Vec<f64>,
    ) -> Result<(), WellError> {
        if Self::is_trajectory(name) {
            return Err(WellError::ReservedLog(name.to_string()));
        }
        if self.contains(name) {
            return Err(WellError::DuplicateLog(name.to_string()));
        }
        self.check_len(name, &values)?;
        self.names.push(name.to_string());
        self.types.push(log_type);
        self.columns.push(values);
        if log_type == LogType::Discrete {
            self.records.insert(name.to_string(), CodeRecord::new());
        }
        Ok(())
    }

    /// Insert or replace a log, keeping its column position on replace.
    pub fn set_log(
        &mut self,
        name: &str,
        log_type: LogType,
        values: Vec<f64>,
    ) -> Result<(), WellError> {
        if Self::is_trajectory(name) {
            return Err(WellError::ReservedLog(name.to_string()));
        }
        match self.index_of(name) {
            Some(i) => {
                self.check_len(name, &values)?;
                self.types[i] = log_type;
                self.columns[i] = values;
                match log_type {
                    LogType::Discrete => {
                        self.records.entry(name.to_string()).or_default();
                    }
                    LogType::Continuous => {
                        self.records.remove(name);
                    }
                }
                Ok(())
            }
            None => self.add_log(name, log_type, values),
        }
    }

    /// Remove a log and its record. Returns the removed values.
    pub fn remove_log(&mut self, name: &str) -> Result<Vec<f64>, WellError> {
        if Self::is_trajectory(name) {
            return Err(WellError::ReservedLog(name.to_string()));
        }
        let i = self
            .index_of(name)
            .ok_or_else(|| WellError::UnknownLog(name.to_string()))?;
        self.names.remove(i);
        self.types.remove(i);
        self.records.remove(name);
        Ok(self.columns.remove(i))
    }

    /// Code record of a discrete log, `None` for unknown or continuous logs
    pub fn record(&self, name: &str) -> Option<&CodeRecord> {
        self.records.get(name)
    }

    /// Replace the code record of a discrete log.
    pub fn set_record(&mut self, name: &str, record: CodeRecord) -> Result<(), WellError> {
        match self.log_type(name) {
            None => Err(WellError::UnknownLog(name.to_string())),
            Some(LogType::Continuous) => Err(WellError::RecordNotSettable(name.to_string())),
            Some(LogType::Discrete) => {
                self.records.insert(name.to_string(), record);
                Ok(())
            }
        }
    }

    /// Label of a stored value in a discrete log. Unmapped or undefined
    /// codes yield `None`.
    pub fn decode(&self, name: &str, value: f64) -> Option<&str> {
        let code = to_code(value)?;
        self.records.get(name)?.label(code)
    }

    /// New table holding the given rows in the given order
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        Self {
            names: self.names.clone(),
            types: self.types.clone(),
            columns: self
                .columns
                .iter()
                .map(|col| indices.iter().map(|&i| col[i]).collect())
                .collect(),
            records: self.records.clone(),
        }
    }

    /// New table with the rows for which `keep(row_index)` holds
    pub fn filter_rows<F: Fn(usize) -> bool>(&self, keep: F) -> Self {
        let indices: Vec<usize> = (0..self.nrow()).filter(|&i| keep(i)).collect();
        self.select_rows(&indices)
    }

    /// Coarsen by keeping every `interval`th row. With `keep_last` the final
    /// row is retained even when it is off the stride, so the well is not
    /// shortened.
    pub fn resample(&self, interval: usize, keep_last: bool) -> Result<Self, WellError> {
        if interval == 0 {
            return Err(WellError::InvalidArgument(
                "resample interval must be >= 1".to_string(),
            ));
        }
        let indices = stride_indices(self.nrow(), interval, keep_last);
        Ok(self.select_rows(&indices))
    }

    /// Typed copy with undefined values replaced by the UNDEF sentinels.
    ///
    /// Continuous columns keep `f64` storage; discrete columns are rounded
    /// into `i32` storage. The receiver is not modified.
    pub fn filled(&self) -> FilledTable {
        let columns = self
            .types
            .iter()
            .zip(&self.columns)
            .map(|(t, col)| match t {
                LogType::Continuous => FilledColumn::Continuous(
                    col.iter()
                        .map(|&v| if v.is_nan() { UNDEF } else { v })
                        .collect(),
                ),
                LogType::Discrete => FilledColumn::Discrete(
                    col.iter()
                        .map(|&v| to_code(v).unwrap_or(UNDEF_INT))
                        .collect(),
                ),
            })
            .collect();
        FilledTable {
            names: self.names.clone(),
            columns,
        }
    }
}

/// JSON has no NaN; undefined values travel as `null`.
mod nan_as_null {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(columns: &[Vec<f64>], serializer: S) -> Result<S::Ok, S::Error> {
        let opt: Vec<Vec<Option<f64>>> = columns
            .iter()
            .map(|col| col.iter().map(|v| (!v.is_nan()).then_some(*v)).collect())
            .collect();
        opt.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Vec<f64>>, D::Error> {
        let opt = Vec::<Vec<Option<f64>>>::deserialize(deserializer)?;
        Ok(opt
            .into_iter()
            .map(|col| col.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
            .collect())
    }
}

/// Row indices `0, n, 2n, ...` plus, optionally, the last row.
pub(crate) fn stride_indices(len: usize, every: usize, keep_last: bool) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..len).step_by(every.max(1)).collect();
    if keep_last && len > 0 && indices.last() != Some(&(len - 1)) {
        indices.push(len - 1);
    }
    indices
}

// ============================================================================
// Filled (typed) Table
// ============================================================================

/// A typed column after undefined-value filling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "UPPERCASE")]
pub enum FilledColumn {
    Continuous(Vec<f64>),
    Discrete(Vec<i32>),
}

impl FilledColumn {
    pub fn len(&self) -> usize {
        match self {
            Self::Continuous(v) => v.len(),
            Self::Discrete(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn log_type(&self) -> LogType {
        match self {
            Self::Continuous(_) => LogType::Continuous,
            Self::Discrete(_) => LogType::Discrete,
        }
    }

    pub fn as_continuous(&self) -> Option<&[f64]> {
        match self {
            Self::Continuous(v) => Some(v),
            Self::Discrete(_) => None,
        }
    }

    pub fn as_discrete(&self) -> Option<&[i32]> {
        match self {
            Self::Discrete(v) => Some(v),
            Self::Continuous(_) => None,
        }
    }

    fn select(&self, indices: &[usize]) -> Self {
        match self {
            Self::Continuous(v) => Self::Continuous(indices.iter().map(|&i| v[i]).collect()),
            Self::Discrete(v) => Self::Discrete(indices.iter().map(|&i| v[i]).collect()),
        }
    }
}

/// Typed copy of a [`LogTable`] with sentinels in place of NaN
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilledTable {
    pub names: Vec<String>,
    pub columns: Vec<FilledColumn>,
}

impl FilledTable {
    pub fn nrow(&self) -> usize {
        self.columns.first().map_or(0, FilledColumn::len)
    }

    pub fn ncol(&self) -> usize {
        self.columns.len()
    }

    pub fn get(&self, name: &str) -> Option<&FilledColumn> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| &self.columns[i])
    }

    pub fn push(&mut self, name: &str, column: FilledColumn) {
        self.names.push(name.to_string());
        self.columns.push(column);
    }

    /// New table holding the given rows in the given order
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        Self {
            names: self.names.clone(),
            columns: self.columns.iter().map(|c| c.select(indices)).collect(),
        }
    }

    /// Keep only the named columns, in the order they appear in the table
    pub fn retain_columns(&mut self, keep: &[&str]) {
        let mut names = Vec::new();
        let mut columns = Vec::new();
        for (name, col) in self.names.drain(..).zip(self.columns.drain(..)) {
            if keep.contains(&name.as_str()) {
                names.push(name);
                columns.push(col);
            }
        }
        self.names = names;
        self.columns = columns;
    }
}

// ============================================================================
// Tests
// ============================================================================
