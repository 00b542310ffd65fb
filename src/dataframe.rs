use std::fmt;

use chrono::NaiveDateTime;

use crate::datetime::{datetime_to_microseconds, microseconds_to_datetime};
use crate::errors::RustyWarpscriptError;
use crate::gts::{Gts, GtsSample, GtsValue};

/// Timestamps above one day past the epoch are shown as date times,
/// below they are kept as plain microsecond numbers. Same heuristic as
/// the servers' relative timestamps.
const DATETIME_THRESHOLD_MICROSECONDS: i64 = 86_400_000_000;

/// One cell of a [`DataFrame`].
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Long(i64),
    Double(f64),
    Bool(bool),
    Str(String),
    Timestamp(NaiveDateTime),
}

impl Cell {
    /// Null, or an empty string.
    fn is_blank(&self) -> bool {
        match self {
            Cell::Null => true,
            Cell::Str(string) => string.is_empty(),
            _ => false,
        }
    }

    /// The microsecond timestamp behind the cell, if it holds one.
    fn as_microseconds(&self) -> Option<i64> {
        match self {
            Cell::Long(long) => Some(*long),
            Cell::Timestamp(date_time) => Some(datetime_to_microseconds(&date_time.and_utc())),
            _ => None,
        }
    }

    fn render(&self) -> String {
        match self {
            Cell::Null => "null".to_string(),
            Cell::Long(long) => long.to_string(),
            Cell::Double(double) => double.to_string(),
            Cell::Bool(b) => b.to_string(),
            Cell::Str(string) => string.clone(),
            Cell::Timestamp(date_time) => date_time.to_string(),
        }
    }
}

impl From<&GtsValue> for Cell {
    fn from(value: &GtsValue) -> Self {
        match value {
            GtsValue::Long(long) => Cell::Long(*long),
            GtsValue::Double(double) => Cell::Double(*double),
            GtsValue::Bool(b) => Cell::Bool(*b),
            GtsValue::String(string) => Cell::Str(string.clone()),
        }
    }
}

/// A named column of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

/// A small column-oriented table, the tabular face of GTS results.
///
/// This is not a general purpose dataframe: it holds what a list of GTS
/// flattens to, and maps back to one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataFrame {
    columns: Vec<Column>,
}

impl DataFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of rows.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, |column| column.cells.len())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(|column| column.name.as_str())
            .collect()
    }

    pub fn cell(&self, name: &str, row: usize) -> Option<&Cell> {
        self.column(name).and_then(|column| column.cells.get(row))
    }

    /// The cells of one row, across all columns.
    pub fn row(&self, row: usize) -> Option<Vec<&Cell>> {
        if row >= self.len() {
            return None;
        }
        Some(self.columns.iter().map(|column| &column.cells[row]).collect())
    }

    /// Appends a column; all columns must stay the same height.
    pub fn push_column(&mut self, name: impl Into<String>, cells: Vec<Cell>) {
        self.columns.push(Column {
            name: name.into(),
            cells,
        });
    }

    fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|column| column.name == name)
    }

    /// Converts a timestamp in microseconds to a cell, going through a
    /// date time when the series is past the threshold.
    fn timestamp_cell(timestamp: i64, as_datetime: bool) -> Cell {
        if as_datetime {
            if let Some(date_time) = microseconds_to_datetime(timestamp) {
                return Cell::Timestamp(date_time);
            }
        }
        Cell::Long(timestamp)
    }

    /// Flattens a single GTS: `timestamps` and `values` columns, one
    /// constant column for the classname and one per label, geo columns
    /// when the series carries them.
    pub fn from_gts(gts: &Gts) -> Self {
        let mut frame = DataFrame::new();

        if gts.samples.is_empty() {
            // Nothing but the identity: a one-row frame
            frame.push_column("classname", vec![Cell::Str(gts.classname.clone())]);
            for (name, value) in &gts.labels {
                frame.push_column(name.clone(), vec![Cell::Str(value.clone())]);
            }
            return frame;
        }

        let as_datetime = gts.last_timestamp().unwrap_or(0) > DATETIME_THRESHOLD_MICROSECONDS;
        let height = gts.samples.len();

        frame.push_column(
            "timestamps",
            gts.samples
                .iter()
                .map(|sample| Self::timestamp_cell(sample.timestamp, as_datetime))
                .collect(),
        );
        frame.push_column(
            "values",
            gts.samples.iter().map(|sample| (&sample.value).into()).collect(),
        );
        if gts.has_geo() {
            frame.push_column(
                "latitude",
                gts.samples
                    .iter()
                    .map(|sample| sample.latitude.map_or(Cell::Null, Cell::Double))
                    .collect(),
            );
            frame.push_column(
                "longitude",
                gts.samples
                    .iter()
                    .map(|sample| sample.longitude.map_or(Cell::Null, Cell::Double))
                    .collect(),
            );
            frame.push_column(
                "elevation",
                gts.samples
                    .iter()
                    .map(|sample| sample.elevation.map_or(Cell::Null, Cell::Long))
                    .collect(),
            );
        }
        frame.push_column("classname", vec![Cell::Str(gts.classname.clone()); height]);
        for (name, value) in &gts.labels {
            frame.push_column(name.clone(), vec![Cell::Str(value.clone()); height]);
        }
        frame
    }

    /// Flattens a list of GTS into one frame: per-series frames are
    /// concatenated, rows sorted by timestamp, and columns that are
    /// blank everywhere dropped.
    pub fn from_lgts(series: &[Gts]) -> Self {
        let mut frame = DataFrame::new();
        for gts in series {
            frame.append(DataFrame::from_gts(gts));
        }
        frame.sort_by_timestamps();
        frame.drop_blank_columns();
        frame
    }

    /// Concatenates another frame below, filling missing columns with nulls.
    fn append(&mut self, other: DataFrame) {
        let height = self.len();
        let other_height = other.len();

        for other_column in other.columns {
            match self.column_mut(&other_column.name) {
                Some(column) => column.cells.extend(other_column.cells),
                None => {
                    let mut cells = vec![Cell::Null; height];
                    cells.extend(other_column.cells);
                    self.columns.push(Column {
                        name: other_column.name,
                        cells,
                    });
                }
            }
        }
        // Pad the columns the other frame didn't have
        for column in &mut self.columns {
            if column.cells.len() < height + other_height {
                column.cells.resize(height + other_height, Cell::Null);
            }
        }
    }

    fn sort_by_timestamps(&mut self) {
        let timestamps = match self.column("timestamps") {
            Some(column) => &column.cells,
            None => return,
        };
        let mut order: Vec<usize> = (0..timestamps.len()).collect();
        order.sort_by_key(|&row| timestamps[row].as_microseconds().unwrap_or(i64::MIN));

        for column in &mut self.columns {
            column.cells = order.iter().map(|&row| column.cells[row].clone()).collect();
        }
    }

    fn drop_blank_columns(&mut self) {
        self.columns
            .retain(|column| !column.cells.iter().all(Cell::is_blank));
    }

    /// The inverse mapping: groups the rows by every column that is
    /// neither the timestamp nor the value column, treating those as
    /// labels, and builds one GTS per group.
    pub fn to_gts_list(
        &self,
        timestamp_col: &str,
        value_col: &str,
    ) -> Result<Vec<Gts>, RustyWarpscriptError> {
        let timestamps = self
            .column(timestamp_col)
            .ok_or_else(|| RustyWarpscriptError::MissingColumn(timestamp_col.to_string()))?;
        let values = self
            .column(value_col)
            .ok_or_else(|| RustyWarpscriptError::MissingColumn(value_col.to_string()))?;

        let label_columns: Vec<&Column> = self
            .columns
            .iter()
            .filter(|column| column.name != timestamp_col && column.name != value_col)
            .collect();

        // When the value column has a name, it becomes the classname
        let classname = if value_col == "values" { "" } else { value_col };

        // Group rows by label tuple, in order of first appearance
        let mut groups: Vec<(Vec<String>, Gts)> = Vec::new();
        for row in 0..self.len() {
            let label_values: Vec<String> = label_columns
                .iter()
                .map(|column| column.cells[row].render())
                .collect();

            let index = match groups.iter().position(|(key, _)| *key == label_values) {
                Some(index) => index,
                None => {
                    let mut gts = Gts::new(classname);
                    for (column, value) in label_columns.iter().zip(&label_values) {
                        gts.labels.insert(column.name.clone(), value.clone());
                    }
                    groups.push((label_values, gts));
                    groups.len() - 1
                }
            };
            let group = &mut groups[index].1;

            let timestamp = timestamps.cells[row].as_microseconds().ok_or_else(|| {
                RustyWarpscriptError::MissingColumn(format!(
                    "`{}` is not a timestamp column",
                    timestamp_col
                ))
            })?;
            let value = match &values.cells[row] {
                Cell::Long(long) => GtsValue::Long(*long),
                Cell::Double(double) => GtsValue::Double(*double),
                Cell::Bool(b) => GtsValue::Bool(*b),
                Cell::Str(string) => GtsValue::String(string.clone()),
                Cell::Timestamp(date_time) => {
                    GtsValue::Long(datetime_to_microseconds(&date_time.and_utc()))
                }
                Cell::Null => continue,
            };
            group.samples.push(GtsSample::new(timestamp, value));
        }

        Ok(groups.into_iter().map(|(_, gts)| gts).collect())
    }
}

impl fmt::Display for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.column_names().join("\t"))?;
        for row in 0..self.len() {
            let cells: Vec<String> = self
                .columns
                .iter()
                .map(|column| column.cells[row].render())
                .collect();
            writeln!(f, "{}", cells.join("\t"))?;
        }
        Ok(())
    }
}
