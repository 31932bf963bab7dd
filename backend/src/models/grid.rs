// ============================================================================
// Timetable dataset parsing
// ============================================================================
//
// The solver side delivers one JSON object per generation request:
//
//   { "<TableId>": { "Day": [<slot>, ...], "<DayName>": [<cell>, ...], ... }, ... }
//
// Key order is significant (arrival order of tables, input order of days), so
// parsing goes through `serde_json::Map` with `preserve_order` enabled.

use crate::api::TableId;
use crate::error::{TimetableError, TimetableResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Reserved grid key holding the time-slot column headers.
pub const DAY_HEADER_KEY: &str = "Day";

/// Text of one JSON cell.
///
/// `null` and `false` become empty, scalars their JSON text, nested values
/// their compact JSON encoding.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(true) => "true".to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Day-by-timeslot matrix for one generated table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimetableGrid {
    headers: Option<Vec<String>>,
    rows: Vec<(String, Vec<String>)>,
}

impl TimetableGrid {
    /// Create an empty grid with the given time-slot headers.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: Some(headers.into_iter().map(Into::into).collect()),
            rows: Vec::new(),
        }
    }

    /// Append (or replace) the row for `day`.
    pub fn with_day<I, S>(mut self, day: impl Into<String>, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert_day(day.into(), cells.into_iter().map(Into::into).collect());
        self
    }

    fn insert_day(&mut self, day: String, cells: Vec<String>) {
        match self.rows.iter_mut().find(|(name, _)| *name == day) {
            Some(existing) => existing.1 = cells,
            None => self.rows.push((day, cells)),
        }
    }

    /// Build a grid from one JSON object.
    pub fn from_value(value: &Value) -> Result<Self, String> {
        let object = value
            .as_object()
            .ok_or_else(|| "grid is not a JSON object".to_string())?;

        let mut grid = TimetableGrid::default();
        for (key, entry) in object {
            let cells = entry
                .as_array()
                .ok_or_else(|| format!("entry '{}' is not a list", key))?
                .iter()
                .map(cell_text)
                .collect::<Vec<_>>();

            if key == DAY_HEADER_KEY {
                grid.headers = Some(cells);
            } else {
                grid.insert_day(key.clone(), cells);
            }
        }
        Ok(grid)
    }

    /// JSON form, `Day` first followed by the rows in stored order.
    pub fn to_value(&self) -> Value {
        let mut object = Map::new();
        if let Some(headers) = &self.headers {
            object.insert(DAY_HEADER_KEY.to_string(), Value::from(headers.clone()));
        }
        for (day, cells) in &self.rows {
            object.insert(day.clone(), Value::from(cells.clone()));
        }
        Value::Object(object)
    }

    /// Time-slot headers, empty when the grid has no `Day` entry.
    pub fn headers(&self) -> &[String] {
        self.headers.as_deref().unwrap_or(&[])
    }

    pub fn has_header(&self) -> bool {
        self.headers.is_some()
    }

    /// Day rows in input order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.rows
            .iter()
            .map(|(day, cells)| (day.as_str(), cells.as_slice()))
    }

    /// Cells of one day.
    pub fn day(&self, day: &str) -> Option<&[String]> {
        self.rows
            .iter()
            .find(|(name, _)| name == day)
            .map(|(_, cells)| cells.as_slice())
    }

    pub fn day_count(&self) -> usize {
        self.rows.len()
    }

    /// Check that every day row has exactly one cell per header.
    pub fn validate(&self, table_id: &TableId) -> TimetableResult<()> {
        let headers = self
            .headers
            .as_ref()
            .ok_or_else(|| TimetableError::malformed(table_id, "missing 'Day' header"))?;

        for (day, cells) in &self.rows {
            if cells.len() != headers.len() {
                return Err(TimetableError::malformed(
                    table_id,
                    format!(
                        "row '{}' has {} cells but 'Day' has {} time slots",
                        day,
                        cells.len(),
                        headers.len()
                    ),
                ));
            }
        }
        Ok(())
    }
}

impl Serialize for TimetableGrid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TimetableGrid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        TimetableGrid::from_value(&value).map_err(serde::de::Error::custom)
    }
}

/// Every table produced by one generation request, in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTimetableSet {
    tables: Vec<(TableId, TimetableGrid)>,
    index: HashMap<TableId, usize>,
}

impl RawTimetableSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table, replacing the grid of an already present id in place.
    pub fn insert(&mut self, table_id: TableId, grid: TimetableGrid) {
        match self.index.get(&table_id) {
            Some(&position) => self.tables[position].1 = grid,
            None => {
                self.index.insert(table_id.clone(), self.tables.len());
                self.tables.push((table_id, grid));
            }
        }
    }

    /// Builder form of [`RawTimetableSet::insert`].
    pub fn with_table(mut self, table_id: impl Into<TableId>, grid: TimetableGrid) -> Self {
        self.insert(table_id.into(), grid);
        self
    }

    /// Parse a generation payload.
    pub fn from_value(value: &Value) -> TimetableResult<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| TimetableError::invalid_dataset("expected a JSON object of timetables"))?;

        let mut set = RawTimetableSet::new();
        for (key, grid) in object {
            let grid = TimetableGrid::from_value(grid).map_err(|e| {
                TimetableError::invalid_dataset(format!("table '{}': {}", key, e))
            })?;
            set.insert(TableId::new(key.clone()), grid);
        }
        Ok(set)
    }

    /// Parse a generation payload from JSON text.
    pub fn from_json_str(json: &str) -> TimetableResult<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| TimetableError::invalid_dataset(format!("invalid JSON: {}", e)))?;
        Self::from_value(&value)
    }

    pub fn to_value(&self) -> Value {
        let object = self
            .tables
            .iter()
            .map(|(id, grid)| (id.0.clone(), grid.to_value()))
            .collect::<Map<_, _>>();
        Value::Object(object)
    }

    pub fn get(&self, table_id: &str) -> Option<&TimetableGrid> {
        self.index
            .get(table_id)
            .map(|&position| &self.tables[position].1)
    }

    pub fn contains(&self, table_id: &str) -> bool {
        self.index.contains_key(table_id)
    }

    /// Table ids in arrival order.
    pub fn table_ids(&self) -> impl Iterator<Item = &TableId> + '_ {
        self.tables.iter().map(|(id, _)| id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TableId, &TimetableGrid)> + '_ {
        self.tables.iter().map(|(id, grid)| (id, grid))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl Serialize for RawTimetableSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RawTimetableSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        RawTimetableSet::from_value(&value).map_err(serde::de::Error::custom)
    }
}
