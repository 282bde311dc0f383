//! Tabular projection of JSON rows.
//!
//! [`Table::from_value`] flattens every element into a row and collects
//! the union of keys as columns. [`TableView`] holds the column filters
//! and sort key, applying them in memory in client mode or handing them
//! to the request body as a [`ServerQuery`] in server mode.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use indexmap::IndexSet;
use serde_json::{Map, Value};

use courier_domain::table::{ServerQuery, SortDirection, SortSpec, TableMode};

use crate::query::{display, flatten};

/// Column name used when a row is a bare scalar.
pub const SCALAR_COLUMN: &str = "value";

/// One flattened row.
pub type Row = Map<String, Value>;

/// Flattened rows with their column set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Builds a table from an array (one row per element) or any other
    /// value (a one-row table). Scalars land in the [`SCALAR_COLUMN`].
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let rows: Vec<Row> = match value {
            Value::Array(items) => items.iter().map(to_row).collect(),
            other => vec![to_row(other)],
        };

        let columns: IndexSet<&String> = rows.iter().flat_map(Map::keys).collect();
        let columns = columns.into_iter().cloned().collect();

        Self { columns, rows }
    }

    /// Returns the columns in first-seen order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns every row.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the number of rows.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no rows.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn to_row(value: &Value) -> Row {
    match flatten(value) {
        Value::Object(map) => map,
        scalar => {
            let mut row = Map::new();
            row.insert(SCALAR_COLUMN.to_string(), scalar);
            row
        }
    }
}

/// Display string of a cell; missing and null cells are empty.
#[must_use]
pub fn cell_text(row: &Row, column: &str) -> String {
    match row.get(column) {
        None | Some(Value::Null) => String::new(),
        Some(value) => display(value).into_owned(),
    }
}

/// Filter and sort state over a [`Table`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableView {
    mode: TableMode,
    filters: BTreeMap<String, String>,
    sort: Option<SortSpec>,
}

impl TableView {
    /// Creates a view in the given mode with no filters or sort.
    #[must_use]
    pub const fn new(mode: TableMode) -> Self {
        Self {
            mode,
            filters: BTreeMap::new(),
            sort: None,
        }
    }

    /// Returns the current mode.
    #[must_use]
    pub const fn mode(&self) -> TableMode {
        self.mode
    }

    /// Returns the active column filters.
    #[must_use]
    pub const fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    /// Returns the active sort.
    #[must_use]
    pub const fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    /// Switches mode. Filters and sort never carry over.
    pub fn set_mode(&mut self, mode: TableMode) {
        self.mode = mode;
        self.filters.clear();
        self.sort = None;
    }

    /// Sets a column filter; empty text removes it.
    pub fn set_filter(&mut self, column: impl Into<String>, text: impl Into<String>) {
        let column = column.into();
        let text = text.into();
        if text.is_empty() {
            self.filters.remove(&column);
        } else {
            self.filters.insert(column, text);
        }
    }

    /// Sorts by one column.
    pub fn set_sort(&mut self, column: impl Into<String>, direction: SortDirection) {
        self.sort = Some(SortSpec::new(column, direction));
    }

    /// Removes the sort.
    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    /// Returns the rows to display.
    ///
    /// Client mode filters with a case-insensitive substring per column
    /// and applies a stable sort with null and missing cells last in
    /// either direction. Server mode returns the rows untouched.
    #[must_use]
    pub fn project<'t>(&self, table: &'t Table) -> Vec<&'t Row> {
        let rows = table.rows.iter();
        if self.mode == TableMode::Server {
            return rows.collect();
        }

        let needles: Vec<(&str, String)> = self
            .filters
            .iter()
            .map(|(column, text)| (column.as_str(), text.to_lowercase()))
            .collect();

        let mut projected: Vec<&Row> = rows
            .filter(|row| {
                needles
                    .iter()
                    .all(|(column, needle)| cell_text(row, column).to_lowercase().contains(needle))
            })
            .collect();

        if let Some(sort) = &self.sort {
            projected.sort_by(|a, b| compare_cells(a.get(&sort.column), b.get(&sort.column), sort.direction));
        }

        projected
    }

    /// Returns the state to send to the server, in server mode only.
    #[must_use]
    pub fn server_query(&self) -> Option<ServerQuery> {
        (self.mode == TableMode::Server).then(|| ServerQuery {
            filters: self.filters.clone(),
            sort: self.sort.clone(),
        })
    }
}

pub(crate) fn compare_cells(a: Option<&Value>, b: Option<&Value>, direction: SortDirection) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let ordering = compare_values(a, b);
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        }
    }
}

/// Numbers order before every other value so mixed columns stay a total
/// order; the rest compare as lowercase display text.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => display(a).to_lowercase().cmp(&display(b).to_lowercase()),
    }
}
