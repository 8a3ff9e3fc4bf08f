//! Board-level types: lanes, items, cells and the view data snapshot

use boardview_fields::FieldId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ids::RecordId;
use super::record::Record;
use crate::colors::{CardColorMode, ColorAssignments, ColorName};
use crate::options::BoardOptions;

/// Group key for records whose field is absent, falsy or not configured.
pub const EMPTY_GROUP: &str = "Empty Group";

/// Bucket key for items when no sub-group field is configured.
pub const DEFAULT_SUB_GROUP: &str = "default";

/// Which of the two grouping fields an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Axis {
    /// Columns
    Group,
    /// Rows
    SubGroup,
}

/// A column or a row. Created fresh on every build; only `id` is ever
/// persisted (in order and hidden lists).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardLane {
    pub id: String,
    pub title: String,
    /// The value as stored, used when writing it back; `None` for the empty group.
    pub raw_value: Option<Value>,
    pub count: usize,
}

pub type BoardColumn = BoardLane;
pub type BoardRow = BoardLane;

/// One record placed in one cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardItem {
    pub id: RecordId,
    pub group_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_group_id: Option<String>,
    pub data: Record,
}

/// column id → row id → items, in input record order.
pub type Cells = IndexMap<String, IndexMap<String, Vec<BoardItem>>>;

/// How the grid is arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    /// Columns × rows.
    Grid,
    /// Columns only.
    SingleRow,
    /// No group field but a sub-group field: rows of a single column.
    Gallery,
}

/// Snapshot produced by one build. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardViewData {
    pub group_field: Option<FieldId>,
    pub sub_group_field: Option<FieldId>,
    pub columns: Vec<BoardColumn>,
    pub rows: Vec<BoardRow>,
    pub items: Cells,
    pub options: BoardOptions,
    pub card_fields: Vec<FieldId>,
    pub colors: ColorAssignments,
}

impl BoardViewData {
    pub fn column(&self, id: &str) -> Option<&BoardColumn> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn row(&self, id: &str) -> Option<&BoardRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn column_ids(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.id.clone()).collect()
    }

    pub fn row_ids(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.id.clone()).collect()
    }

    /// Items in one cell; `row = None` addresses the default bucket.
    pub fn cell(&self, column: &str, row: Option<&str>) -> &[BoardItem] {
        self.items
            .get(column)
            .and_then(|rows| rows.get(row.unwrap_or(DEFAULT_SUB_GROUP)))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The item for a record, if it is on the board.
    pub fn find_item(&self, id: &RecordId) -> Option<&BoardItem> {
        self.items
            .values()
            .flat_map(|rows| rows.values())
            .flatten()
            .find(|item| &item.id == id)
    }

    pub fn item_count(&self) -> usize {
        self.items
            .values()
            .flat_map(|rows| rows.values())
            .map(Vec::len)
            .sum()
    }

    pub fn layout(&self) -> Layout {
        if self.group_field.is_none() && self.sub_group_field.is_some() {
            Layout::Gallery
        } else if self.rows.is_empty() {
            Layout::SingleRow
        } else {
            Layout::Grid
        }
    }

    /// Columns actually drawn: in gallery mode only the empty-group column
    /// (or the first one) carries the items.
    pub fn rendered_columns(&self) -> Vec<&BoardColumn> {
        match self.layout() {
            Layout::Gallery => self
                .column(EMPTY_GROUP)
                .or_else(|| self.columns.first())
                .into_iter()
                .collect(),
            _ => self.columns.iter().collect(),
        }
    }

    /// Header colour for a lane, `None` when header colouring is off or the
    /// lane's axis does not own colours in the current layout.
    pub fn header_color(&self, axis: Axis, key: &str) -> Option<ColorName> {
        if !self.options.color_headers {
            return None;
        }
        let field = match axis {
            Axis::Group => self.group_field.as_ref()?,
            Axis::SubGroup if self.group_field.is_none() => self.sub_group_field.as_ref()?,
            Axis::SubGroup => return None,
        };
        Some(self.colors.get(field, key).unwrap_or_default())
    }

    /// Colour of a cell: the column's colour when grouping by a field,
    /// otherwise the row's colour, otherwise grey.
    pub fn cell_color(&self, column: &str, row: Option<&str>) -> ColorName {
        let assigned = match (&self.group_field, &self.sub_group_field, row) {
            (Some(field), _, _) => self.colors.get(field, column),
            (None, Some(field), Some(row)) => self.colors.get(field, row),
            _ => None,
        };
        assigned.unwrap_or_default()
    }

    pub fn card_color_mode(&self) -> CardColorMode {
        self.options.card_color_mode()
    }
}
