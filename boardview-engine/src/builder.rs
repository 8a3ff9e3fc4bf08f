//! Board data construction.
//!
//! A build is a pure projection of `(records, options, known values)` into
//! columns, rows and cells:
//!
//! 1. discover the keys present in the records (first raw value wins)
//! 2. enrich with every value the field has in the vault, unless empty
//!    groups are hidden
//! 3. order: explicit order first, remaining keys ascending
//! 4. drop hidden keys
//! 5. place each visible record into its `(group, sub-group)` cell
//! 6. count per column and per row

use std::collections::HashSet;

use boardview_fields::FieldId;
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, trace};

use crate::colors::ColorAssignments;
use crate::logging::Pretty;
use crate::options::BoardOptions;
use crate::resolver::ValueResolver;
use crate::types::{
    Axis, BoardItem, BoardLane, BoardViewData, Cells, Record, DEFAULT_SUB_GROUP, EMPTY_GROUP,
};

/// Builds [`BoardViewData`] snapshots. Holds no state between builds.
pub struct BoardDataBuilder<'a> {
    resolver: ValueResolver<'a>,
    colors: ColorAssignments,
}

impl<'a> BoardDataBuilder<'a> {
    pub fn new(resolver: ValueResolver<'a>) -> Self {
        Self {
            resolver,
            colors: ColorAssignments::default(),
        }
    }

    /// Colour assignments echoed into every snapshot.
    pub fn with_colors(mut self, colors: ColorAssignments) -> Self {
        self.colors = colors;
        self
    }

    pub fn build(&self, records: &[Record], options: &BoardOptions) -> BoardViewData {
        let group_field = options.group_field.as_ref();
        let sub_group_field = options.sub_group_field.as_ref();

        // Discovery
        let mut groups: IndexMap<String, Option<Value>> = IndexMap::new();
        let mut sub_groups: IndexMap<String, Option<Value>> = IndexMap::new();
        for record in records {
            let group = self.resolver.resolve(record, group_field);
            groups.entry(group.key).or_insert(group.raw);
            if sub_group_field.is_some() {
                let sub_group = self.resolver.resolve(record, sub_group_field);
                sub_groups.entry(sub_group.key).or_insert(sub_group.raw);
            }
        }

        // Enrichment
        if let Some(field) = group_field.filter(|_| !options.hide_empty_groups) {
            self.enrich(&mut groups, field);
        }
        if let Some(field) = sub_group_field.filter(|_| !options.hide_empty_sub_groups) {
            self.enrich(&mut sub_groups, field);
        }

        let mut columns = lanes(groups, options, Axis::Group);
        let mut rows = match sub_group_field {
            Some(_) => lanes(sub_groups, options, Axis::SubGroup),
            None => Vec::new(),
        };

        // Assignment
        let hidden_groups: HashSet<&str> = options.hidden_groups.iter().map(String::as_str).collect();
        let hidden_sub_groups: HashSet<&str> =
            options.hidden_sub_groups.iter().map(String::as_str).collect();

        let mut items = Cells::new();
        for record in records {
            let group = self.resolver.resolve(record, group_field).key;
            if hidden_groups.contains(group.as_str()) {
                trace!(record = %record.id, group = %group, "record in hidden group");
                continue;
            }
            let sub_group = match sub_group_field {
                Some(field) => {
                    let key = self.resolver.resolve(record, Some(field)).key;
                    if hidden_sub_groups.contains(key.as_str()) {
                        trace!(record = %record.id, sub_group = %key, "record in hidden sub-group");
                        continue;
                    }
                    Some(key)
                }
                None => None,
            };

            let bucket = sub_group.clone().unwrap_or_else(|| DEFAULT_SUB_GROUP.to_string());
            items
                .entry(group.clone())
                .or_default()
                .entry(bucket)
                .or_default()
                .push(BoardItem {
                    id: record.id.clone(),
                    group_id: group,
                    sub_group_id: sub_group,
                    data: record.clone(),
                });
        }

        // Counting
        for column in &mut columns {
            column.count = items
                .get(&column.id)
                .map(|cells| cells.values().map(Vec::len).sum())
                .unwrap_or(0);
        }
        for row in &mut rows {
            row.count = items
                .values()
                .filter_map(|cells| cells.get(&row.id))
                .map(Vec::len)
                .sum();
        }

        let data = BoardViewData {
            group_field: group_field.cloned(),
            sub_group_field: sub_group_field.cloned(),
            columns,
            rows,
            items,
            options: options.clone(),
            card_fields: options.card_fields(),
            colors: self.colors.clone(),
        };

        debug!(
            records = records.len(),
            columns = data.columns.len(),
            rows = data.rows.len(),
            items = data.item_count(),
            "board built"
        );
        trace!("columns: {}", Pretty(&data.columns));
        data
    }

    fn enrich(&self, keys: &mut IndexMap<String, Option<Value>>, field: &FieldId) {
        for value in self.resolver.all_known_values(field) {
            let raw = Some(Value::String(value.clone()));
            keys.entry(value).or_insert(raw);
        }
        keys.entry(EMPTY_GROUP.to_string()).or_insert(None);
    }
}

/// Ordered, visible lanes for one axis. Counts are filled in later.
fn lanes(
    mut discovered: IndexMap<String, Option<Value>>,
    options: &BoardOptions,
    axis: Axis,
) -> Vec<BoardLane> {
    let hidden = options.hidden(axis);
    let ordered = order_keys(discovered.keys().map(String::as_str), options.order(axis));
    ordered
        .into_iter()
        .filter(|key| !hidden.contains(key))
        .map(|key| {
            let raw_value = discovered.swap_remove(&key).flatten();
            BoardLane {
                title: key.clone(),
                id: key,
                raw_value,
                count: 0,
            }
        })
        .collect()
}

/// Keys named in `order` first, in that sequence (unknown and repeated
/// entries skipped), then the rest in ascending order.
pub fn order_keys<'k>(keys: impl IntoIterator<Item = &'k str>, order: &[String]) -> Vec<String> {
    let mut remaining: Vec<&str> = keys.into_iter().collect();
    let mut ordered = Vec::with_capacity(remaining.len());
    for key in order {
        if let Some(pos) = remaining.iter().position(|k| *k == key.as_str()) {
            ordered.push(remaining.remove(pos).to_string());
        }
    }
    remaining.sort_unstable();
    ordered.extend(remaining.into_iter().map(str::to_string));
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryVault;
    use boardview_fields::StaticTypeRegistry;
    use rstest::rstest;
    use serde_json::json;

    fn task(id: &str, status: Option<&str>, owner: Option<&str>) -> Record {
        let mut record = Record::new(id);
        if let Some(status) = status {
            record = record.with_value(FieldId::note("status"), status);
        }
        if let Some(owner) = owner {
            record = record.with_value(FieldId::note("owner"), owner);
        }
        record
    }

    fn records() -> Vec<Record> {
        vec![
            task("a.md", Some("Todo"), Some("ann")),
            task("b.md", Some("Doing"), Some("bob")),
            task("c.md", Some("Todo"), None),
            task("d.md", None, Some("ann")),
        ]
    }

    fn options() -> BoardOptions {
        BoardOptions {
            group_field: Some(FieldId::note("status")),
            sub_group_field: Some(FieldId::note("owner")),
            hide_empty_groups: true,
            hide_empty_sub_groups: true,
            ..Default::default()
        }
    }

    fn build(records: &[Record], options: &BoardOptions) -> BoardViewData {
        let registry = StaticTypeRegistry::new();
        BoardDataBuilder::new(ValueResolver::new(None, &registry)).build(records, options)
    }

    #[rstest]
    #[case::explicit_then_sorted(&["A", "B", "C"], &["B", "A"], &["B", "A", "C"])]
    #[case::no_order(&["C", "A", "B"], &[], &["A", "B", "C"])]
    #[case::unknown_entries_dropped(&["A", "B"], &["Z", "B"], &["B", "A"])]
    #[case::duplicates_collapse(&["A", "B"], &["B", "B", "A"], &["B", "A"])]
    fn test_order_keys(#[case] keys: &[&str], #[case] order: &[&str], #[case] expected: &[&str]) {
        let order: Vec<String> = order.iter().map(|s| s.to_string()).collect();
        assert_eq!(order_keys(keys.iter().copied(), &order), expected);
    }

    #[test]
    fn test_build_is_idempotent() {
        let records = records();
        let options = options();
        assert_eq!(build(&records, &options), build(&records, &options));
    }

    #[test]
    fn test_every_visible_record_lands_in_one_cell() {
        let records = records();
        let data = build(&records, &options());

        for record in &records {
            let hits: usize = data
                .items
                .values()
                .flat_map(|rows| rows.values())
                .flatten()
                .filter(|item| item.id == record.id)
                .count();
            assert_eq!(hits, 1, "{} should be placed exactly once", record.id);
        }
        assert_eq!(data.cell("Todo", Some("ann"))[0].id.as_str(), "a.md");
        assert_eq!(data.cell("Todo", Some(EMPTY_GROUP))[0].id.as_str(), "c.md");
        assert_eq!(data.cell(EMPTY_GROUP, Some("ann"))[0].id.as_str(), "d.md");
    }

    #[test]
    fn test_counts_match_cells() {
        let data = build(&records(), &options());

        for column in &data.columns {
            let sum: usize = data.rows.iter().map(|r| data.cell(&column.id, Some(&r.id)).len()).sum();
            assert_eq!(column.count, sum, "column {}", column.id);
        }
        for row in &data.rows {
            let sum: usize = data.columns.iter().map(|c| data.cell(&c.id, Some(&row.id)).len()).sum();
            assert_eq!(row.count, sum, "row {}", row.id);
        }
        assert_eq!(data.column("Todo").unwrap().count, 2);
        assert_eq!(data.row("ann").unwrap().count, 2);
    }

    #[test]
    fn test_explicit_order_then_lexicographic() {
        let records = vec![
            task("a.md", Some("A"), None),
            task("b.md", Some("B"), None),
            task("c.md", Some("C"), None),
        ];
        let options = BoardOptions {
            group_field: Some(FieldId::note("status")),
            group_order: vec!["B".into(), "A".into()],
            hide_empty_groups: true,
            ..Default::default()
        };
        assert_eq!(build(&records, &options).column_ids(), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_enrichment_adds_empty_columns() {
        let vault = InMemoryVault::new()
            .with_note("old.md", json!({"status": "Done"}))
            .with_note("a.md", json!({"status": "Todo"}));
        let registry = StaticTypeRegistry::new();
        let builder = BoardDataBuilder::new(ValueResolver::new(Some(&vault), &registry));
        let options = BoardOptions {
            group_field: Some(FieldId::note("status")),
            ..Default::default()
        };

        let data = builder.build(&[task("a.md", Some("Todo"), None)], &options);
        let done = data.column("Done").unwrap();
        assert_eq!(done.count, 0);
        assert_eq!(done.raw_value, Some(json!("Done")));
        assert_eq!(data.column(EMPTY_GROUP).unwrap().count, 0);
        assert_eq!(data.column("Todo").unwrap().count, 1);
    }

    #[test]
    fn test_zero_records_seeded_by_enrichment() {
        let vault = InMemoryVault::new().with_note("x.md", json!({"status": "Done"}));
        let registry = StaticTypeRegistry::new();
        let builder = BoardDataBuilder::new(ValueResolver::new(Some(&vault), &registry));
        let options = BoardOptions {
            group_field: Some(FieldId::note("status")),
            ..Default::default()
        };

        let data = builder.build(&[], &options);
        assert_eq!(data.column_ids(), vec!["Done", EMPTY_GROUP]);
        assert_eq!(data.item_count(), 0);
    }

    #[test]
    fn test_falsy_variants_share_the_empty_group() {
        let records = vec![
            Record::new("absent.md"),
            Record::new("blank.md").with_value(FieldId::note("status"), ""),
            Record::new("null.md").with_value(FieldId::note("status"), json!(null)),
            Record::new("false.md").with_value(FieldId::note("status"), json!(false)),
            Record::new("zero.md").with_value(FieldId::note("status"), json!(0)),
        ];
        let options = BoardOptions {
            group_field: Some(FieldId::note("status")),
            hide_empty_groups: true,
            ..Default::default()
        };

        let data = build(&records, &options);
        assert_eq!(data.column_ids(), vec![EMPTY_GROUP]);
        assert_eq!(data.cell(EMPTY_GROUP, None).len(), 5);
    }

    #[test]
    fn test_hidden_keys_drop_lanes_and_records() {
        let options = BoardOptions {
            hidden_groups: vec!["Doing".into()],
            hidden_sub_groups: vec!["ann".into()],
            ..options()
        };
        let data = build(&records(), &options);

        assert!(data.column("Doing").is_none());
        assert!(data.row("ann").is_none());
        assert_eq!(data.item_count(), 1);
        assert!(data.find_item(&"c.md".into()).is_some());
        assert!(data.find_item(&"b.md".into()).is_none());
    }

    #[test]
    fn test_no_fields_single_column() {
        let data = build(&records(), &BoardOptions::default());

        assert_eq!(data.column_ids(), vec![EMPTY_GROUP]);
        assert!(data.rows.is_empty());
        let cell = data.cell(EMPTY_GROUP, None);
        assert_eq!(cell.len(), 4);
        assert!(cell.iter().all(|item| item.sub_group_id.is_none()));
        assert_eq!(data.column(EMPTY_GROUP).unwrap().count, 4);
    }

    #[test]
    fn test_first_raw_value_wins() {
        let records = vec![
            Record::new("a.md").with_value(FieldId::note("points"), json!(2)),
            Record::new("b.md").with_value(FieldId::note("points"), json!(2.0)),
        ];
        let options = BoardOptions {
            group_field: Some(FieldId::note("points")),
            hide_empty_groups: true,
            ..Default::default()
        };

        let data = build(&records, &options);
        assert_eq!(data.column_ids(), vec!["2"]);
        assert_eq!(data.column("2").unwrap().raw_value, Some(json!(2)));
        assert_eq!(data.column("2").unwrap().count, 2);
    }

    #[test]
    fn test_gallery_layout_puts_everything_in_one_column() {
        let options = BoardOptions {
            sub_group_field: Some(FieldId::note("owner")),
            hide_empty_sub_groups: true,
            ..Default::default()
        };
        let data = build(&records(), &options);

        assert_eq!(data.layout(), crate::types::Layout::Gallery);
        assert_eq!(data.column_ids(), vec![EMPTY_GROUP]);
        assert_eq!(data.row_ids(), vec!["Empty Group", "ann", "bob"]);
        assert_eq!(data.cell(EMPTY_GROUP, Some("ann")).len(), 2);
    }

    #[test]
    fn test_items_keep_record_order() {
        let data = build(&records(), &options());
        let todo: Vec<&str> = data
            .items
            .get("Todo")
            .unwrap()
            .values()
            .flatten()
            .map(|item| item.id.as_str())
            .collect();
        assert_eq!(todo, vec!["a.md", "c.md"]);
    }

    #[test]
    fn test_card_fields_and_colors_echoed() {
        let mut colors = ColorAssignments::new();
        colors.insert_raw("note.status:Todo", "Blue");
        let registry = StaticTypeRegistry::new();
        let builder =
            BoardDataBuilder::new(ValueResolver::new(None, &registry)).with_colors(colors.clone());
        let options = BoardOptions {
            card_properties: vec!["note.owner".into()],
            ..options()
        };

        let data = builder.build(&records(), &options);
        assert_eq!(data.colors, colors);
        assert_eq!(
            data.card_fields,
            vec![FieldId::from("file.name"), FieldId::note("owner")]
        );
    }

    #[test]
    fn test_bare_group_property_reads_frontmatter() {
        let frontmatter = json!({"status": "Todo"});
        let records = vec![Record::from_frontmatter(
            "a.md",
            frontmatter.as_object().unwrap(),
        )];
        let options =
            BoardOptions::from_view_yaml("groupProperty: status\nhideEmptyGroups: true\n").unwrap();

        let data = build(&records, &options);
        assert_eq!(data.column_ids(), vec!["Todo"]);
        assert_eq!(data.column("Todo").unwrap().count, 1);
    }
}
