//! BoardView - the per-session controller
//!
//! Ties the context, the operation processor, the drag state machine and the
//! pending-creation flow together. Each public method maps to one thing the
//! user or the host can do; every render is a fresh build.

use boardview_operations::{Execute, OperationProcessor};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::card::DropCard;
use crate::colors::ColorName;
use crate::context::BoardContext;
use crate::creator::{PendingRecord, RecordCreator};
use crate::drag::{DragEvent, DragTracker, RenderDirective};
use crate::error::{BoardError, Result};
use crate::group::{HideGroup, MoveGroup, SetGroupColor};
use crate::order::Direction;
use crate::processor::BoardOperationProcessor;
use crate::store::WriteInstruction;
use crate::sub_group::{HideSubGroup, MoveSubGroup};
use crate::types::{Axis, BoardViewData, Record, RecordId, ViewStateChange};

pub struct BoardView {
    ctx: BoardContext,
    processor: BoardOperationProcessor,
    drag: DragTracker,
    creator: RecordCreator,
}

impl BoardView {
    pub fn new(ctx: BoardContext) -> Self {
        Self {
            ctx,
            processor: BoardOperationProcessor::new(),
            drag: DragTracker::new(),
            creator: RecordCreator::new(),
        }
    }

    pub fn with_processor(mut self, processor: BoardOperationProcessor) -> Self {
        self.processor = processor;
        self
    }

    pub fn context(&self) -> &BoardContext {
        &self.ctx
    }

    pub fn drag(&self) -> &DragTracker {
        &self.drag
    }

    /// The host's query produced new results. Pending creation values are
    /// applied to `active` before rendering; a failed write is logged and the
    /// board still renders.
    pub async fn on_data_updated(
        &mut self,
        records: Vec<Record>,
        active: Option<&RecordId>,
    ) -> Option<BoardViewData> {
        self.ctx.set_records(records);
        let outcome = self
            .creator
            .process_pending(self.ctx.services().store.as_ref(), active)
            .await;
        if !outcome.written.is_empty() {
            info!(writes = outcome.written.len(), "new record placed in its cell");
        }
        if !outcome.failed.is_empty() {
            warn!(failed = outcome.failed.len(), "new record only partly placed");
        }
        self.render()
    }

    /// A fresh snapshot, or `None` while a card is held.
    pub fn render(&mut self) -> Option<BoardViewData> {
        self.drag.request_render().then(|| self.ctx.build_board())
    }

    pub fn handle_drag(&mut self, event: DragEvent) -> Option<BoardViewData> {
        match self.drag.handle(event) {
            RenderDirective::Render => Some(self.ctx.build_board()),
            RenderDirective::Skip => None,
        }
    }

    /// Drop a card into `(column, row)`; returns the writes issued.
    pub async fn drop_card(
        &mut self,
        record: impl Into<RecordId>,
        column: &str,
        row: Option<&str>,
    ) -> Result<Vec<WriteInstruction>> {
        let mut operation = DropCard::new(record, column);
        operation.to_sub_group = row.map(str::to_string);
        let value = self.processor.process(&operation, &self.ctx).await?;
        Ok(serde_json::from_value(value["writes"].clone())?)
    }

    pub async fn move_group(&mut self, key: &str, direction: Direction) -> Result<ViewStateChange> {
        self.apply_state_change(&MoveGroup::new(key, direction)).await
    }

    pub async fn move_sub_group(
        &mut self,
        key: &str,
        direction: Direction,
    ) -> Result<ViewStateChange> {
        self.apply_state_change(&MoveSubGroup::new(key, direction)).await
    }

    pub async fn hide_group(&mut self, key: &str) -> Result<ViewStateChange> {
        self.apply_state_change(&HideGroup::new(key)).await
    }

    pub async fn hide_sub_group(&mut self, key: &str) -> Result<ViewStateChange> {
        self.apply_state_change(&HideSubGroup::new(key)).await
    }

    /// `None` when the targeted axis has no field.
    pub async fn set_color(
        &mut self,
        axis: Axis,
        key: &str,
        color: ColorName,
    ) -> Result<Option<ViewStateChange>> {
        let value = self
            .processor
            .process(&SetGroupColor::new(axis, key, color), &self.ctx)
            .await?;
        if value.is_null() {
            return Ok(None);
        }
        let change: ViewStateChange = serde_json::from_value(value)?;
        self.ctx.apply(&change);
        Ok(Some(change))
    }

    /// "New" button on a cell.
    pub async fn new_record_click(&mut self, column: &str, row: Option<&str>) -> Result<bool> {
        let board = self.ctx.build_board();
        let pending = PendingRecord::for_cell(&board, column, row);
        debug!(column, ?row, "new record requested");
        let entry = self.ctx.services().new_record.clone();
        self.creator.request(pending, entry.as_deref()).await
    }

    /// Run a state-changing operation and mirror its change locally. The
    /// caller persists the returned change.
    async fn apply_state_change(
        &mut self,
        operation: &dyn Execute<BoardContext, BoardError>,
    ) -> Result<ViewStateChange> {
        let value: Value = self.processor.process(operation, &self.ctx).await?;
        let change: ViewStateChange = serde_json::from_value(value)?;
        self.ctx.apply(&change);
        Ok(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::BoardOptions;
    use crate::store::{InMemoryVault, NewRecordEntry, RecordStore};
    use async_trait::async_trait;
    use crate::types::EMPTY_GROUP;
    use crate::BoardServices;
    use boardview_fields::{FieldId, StaticTypeRegistry};
    use serde_json::json;
    use std::sync::Arc;

    fn view() -> (Arc<InMemoryVault>, BoardView) {
        let vault = Arc::new(
            InMemoryVault::new()
                .with_note("a.md", json!({"status": "Todo"}))
                .with_note("b.md", json!({"status": "Done"})),
        );
        let ctx = BoardContext::new(
            BoardServices::new(vault.clone(), Arc::new(StaticTypeRegistry::new()))
                .with_index(vault.clone()),
        );
        ctx.set_records(vault.records());
        ctx.set_options(BoardOptions {
            group_field: Some(FieldId::note("status")),
            ..Default::default()
        });
        (vault, BoardView::new(ctx))
    }

    #[tokio::test]
    async fn test_drag_drop_rebuilds_from_store() {
        let (vault, mut view) = view();

        assert!(view
            .handle_drag(DragEvent::PointerDown {
                item: "a.md".into()
            })
            .is_none());
        view.handle_drag(DragEvent::GestureConfirmed);

        view.drop_card("a.md", "Done", None).await.unwrap();
        // The host reports new data mid-gesture; the render is dropped.
        let during = view.on_data_updated(vault.records(), None).await;
        assert!(during.is_none());

        let after = view.handle_drag(DragEvent::GestureEnded).unwrap();
        assert_eq!(after.column("Done").unwrap().count, 2);
        // Nothing in the vault is "Todo" any more, so the column is gone.
        assert!(after.column("Todo").is_none());
    }

    #[tokio::test]
    async fn test_hide_group_applies_locally() {
        let (_vault, mut view) = view();
        let change = view.hide_group("Done").await.unwrap();

        assert_eq!(change, ViewStateChange::HiddenGroups(vec!["Done".into()]));
        let board = view.render().unwrap();
        assert!(board.column("Done").is_none());
        assert_eq!(view.context().activity().len(), 1);
    }

    #[tokio::test]
    async fn test_move_group_twice_uses_fresh_order() {
        let (_vault, mut view) = view();
        view.move_group("Todo", Direction::Left).await.unwrap();
        let change = view.move_group("Todo", Direction::Left).await.unwrap();

        assert_eq!(
            change,
            ViewStateChange::GroupOrder(vec!["Todo".into(), "Done".into(), EMPTY_GROUP.into()])
        );
    }

    #[tokio::test]
    async fn test_set_color_shows_on_header() {
        let (_vault, mut view) = view();
        view.set_color(Axis::Group, "Done", ColorName::Green)
            .await
            .unwrap();
        let board = view.render().unwrap();
        assert_eq!(board.header_color(Axis::Group, "Done"), Some(ColorName::Green));
    }

    /// Accepts nothing.
    struct ReadOnlyStore;

    #[async_trait]
    impl RecordStore for ReadOnlyStore {
        async fn write_field(&self, record: &RecordId, key: &str, _value: Value) -> Result<()> {
            Err(BoardError::write_failed(record.as_str(), key, "read-only"))
        }
    }

    #[derive(Default)]
    struct NewButton;

    #[async_trait]
    impl NewRecordEntry for NewButton {
        async fn request_new_record(&self) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_failed_pending_write_still_renders() {
        let vault = InMemoryVault::new().with_note("a.md", json!({"status": "Todo"}));
        let ctx = BoardContext::new(
            BoardServices::new(Arc::new(ReadOnlyStore), Arc::new(StaticTypeRegistry::new()))
                .with_new_record_entry(Arc::new(NewButton)),
        );
        ctx.set_records(vault.records());
        ctx.set_options(BoardOptions {
            group_field: Some(FieldId::note("status")),
            ..Default::default()
        });
        let mut view = BoardView::new(ctx);

        assert!(view.new_record_click("Todo", None).await.unwrap());
        let mut records = vault.records();
        records.push(Record::new("Untitled.md"));
        let board = view
            .on_data_updated(records, Some(&RecordId::from("Untitled.md")))
            .await
            .unwrap();

        assert_eq!(board.column("Todo").unwrap().count, 1);
        assert_eq!(board.column(EMPTY_GROUP).unwrap().count, 1);
    }

    #[tokio::test]
    async fn test_new_record_without_entry_point() {
        let (_vault, mut view) = view();
        assert!(!view.new_record_click("Todo", None).await.unwrap());
    }
}
