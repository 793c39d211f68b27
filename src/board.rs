//! Board Model
//!
//! Columns of cards keyed by status. All drag/drop state transitions
//! are applied here; the view only renders what this model holds.

use dom_dragdrop::DragSession;

use crate::models::{Task, TaskId, TaskStatus};

/// Drag gesture over the board: card id, origin column, origin index
pub type CardDrag = DragSession<TaskId, TaskStatus>;

/// Where a card returns to if its move is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OriginSnapshot {
    pub status: TaskStatus,
    pub index: usize,
}

/// One task card on the board
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// `task.status` is the displayed (possibly optimistic) status
    pub task: Task,
    /// Last status the server confirmed; drives the chip and edit trigger
    pub confirmed: TaskStatus,
    pub dragging: bool,
    /// A dropped move is waiting for the server; the card cannot be dragged
    pub syncing: bool,
    pub origin: Option<OriginSnapshot>,
}

impl Card {
    pub fn new(task: Task) -> Self {
        let confirmed = task.status;
        Self {
            task,
            confirmed,
            dragging: false,
            syncing: false,
            origin: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.task.id
    }

    pub fn status(&self) -> TaskStatus {
        self.task.status
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub status: TaskStatus,
    pub drop_ready: bool,
    pub cards: Vec<Card>,
}

impl Column {
    fn new(status: TaskStatus) -> Self {
        Self {
            status,
            drop_ready: false,
            cards: Vec::new(),
        }
    }

    fn position(&self, task_id: &str) -> Option<usize> {
        self.cards.iter().position(|c| c.id() == task_id)
    }
}

/// A move applied optimistically and waiting for the server
#[derive(Debug, Clone, PartialEq)]
pub struct PendingMove {
    pub task_id: TaskId,
    pub to: TaskStatus,
    pub previous_status: TaskStatus,
    pub origin: OriginSnapshot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    columns: Vec<Column>,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            columns: TaskStatus::ALL.into_iter().map(Column::new).collect(),
        }
    }
}

impl Board {
    /// Build a board from server tasks, keeping their given order
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut board = Self::default();
        for task in tasks {
            let status = task.status;
            if let Some(column) = board.column_mut(status) {
                column.cards.push(Card::new(task));
            }
        }
        board
    }

    pub fn column(&self, status: TaskStatus) -> Option<&Column> {
        self.columns.iter().find(|c| c.status == status)
    }

    fn column_mut(&mut self, status: TaskStatus) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.status == status)
    }

    /// Card ids of a column in display order
    pub fn card_ids(&self, status: TaskStatus) -> Vec<TaskId> {
        self.column(status)
            .map(|c| c.cards.iter().map(|card| card.task.id.clone()).collect())
            .unwrap_or_default()
    }

    /// Locate a card as (column index, card index)
    fn locate(&self, task_id: &str) -> Option<(usize, usize)> {
        self.columns
            .iter()
            .enumerate()
            .find_map(|(ci, col)| col.position(task_id).map(|i| (ci, i)))
    }

    pub fn card(&self, task_id: &str) -> Option<&Card> {
        self.locate(task_id).map(|(ci, i)| &self.columns[ci].cards[i])
    }

    fn card_mut(&mut self, task_id: &str) -> Option<&mut Card> {
        self.locate(task_id).map(|(ci, i)| &mut self.columns[ci].cards[i])
    }

    /// Current (column status, index) of a card
    pub fn position_of(&self, task_id: &str) -> Option<(TaskStatus, usize)> {
        self.locate(task_id).map(|(ci, i)| (self.columns[ci].status, i))
    }

    fn take_card(&mut self, task_id: &str) -> Option<Card> {
        let (ci, i) = self.locate(task_id)?;
        Some(self.columns[ci].cards.remove(i))
    }

    /// Insert at `index`, appending when the index is past the end
    fn insert_card(&mut self, status: TaskStatus, index: Option<usize>, card: Card) {
        let Some(column) = self.column_mut(status) else {
            return;
        };
        match index {
            Some(i) if i < column.cards.len() => column.cards.insert(i, card),
            _ => column.cards.push(card),
        }
    }

    /// Mark a card as dragging and record its origin snapshot.
    ///
    /// Refused while the card's previous move is still syncing.
    pub fn start_drag(&mut self, task_id: &str) -> Option<CardDrag> {
        let (ci, i) = self.locate(task_id)?;
        let column_status = self.columns[ci].status;
        let card = &mut self.columns[ci].cards[i];
        if card.syncing {
            return None;
        }
        card.dragging = true;
        let origin = OriginSnapshot {
            status: card.task.status,
            index: i,
        };
        card.origin = Some(origin);
        debug_assert_eq!(origin.status, column_status);
        Some(CardDrag::new(card.task.id.clone(), origin.status, i))
    }

    /// Dragover on a column. Moves the dragged card before `before`
    /// (a non-dragging sibling in that column) or to the end.
    pub fn drag_over(&mut self, session: Option<&CardDrag>, target: TaskStatus, before: Option<&str>) {
        let Some(column) = self.column_mut(target) else {
            return;
        };
        column.drop_ready = true;
        let Some(session) = session else {
            return;
        };
        let dragged = session.item.as_str();
        if before == Some(dragged) {
            return;
        }
        let Some(card) = self.take_card(dragged) else {
            return;
        };
        let index = before.and_then(|id| self.column(target).and_then(|c| c.position(id)));
        self.insert_card(target, index, card);
    }

    pub fn drag_leave(&mut self, target: TaskStatus) {
        if let Some(column) = self.column_mut(target) {
            column.drop_ready = false;
        }
    }

    /// Drop on a column. Applies the optimistic status change and
    /// returns the move to sync, or `None` when there is nothing to do.
    pub fn begin_drop(&mut self, payload: Option<&str>, target: TaskStatus) -> Option<PendingMove> {
        self.drag_leave(target);
        let task_id = payload.filter(|id| !id.is_empty())?;
        let (status, index) = self.position_of(task_id)?;
        let card = self.card(task_id)?;
        if card.status() == target || card.syncing {
            return None;
        }
        let previous_status = card.status();
        let origin = card.origin.unwrap_or(OriginSnapshot {
            status: previous_status,
            index,
        });

        // No dragover reached this column; bring the card along
        if status != target {
            let card = self.take_card(task_id)?;
            self.insert_card(target, None, card);
        }
        let card = self.card_mut(task_id)?;
        card.task.status = target;
        card.syncing = true;

        Some(PendingMove {
            task_id: task_id.to_string(),
            to: target,
            previous_status,
            origin,
        })
    }

    /// Server confirmed the move: the new position becomes the baseline
    pub fn confirm_move(&mut self, pending: &PendingMove) {
        let Some((status, index)) = self.position_of(&pending.task_id) else {
            return;
        };
        let Some(card) = self.card_mut(&pending.task_id) else {
            return;
        };
        card.confirmed = pending.to;
        card.syncing = false;
        card.origin = Some(OriginSnapshot { status, index });
    }

    /// Server rejected the move: restore status and origin position
    pub fn rollback_move(&mut self, pending: &PendingMove) {
        let Some(mut card) = self.take_card(&pending.task_id) else {
            return;
        };
        card.task.status = pending.previous_status;
        card.syncing = false;
        self.insert_card(pending.origin.status, Some(pending.origin.index), card);
    }

    /// Gesture finished (dropped or abandoned).
    ///
    /// A card left in a foreign column without a drop goes back to its
    /// origin so status and column agree again.
    pub fn end_drag(&mut self, task_id: &str) {
        if let Some((status, _)) = self.position_of(task_id) {
            let stray = self
                .card(task_id)
                .filter(|c| c.status() != status)
                .and_then(|c| c.origin);
            if let Some(origin) = stray {
                if let Some(card) = self.take_card(task_id) {
                    self.insert_card(origin.status, Some(origin.index), card);
                }
            }
        }
        if let Some(card) = self.card_mut(task_id) {
            card.dragging = false;
        }
        for column in &mut self.columns {
            column.drop_ready = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, status: TaskStatus) -> Task {
        Task::new(id, format!("Task {}", id), status)
    }

    /// todo: t1, t2 / in_progress: - / done: d1, d2
    fn sample_board() -> Board {
        Board::from_tasks(vec![
            task("t1", TaskStatus::Todo),
            task("t2", TaskStatus::Todo),
            task("d1", TaskStatus::Done),
            task("d2", TaskStatus::Done),
        ])
    }

    #[test]
    fn test_from_tasks_groups_by_status() {
        let board = sample_board();
        assert_eq!(TaskStatus::ALL.map(|s| board.column(s).is_some()), [true; 3]);
        assert_eq!(board.card_ids(TaskStatus::Todo), vec!["t1", "t2"]);
        assert!(board.card_ids(TaskStatus::InProgress).is_empty());
        assert_eq!(board.card_ids(TaskStatus::Done), vec!["d1", "d2"]);
    }

    #[test]
    fn test_start_drag_records_origin() {
        let mut board = sample_board();
        let session = board.start_drag("t2").unwrap();
        assert_eq!(session.item, "t2");
        assert_eq!(session.origin, TaskStatus::Todo);
        assert_eq!(session.origin_index, 1);

        let card = board.card("t2").unwrap();
        assert!(card.dragging);
        assert_eq!(card.origin, Some(OriginSnapshot { status: TaskStatus::Todo, index: 1 }));
        assert!(board.start_drag("missing").is_none());
    }

    #[test]
    fn test_drag_over_inserts_before_sibling() {
        let mut board = sample_board();
        let session = board.start_drag("t1").unwrap();
        board.drag_over(Some(&session), TaskStatus::Done, Some("d2"));

        assert_eq!(board.card_ids(TaskStatus::Todo), vec!["t2"]);
        assert_eq!(board.card_ids(TaskStatus::Done), vec!["d1", "t1", "d2"]);
        assert!(board.column(TaskStatus::Done).unwrap().drop_ready);
        // Status is not touched until drop
        assert_eq!(board.card("t1").unwrap().status(), TaskStatus::Todo);
    }

    #[test]
    fn test_drag_over_appends_without_sibling() {
        let mut board = sample_board();
        let session = board.start_drag("t1").unwrap();
        board.drag_over(Some(&session), TaskStatus::InProgress, None);
        assert_eq!(board.card_ids(TaskStatus::InProgress), vec!["t1"]);
        board.drag_over(Some(&session), TaskStatus::Done, None);
        assert_eq!(board.card_ids(TaskStatus::Done), vec!["d1", "d2", "t1"]);
        assert!(board.card_ids(TaskStatus::InProgress).is_empty());
    }

    #[test]
    fn test_drag_over_is_idempotent() {
        let mut board = sample_board();
        let session = board.start_drag("t1").unwrap();
        board.drag_over(Some(&session), TaskStatus::Done, Some("d2"));
        let once = board.clone();
        board.drag_over(Some(&session), TaskStatus::Done, Some("d2"));
        assert_eq!(board, once);
    }

    #[test]
    fn test_drag_over_without_session_only_marks_column() {
        let mut board = sample_board();
        board.drag_over(None, TaskStatus::InProgress, None);
        assert!(board.column(TaskStatus::InProgress).unwrap().drop_ready);
        assert_eq!(board.card_ids(TaskStatus::Todo), vec!["t1", "t2"]);
        board.drag_leave(TaskStatus::InProgress);
        assert!(!board.column(TaskStatus::InProgress).unwrap().drop_ready);
    }

    #[test]
    fn test_final_position_depends_only_on_last_dragover() {
        // Fixed geometry for the done column: d1 at 50, d2 at 150
        let midpoints = [("d1", 50.0), ("d2", 150.0)];
        let before_at = |y: f64| dom_dragdrop::closest_following(midpoints.iter().copied(), y);

        let mut wandering = sample_board();
        let session = wandering.start_drag("t1").unwrap();
        for y in [10.0, 400.0, 120.0, 60.0, 300.0, 100.0] {
            wandering.drag_over(Some(&session), TaskStatus::Done, before_at(y));
        }

        let mut direct = sample_board();
        let session = direct.start_drag("t1").unwrap();
        direct.drag_over(Some(&session), TaskStatus::Done, before_at(100.0));

        assert_eq!(wandering, direct);
        assert_eq!(direct.card_ids(TaskStatus::Done), vec!["d1", "t1", "d2"]);
    }

    #[test]
    fn test_same_column_drop_is_noop() {
        let mut board = sample_board();
        let session = board.start_drag("t1").unwrap();
        board.drag_over(Some(&session), TaskStatus::Todo, None);
        assert_eq!(board.card_ids(TaskStatus::Todo), vec!["t2", "t1"]);

        let pending = board.begin_drop(Some("t1"), TaskStatus::Todo);
        assert!(pending.is_none());
        assert_eq!(board.card_ids(TaskStatus::Todo), vec!["t2", "t1"]);
        assert!(!board.column(TaskStatus::Todo).unwrap().drop_ready);
    }

    #[test]
    fn test_drop_without_payload_is_noop() {
        let mut board = sample_board();
        let before = board.clone();
        assert!(board.begin_drop(None, TaskStatus::Done).is_none());
        assert!(board.begin_drop(Some(""), TaskStatus::Done).is_none());
        assert!(board.begin_drop(Some("ghost"), TaskStatus::Done).is_none());
        assert_eq!(board, before);
    }

    #[test]
    fn test_drop_applies_optimistic_status() {
        let mut board = sample_board();
        let session = board.start_drag("t1").unwrap();
        board.drag_over(Some(&session), TaskStatus::Done, Some("d2"));
        let pending = board.begin_drop(Some("t1"), TaskStatus::Done).unwrap();

        assert_eq!(pending.to, TaskStatus::Done);
        assert_eq!(pending.previous_status, TaskStatus::Todo);
        assert_eq!(pending.origin, OriginSnapshot { status: TaskStatus::Todo, index: 0 });

        let card = board.card("t1").unwrap();
        assert_eq!(card.status(), TaskStatus::Done);
        // Chip keeps the confirmed status until the server answers
        assert_eq!(card.confirmed, TaskStatus::Todo);
        assert_eq!(board.position_of("t1"), Some((TaskStatus::Done, 1)));
    }

    #[test]
    fn test_drop_without_dragover_moves_card() {
        let mut board = sample_board();
        board.start_drag("t2").unwrap();
        board.begin_drop(Some("t2"), TaskStatus::InProgress).unwrap();
        assert_eq!(board.card_ids(TaskStatus::InProgress), vec!["t2"]);
        assert_eq!(board.card_ids(TaskStatus::Todo), vec!["t1"]);
    }

    #[test]
    fn test_rollback_restores_every_origin_index() {
        let tasks: Vec<Task> = (0..4).map(|i| task(&format!("t{}", i), TaskStatus::Todo)).collect();
        for origin in 0..4 {
            let mut board = Board::from_tasks(tasks.clone());
            board.column_mut(TaskStatus::Done).unwrap().cards.push(Card::new(task("d1", TaskStatus::Done)));
            let pristine = board.clone();
            let id = format!("t{}", origin);

            let session = board.start_drag(&id).unwrap();
            board.drag_over(Some(&session), TaskStatus::Done, Some("d1"));
            let pending = board.begin_drop(Some(&id), TaskStatus::Done).unwrap();
            board.rollback_move(&pending);
            board.end_drag(&id);

            let card = board.card(&id).unwrap();
            assert_eq!(card.status(), TaskStatus::Todo);
            assert_eq!(board.position_of(&id), Some((TaskStatus::Todo, origin)));
            assert_eq!(board.card_ids(TaskStatus::Todo), pristine.card_ids(TaskStatus::Todo));
            assert_eq!(board.card_ids(TaskStatus::Done), vec!["d1"]);
        }
    }

    #[test]
    fn test_rollback_appends_when_origin_index_is_stale() {
        let mut board = sample_board();
        let session = board.start_drag("t2").unwrap();
        board.drag_over(Some(&session), TaskStatus::Done, None);
        let pending = board.begin_drop(Some("t2"), TaskStatus::Done).unwrap();

        // Sibling vanished while the request was in flight
        board.take_card("t1");
        board.rollback_move(&pending);

        assert_eq!(board.card_ids(TaskStatus::Todo), vec!["t2"]);
        assert_eq!(board.card("t2").unwrap().status(), TaskStatus::Todo);
    }

    #[test]
    fn test_confirm_moves_baseline() {
        let mut board = sample_board();
        let session = board.start_drag("t1").unwrap();
        board.drag_over(Some(&session), TaskStatus::Done, Some("d2"));
        let pending = board.begin_drop(Some("t1"), TaskStatus::Done).unwrap();
        board.confirm_move(&pending);
        board.end_drag("t1");

        let card = board.card("t1").unwrap();
        assert_eq!(card.confirmed, TaskStatus::Done);
        assert_eq!(card.origin, Some(OriginSnapshot { status: TaskStatus::Done, index: 1 }));
        assert!(!card.dragging);
        let confirmed = board.clone();

        // Second move fails and returns to the confirmed position
        let session = board.start_drag("t1").unwrap();
        board.drag_over(Some(&session), TaskStatus::InProgress, None);
        let pending = board.begin_drop(Some("t1"), TaskStatus::InProgress).unwrap();
        assert_eq!(pending.previous_status, TaskStatus::Done);
        board.rollback_move(&pending);
        board.end_drag("t1");

        assert_eq!(board, confirmed);
    }

    #[test]
    fn test_abandoned_drag_returns_to_origin() {
        let mut board = sample_board();
        let session = board.start_drag("t2").unwrap();
        board.drag_over(Some(&session), TaskStatus::Done, Some("d1"));
        board.end_drag("t2");

        assert_eq!(board.card_ids(TaskStatus::Todo), vec!["t1", "t2"]);
        assert_eq!(board.card_ids(TaskStatus::Done), vec!["d1", "d2"]);
        assert!(!board.card("t2").unwrap().dragging);
    }

    #[test]
    fn test_abandoned_drag_in_own_column_keeps_order() {
        let mut board = sample_board();
        let session = board.start_drag("t1").unwrap();
        board.drag_over(Some(&session), TaskStatus::Todo, None);
        board.end_drag("t1");
        assert_eq!(board.card_ids(TaskStatus::Todo), vec!["t2", "t1"]);
    }

    #[test]
    fn test_end_drag_clears_markers() {
        let mut board = sample_board();
        let session = board.start_drag("t1").unwrap();
        board.drag_over(Some(&session), TaskStatus::Done, None);
        board.end_drag("t1");
        assert!(!board.card("t1").unwrap().dragging);
        assert!(TaskStatus::ALL.iter().all(|s| !board.column(*s).unwrap().drop_ready));
    }

    #[test]
    fn test_syncing_card_cannot_be_dragged_again() {
        let mut board = sample_board();
        let session = board.start_drag("t1").unwrap();
        board.drag_over(Some(&session), TaskStatus::InProgress, None);
        let first = board.begin_drop(Some("t1"), TaskStatus::InProgress).unwrap();
        board.end_drag("t1");
        assert!(board.card("t1").unwrap().syncing);

        // Origin of the in-flight move must survive a second gesture
        assert!(board.start_drag("t1").is_none());
        assert!(board.begin_drop(Some("t1"), TaskStatus::Done).is_none());
        assert_eq!(board.card("t1").unwrap().origin, Some(OriginSnapshot { status: TaskStatus::Todo, index: 0 }));

        board.rollback_move(&first);
        let card = board.card("t1").unwrap();
        assert!(!card.syncing);
        assert_eq!(card.status(), TaskStatus::Todo);
        assert_eq!(card.confirmed, TaskStatus::Todo);
        assert_eq!(board.position_of("t1"), Some((TaskStatus::Todo, 0)));
        assert!(board.start_drag("t1").is_some());
    }

    #[test]
    fn test_confirm_clears_syncing() {
        let mut board = sample_board();
        board.start_drag("t2").unwrap();
        let pending = board.begin_drop(Some("t2"), TaskStatus::Done).unwrap();
        board.end_drag("t2");
        board.confirm_move(&pending);
        assert!(!board.card("t2").unwrap().syncing);
        assert!(board.start_drag("t2").is_some());
    }
}
