//! Board Controller
//!
//! Wires drag events to the board model and syncs drops with the server.

use std::cell::RefCell;

use crate::board::{Board, CardDrag, PendingMove};
use crate::commands::{StatusSync, SyncError};
use crate::models::TaskStatus;

/// Access to the board the controller mutates.
///
/// The app backs this with a reactive signal so every mutation re-renders.
pub trait BoardHandle {
    fn update_board<R>(&self, f: impl FnOnce(&mut Board) -> R) -> Option<R>;
}

/// Project identity sent with every status update
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectContext {
    pub project_id: String,
    pub csrf_token: String,
}

pub struct BoardController<H, S> {
    board: H,
    sync: S,
    project: ProjectContext,
    session: RefCell<Option<CardDrag>>,
}

impl<H: BoardHandle, S: StatusSync> BoardController<H, S> {
    pub fn new(board: H, sync: S, project: ProjectContext) -> Self {
        Self {
            board,
            sync,
            project,
            session: RefCell::new(None),
        }
    }

    /// Id of the card being dragged, if any
    pub fn dragging_id(&self) -> Option<String> {
        self.session.borrow().as_ref().map(|s| s.item.clone())
    }

    pub fn drag_start(&self, task_id: &str) -> bool {
        let session = self.board.update_board(|b| b.start_drag(task_id)).flatten();
        let started = session.is_some();
        if let Some(s) = &session {
            log::debug!("drag start {} from {} #{}", s.item, s.origin, s.origin_index);
        }
        *self.session.borrow_mut() = session;
        started
    }

    pub fn drag_over(&self, target: TaskStatus, before: Option<&str>) {
        let session = self.session.borrow();
        self.board.update_board(|b| b.drag_over(session.as_ref(), target, before));
    }

    pub fn drag_leave(&self, target: TaskStatus) {
        self.board.update_board(|b| b.drag_leave(target));
    }

    /// Synchronous half of a drop: optimistic update, then the gesture
    /// ends. Returns the move to hand to `sync_move`, if any.
    pub fn drop_card(&self, payload: Option<&str>, target: TaskStatus) -> Option<PendingMove> {
        let pending = self.board.update_board(|b| b.begin_drop(payload, target)).flatten();
        match &pending {
            Some(p) => log::debug!("drop {} {} -> {}", p.task_id, p.previous_status, p.to),
            None => log::debug!("drop on {} ignored", target),
        }
        if let Some(task_id) = payload {
            self.drag_end(task_id);
        }
        pending
    }

    /// Asynchronous half of a drop: one request, then confirm or roll back
    pub async fn sync_move(&self, pending: PendingMove) -> Result<(), SyncError> {
        let result = self
            .sync
            .update_status(
                &self.project.project_id,
                &pending.task_id,
                pending.to,
                &self.project.csrf_token,
            )
            .await;

        match &result {
            Ok(()) => {
                log::info!("task {} moved to {}", pending.task_id, pending.to);
                self.board.update_board(|b| b.confirm_move(&pending));
            }
            Err(e) => {
                log::warn!("task {} move to {} failed, rolling back: {}", pending.task_id, pending.to, e);
                self.board.update_board(|b| b.rollback_move(&pending));
            }
        }
        result
    }

    /// End whatever gesture is still open
    pub fn abandon_drag(&self) {
        let Some(task_id) = self.dragging_id() else {
            return;
        };
        log::debug!("drag of {} ended without dragend", task_id);
        self.drag_end(&task_id);
    }

    pub fn drag_end(&self, task_id: &str) {
        self.board.update_board(|b| b.end_drag(task_id));
        let mut session = self.session.borrow_mut();
        if session.as_ref().is_some_and(|s| s.item == task_id) {
            *session = None;
        }
    }
}
