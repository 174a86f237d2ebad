//! Confirm-before-delete. There is one slot: asking to delete another post while a prompt is
//! open replaces the target.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteState {
    Idle,
    /// The confirmation prompt for this post is open.
    PendingConfirmation(i32),
    /// The user confirmed and the request for this post hasn't finished.
    Deleting(i32),
}

impl Default for DeleteState {
    fn default() -> Self {
        DeleteState::Idle
    }
}

#[derive(Debug, Default)]
pub struct DeleteWorkflow {
    state: DeleteState,
}

impl DeleteWorkflow {
    pub fn state(&self) -> DeleteState {
        self.state
    }

    /// The post whose confirmation prompt is open, if any.
    pub fn awaiting_confirmation(&self) -> Option<i32> {
        match self.state {
            DeleteState::PendingConfirmation(id) => Some(id),
            _ => None,
        }
    }

    pub fn request(&mut self, post_id: i32) {
        self.state = DeleteState::PendingConfirmation(post_id);
    }

    /// Close the prompt. Returns the post that was awaiting confirmation.
    pub fn cancel(&mut self) -> Option<i32> {
        let target = self.awaiting_confirmation();
        if target.is_some() {
            self.state = DeleteState::Idle;
        }
        target
    }

    /// Close the prompt and return the post to delete, if a prompt was open.
    pub fn confirm(&mut self) -> Option<i32> {
        let target = self.awaiting_confirmation()?;
        self.state = DeleteState::Deleting(target);
        Some(target)
    }

    /// The request for `post_id` completed, successfully or not. A prompt opened for another
    /// post while the request was in flight stays open.
    pub fn finish(&mut self, post_id: i32) {
        if self.state == DeleteState::Deleting(post_id) {
            self.state = DeleteState::Idle;
        }
    }
}
