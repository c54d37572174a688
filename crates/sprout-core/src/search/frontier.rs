//! Search branches and the FIFO frontier.

use crate::vocab::TokenId;
use std::collections::VecDeque;

/// One partial sequence under expansion.
///
/// A branch owns its carried model state exclusively; children receive a
/// clone of the successor state, never a shared reference.
#[derive(Debug, Clone)]
pub struct Branch<S> {
    /// Output string accumulated so far (seed included).
    pub text: String,
    /// Token id to feed the model on this branch's next step.
    pub pending: TokenId,
    /// Carried model state, `None` before the first unprimed step.
    pub state: Option<S>,
}

impl<S> Branch<S> {
    /// Create the root branch of an attempt.
    pub fn root(text: String, pending: TokenId, state: Option<S>) -> Self {
        Self {
            text,
            pending,
            state,
        }
    }

    /// Create a child continuing this branch with a drawn token.
    pub fn child(&self, token_text: &str, token: TokenId, state: S) -> Self {
        let mut text = String::with_capacity(self.text.len() + token_text.len());
        text.push_str(&self.text);
        text.push_str(token_text);

        Self {
            text,
            pending: token,
            state: Some(state),
        }
    }
}

/// FIFO queue of live branches.
///
/// Breadth-first order comes from taking the whole queue as one round:
/// every branch at the current depth is expanded before any of the children
/// it pushed.
#[derive(Debug)]
pub struct Frontier<S> {
    queue: VecDeque<Branch<S>>,
}

impl<S> Frontier<S> {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Enqueue a branch at the back.
    pub fn push(&mut self, branch: Branch<S>) {
        self.queue.push_back(branch);
    }

    /// Remove and return every branch currently queued.
    ///
    /// Children pushed while the returned round is processed form the next
    /// round.
    pub fn take_round(&mut self) -> VecDeque<Branch<S>> {
        std::mem::take(&mut self.queue)
    }

    /// Number of live branches.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Check whether no branches remain.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<S> Default for Frontier<S> {
    fn default() -> Self {
        Self::new()
    }
}
