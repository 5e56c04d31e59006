//! Daily "vibe check" state machine.
//!
//! `Idle -> Prompting[0..n] -> Finished -> Idle`. The set of questions is
//! captured when a cycle begins; ledger changes mid-cycle do not reshape it.
//! Persisting the "done for today" marker is the caller's job whenever
//! [`UsagePromptEngine::acknowledge`] or [`UsagePromptEngine::dismiss`] return.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::value_objects::usage::UsageSignal;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PromptItem {
    pub subscription_id: String,
    pub service: String,
    pub icon: String,
    pub question: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PromptState {
    Idle,
    Prompting { items: Vec<PromptItem>, index: usize },
    Finished,
}

/// The question currently on screen.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PromptView {
    pub item: PromptItem,
    pub position: usize,
    pub total: usize,
    pub is_last: bool,
}

/// An answer the caller must write into the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageAnswer {
    pub subscription_id: String,
    pub signal: UsageSignal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UsagePromptEngine {
    state: PromptState,
}

impl Default for UsagePromptEngine {
    fn default() -> Self {
        Self {
            state: PromptState::Idle,
        }
    }
}

/// Whether a cycle is due: not yet completed today and something to ask about.
pub fn is_due(done_on: Option<NaiveDate>, today: NaiveDate, active_count: usize) -> bool {
    done_on != Some(today) && active_count > 0
}

impl UsagePromptEngine {
    pub fn state(&self) -> &PromptState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, PromptState::Idle)
    }

    pub fn is_prompting(&self) -> bool {
        matches!(self.state, PromptState::Prompting { .. })
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, PromptState::Finished)
    }

    /// Starts a cycle over `items`. Only valid from `Idle`; an empty list keeps it idle.
    pub fn begin(&mut self, items: Vec<PromptItem>) -> bool {
        if !self.is_idle() || items.is_empty() {
            return false;
        }
        self.state = PromptState::Prompting { items, index: 0 };
        true
    }

    pub fn current(&self) -> Option<PromptView> {
        match &self.state {
            PromptState::Prompting { items, index } => items.get(*index).map(|item| PromptView {
                item: item.clone(),
                position: index + 1,
                total: items.len(),
                is_last: index + 1 >= items.len(),
            }),
            _ => None,
        }
    }

    /// Records an answer for the current question and moves on.
    pub fn answer(&mut self, signal: UsageSignal) -> Option<UsageAnswer> {
        let subscription_id = match &self.state {
            PromptState::Prompting { items, index } => items.get(*index)?.subscription_id.clone(),
            _ => return None,
        };
        self.advance();
        Some(UsageAnswer {
            subscription_id,
            signal,
        })
    }

    /// Moves past the current question without logging anything.
    pub fn skip(&mut self) -> bool {
        if !self.is_prompting() {
            return false;
        }
        self.advance();
        true
    }

    /// Leaves `Finished` for `Idle`. Returns true when the cycle was completed.
    pub fn acknowledge(&mut self) -> bool {
        if !self.is_finished() {
            return false;
        }
        self.state = PromptState::Idle;
        true
    }

    /// Abandons the cycle from any state.
    pub fn dismiss(&mut self) {
        self.state = PromptState::Idle;
    }

    fn advance(&mut self) {
        if let PromptState::Prompting { items, index } = &mut self.state {
            *index += 1;
            if *index >= items.len() {
                self.state = PromptState::Finished;
            }
        }
    }
}
