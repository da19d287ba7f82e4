// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::HashSet;
use std::collections::VecDeque;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::card::Card;
use crate::types::card::CardId;
use crate::types::timestamp::Timestamp;

/// Message shown when the filters leave nothing to drill.
pub const NO_MATCHES: &str = "no cards match the selected filters.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// No session has been started, or the last one was exited.
    Idle,
    /// Cards remain in the queue.
    Running,
    /// Every card has been answered correctly once.
    Finished,
}

/// First-attempt statistics for one session.
#[derive(Clone, Debug)]
pub struct SessionStats {
    total_cards: usize,
    first_attempt_correct: usize,
    first_attempt_incorrect: usize,
    /// Failed answers on cards that had already been shown.
    repeat_failures: usize,
    started_at: Timestamp,
    seen: HashSet<CardId>,
}

impl SessionStats {
    fn new(total_cards: usize, started_at: Timestamp) -> Self {
        Self {
            total_cards,
            first_attempt_correct: 0,
            first_attempt_incorrect: 0,
            repeat_failures: 0,
            started_at,
            seen: HashSet::new(),
        }
    }

    fn record(&mut self, id: CardId, known: bool) {
        if self.seen.insert(id) {
            if known {
                self.first_attempt_correct += 1;
            } else {
                self.first_attempt_incorrect += 1;
            }
        } else if !known {
            self.repeat_failures += 1;
        }
        debug_assert!(self.first_attempt_correct + self.first_attempt_incorrect <= self.total_cards);
    }

    pub fn total_cards(&self) -> usize {
        self.total_cards
    }

    pub fn first_attempt_correct(&self) -> usize {
        self.first_attempt_correct
    }

    pub fn first_attempt_incorrect(&self) -> usize {
        self.first_attempt_incorrect
    }

    #[cfg(test)]
    pub fn repeat_failures(&self) -> usize {
        self.repeat_failures
    }

    /// Every failed answer, first attempt or not.
    pub fn wrong_attempts(&self) -> usize {
        self.first_attempt_incorrect + self.repeat_failures
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }
}

/// The session queue controller.
///
/// The queue is a FIFO: the front card is the one being shown. A card answered
/// correctly leaves the queue for good; a card answered incorrectly goes to
/// the back, so it comes round again only after every other remaining card.
/// The session finishes when the queue is empty, which means every card has
/// been answered correctly exactly once.
pub struct Session {
    state: SessionState,
    queue: VecDeque<Card>,
    /// The deck the current session was started with, in its original order.
    batch: Vec<Card>,
    completed: usize,
    stats: Option<SessionStats>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            queue: VecDeque::new(),
            batch: Vec::new(),
            completed: 0,
            stats: None,
        }
    }

    pub fn start(&mut self, deck: Vec<Card>) -> Fallible<()> {
        self.start_at(deck, Timestamp::now())
    }

    /// Start a session on `deck`. Starting while a session is running
    /// abandons it. An empty deck is refused and leaves everything as it was.
    pub fn start_at(&mut self, deck: Vec<Card>, now: Timestamp) -> Fallible<()> {
        if deck.is_empty() {
            return fail(NO_MATCHES);
        }
        if self.state == SessionState::Running {
            log::debug!(
                "Abandoning running session with {} cards left.",
                self.queue.len()
            );
        }
        log::debug!("Starting session with {} cards.", deck.len());
        self.stats = Some(SessionStats::new(deck.len(), now));
        self.batch = deck.clone();
        self.queue = VecDeque::from(deck);
        self.completed = 0;
        self.state = SessionState::Running;
        Ok(())
    }

    /// Answer the current card.
    ///
    /// # Panics
    ///
    /// If the session is not running.
    pub fn submit(&mut self, known: bool) -> SessionState {
        if self.state != SessionState::Running {
            panic!("submit called in state {:?}", self.state);
        }
        let Some(card) = self.queue.pop_front() else {
            panic!("running session has an empty queue");
        };
        let Some(stats) = self.stats.as_mut() else {
            panic!("running session has no statistics");
        };
        stats.record(card.id(), known);
        if known {
            self.completed += 1;
        } else {
            log::debug!("Recycling card {} ({}).", card.id(), card.symbol());
            self.queue.push_back(card);
        }
        if self.queue.is_empty() {
            log::debug!("Session finished.");
            self.state = SessionState::Finished;
        }
        self.state
    }

    /// Discard the session, whatever state it is in.
    pub fn exit(&mut self) {
        if self.state == SessionState::Running {
            log::debug!("Exiting session with {} cards left.", self.queue.len());
        }
        *self = Self::new();
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The card being shown, if the session is running.
    pub fn current(&self) -> Option<&Card> {
        match self.state {
            SessionState::Running => self.queue.front(),
            SessionState::Idle | SessionState::Finished => None,
        }
    }

    /// Cards answered correctly, and cards in the session.
    pub fn progress(&self) -> (usize, usize) {
        let total = self.stats.as_ref().map_or(0, |stats| stats.total_cards());
        (self.completed, total)
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn stats(&self) -> Option<&SessionStats> {
        self.stats.as_ref()
    }

    pub fn batch(&self) -> &[Card] {
        &self.batch
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
