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

use std::fmt::Display;
use std::fmt::Formatter;

use chrono::TimeDelta;

use crate::session::SessionStats;
use crate::types::timestamp::Timestamp;

/// The results shown at the end of a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub correct: usize,
    pub accuracy_percent: u32,
    pub elapsed: Elapsed,
}

/// Session duration, displayed as `m:ss`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Elapsed(TimeDelta);

impl Display for Elapsed {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let seconds = self.0.num_seconds();
        write!(f, "{}:{:02}", seconds / 60, seconds % 60)
    }
}

pub fn summarize(stats: &SessionStats, now: Timestamp) -> Summary {
    let correct = stats.first_attempt_correct();
    Summary {
        total: stats.total_cards(),
        correct,
        accuracy_percent: accuracy_percent(correct, stats.wrong_attempts()),
        elapsed: Elapsed(now.since(stats.started_at())),
    }
}

/// Percentage of correct answers, rounded half up. No attempts counts as 100.
fn accuracy_percent(correct: usize, wrong: usize) -> u32 {
    let attempts = correct + wrong;
    if attempts == 0 {
        return 100;
    }
    ((200 * correct + attempts) / (2 * attempts)) as u32
}
