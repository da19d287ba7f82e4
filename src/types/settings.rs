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
use std::num::NonZeroUsize;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::direction::Direction;
use crate::types::selection::Selection;

/// The number of periods in the table.
pub const PERIOD_COUNT: u8 = 7;

/// The number of groups in the table.
pub const GROUP_COUNT: u8 = 18;

/// Everything needed to build a deck and run a session. Fixed for the
/// duration of a session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSettings {
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub filters: Filters,
    #[serde(default)]
    pub batch_size: BatchSize,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Filters {
    #[serde(default)]
    pub period: Selection,
    #[serde(default)]
    pub group: Selection,
}

/// How many cards to drill in one session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BatchSizeRepr", into = "BatchSizeRepr")]
pub enum BatchSize {
    #[default]
    All,
    Limited(NonZeroUsize),
}

impl BatchSize {
    /// The batch sizes offered on the setup screen.
    pub const CHOICES: [BatchSize; 4] = [
        BatchSize::Limited(NonZeroUsize::new(5).unwrap()),
        BatchSize::Limited(NonZeroUsize::new(10).unwrap()),
        BatchSize::Limited(NonZeroUsize::new(20).unwrap()),
        BatchSize::All,
    ];

    pub fn parse(value: &str) -> Fallible<Self> {
        let value = value.trim();
        if value == "all" {
            return Ok(BatchSize::All);
        }
        match value.parse::<usize>().ok().and_then(NonZeroUsize::new) {
            Some(n) => Ok(BatchSize::Limited(n)),
            None => fail(format!("invalid batch size: {value}")),
        }
    }

    /// The number of cards to keep out of `available`.
    pub fn limit(self, available: usize) -> usize {
        match self {
            BatchSize::All => available,
            BatchSize::Limited(n) => available.min(n.get()),
        }
    }
}

impl Display for BatchSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchSize::All => write!(f, "all"),
            BatchSize::Limited(n) => write!(f, "{n}"),
        }
    }
}

/// Stored either as the string `"all"`, a number, or a numeric string.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum BatchSizeRepr {
    Count(usize),
    Keyword(String),
}

impl TryFrom<BatchSizeRepr> for BatchSize {
    type Error = ErrorReport;

    fn try_from(value: BatchSizeRepr) -> Result<Self, Self::Error> {
        match value {
            BatchSizeRepr::Count(n) => match NonZeroUsize::new(n) {
                Some(n) => Ok(BatchSize::Limited(n)),
                None => fail("batch size must be positive"),
            },
            BatchSizeRepr::Keyword(s) => BatchSize::parse(&s),
        }
    }
}

impl From<BatchSize> for BatchSizeRepr {
    fn from(value: BatchSize) -> Self {
        match value {
            BatchSize::All => BatchSizeRepr::Keyword("all".to_string()),
            BatchSize::Limited(n) => BatchSizeRepr::Count(n.get()),
        }
    }
}
