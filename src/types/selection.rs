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

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

/// The values selected for one filter category.
///
/// An empty set means "all": there is no way to represent a selection that is
/// both "all" and a specific subset. Serializes as a plain list, with `[]`
/// meaning "all".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    values: BTreeSet<u8>,
}

impl Selection {
    #[cfg(test)]
    pub fn all() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn only(values: impl IntoIterator<Item = u8>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    pub fn is_all(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether `value` is one of the specifically selected values.
    pub fn is_selected(&self, value: u8) -> bool {
        self.values.contains(&value)
    }

    pub fn select_all(&mut self) {
        self.values.clear();
    }

    /// Toggle a specific value. Deselecting the last value reverts to "all".
    pub fn toggle(&mut self, value: u8) {
        if !self.values.remove(&value) {
            self.values.insert(value);
        }
    }

    /// Does a card with this category value pass the filter? A card without a
    /// value only passes the "all" selection.
    pub fn matches(&self, value: Option<u8>) -> bool {
        if self.is_all() {
            return true;
        }
        match value {
            Some(value) => self.values.contains(&value),
            None => false,
        }
    }
}
