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

use serde::Deserialize;

/// The stable identifier of a card within a catalog.
pub type CardId = u32;

/// A single element fact, as read from the catalog file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Card {
    id: CardId,
    /// The element symbol, e.g. `Fe`.
    symbol: String,
    /// The name the drill asks for.
    #[serde(alias = "name_cz")]
    name: String,
    #[serde(default)]
    name_en: Option<String>,
    #[serde(default)]
    name_lat: Option<String>,
    atomic_number: u32,
    period: u8,
    /// Lanthanides and actinides have no group in some tables.
    #[serde(default)]
    group: Option<u8>,
}

/// Which fact is shown on the front of the card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    SymbolFirst,
    NameFirst,
}

impl Card {
    #[cfg(test)]
    pub fn new(id: CardId, symbol: &str, name: &str, period: u8, group: Option<u8>) -> Self {
        Self {
            id,
            symbol: symbol.to_string(),
            name: name.to_string(),
            name_en: None,
            name_lat: None,
            atomic_number: id,
            period,
            group,
        }
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn name_en(&self) -> Option<&str> {
        self.name_en.as_deref()
    }

    pub fn name_lat(&self) -> Option<&str> {
        self.name_lat.as_deref()
    }

    pub fn atomic_number(&self) -> u32 {
        self.atomic_number
    }

    pub fn period(&self) -> u8 {
        self.period
    }

    pub fn group(&self) -> Option<u8> {
        self.group
    }

    pub fn front(&self, orientation: Orientation) -> &str {
        match orientation {
            Orientation::SymbolFirst => &self.symbol,
            Orientation::NameFirst => &self.name,
        }
    }

    pub fn back(&self, orientation: Orientation) -> &str {
        match orientation {
            Orientation::SymbolFirst => &self.name,
            Orientation::NameFirst => &self.symbol,
        }
    }
}
