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

use rand::Rng;
use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::card::Orientation;

/// The direction in which cards are asked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Show the symbol, ask for the name.
    #[default]
    SymbolToName,
    /// Show the name, ask for the symbol.
    NameToSymbol,
    /// Pick an orientation at random for every card shown.
    #[serde(alias = "mix")]
    Mixed,
}

impl Direction {
    pub const ALL: [Direction; 3] = [
        Direction::SymbolToName,
        Direction::NameToSymbol,
        Direction::Mixed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::SymbolToName => "symbol_to_name",
            Direction::NameToSymbol => "name_to_symbol",
            Direction::Mixed => "mixed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Direction::SymbolToName => "Symbol → Name",
            Direction::NameToSymbol => "Name → Symbol",
            Direction::Mixed => "Mixed",
        }
    }

    pub fn parse(value: &str) -> Fallible<Self> {
        match value {
            "symbol_to_name" => Ok(Direction::SymbolToName),
            "name_to_symbol" => Ok(Direction::NameToSymbol),
            "mixed" | "mix" => Ok(Direction::Mixed),
            _ => fail(format!("invalid direction: {value}")),
        }
    }

    /// The orientation for the next card shown.
    pub fn orient<R: Rng + ?Sized>(self, rng: &mut R) -> Orientation {
        match self {
            Direction::SymbolToName => Orientation::SymbolFirst,
            Direction::NameToSymbol => Orientation::NameFirst,
            Direction::Mixed => {
                if rng.random_bool(0.5) {
                    Orientation::SymbolFirst
                } else {
                    Orientation::NameFirst
                }
            }
        }
    }
}
