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
use rand::seq::SliceRandom;

use crate::catalog::Catalog;
use crate::types::card::Card;
use crate::types::settings::SessionSettings;

/// Build the initial queue for a session: the cards matching the filters, in
/// uniformly random order, cut down to the batch size.
///
/// An empty result is not an error here. The session refuses to start on an
/// empty deck, and that is where the user is told.
pub fn build_deck<R: Rng + ?Sized>(
    catalog: &Catalog,
    settings: &SessionSettings,
    rng: &mut R,
) -> Vec<Card> {
    let mut cards = catalog.query(&settings.filters);
    let matched = cards.len();
    // Fisher-Yates. Shuffling before truncating makes the batch a uniform
    // sample of the matching cards.
    cards.shuffle(rng);
    cards.truncate(settings.batch_size.limit(matched));
    log::debug!(
        "Built deck of {} cards ({matched} matched the filters).",
        cards.len()
    );
    cards
}

/// Re-randomize the order of an existing batch.
pub fn reshuffle<R: Rng + ?Sized>(cards: &mut [Card], rng: &mut R) {
    cards.shuffle(rng);
}
