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

use std::sync::Arc;
use std::sync::Mutex;

use rand::rngs::StdRng;

use crate::catalog::Catalog;
use crate::prefs::Preferences;
use crate::session::Session;
use crate::types::card::Orientation;
use crate::types::settings::SessionSettings;
use crate::types::theme::Theme;
use crate::types::timestamp::Timestamp;

#[derive(Clone)]
pub struct ServerState {
    pub catalog: Arc<Catalog>,
    pub prefs: Preferences,
    pub mutable: Arc<Mutex<MutableState>>,
}

pub struct MutableState {
    /// The settings being edited on the setup screen.
    pub draft: SessionSettings,
    /// The settings the current session was started with.
    pub active: SessionSettings,
    pub session: Session,
    /// How the current card is shown.
    pub orientation: Orientation,
    pub flipped: bool,
    pub confirm_exit: bool,
    pub finished_at: Option<Timestamp>,
    /// A message for the setup screen, e.g. when the filters match nothing.
    pub notice: Option<String>,
    pub theme: Theme,
    pub rng: StdRng,
}

impl MutableState {
    pub fn new(draft: SessionSettings, theme: Theme, rng: StdRng) -> Self {
        Self {
            active: draft.clone(),
            draft,
            session: Session::new(),
            orientation: Orientation::SymbolFirst,
            flipped: false,
            confirm_exit: false,
            finished_at: None,
            notice: None,
            theme,
            rng,
        }
    }

    /// Reset the card view for the card now at the front of the queue.
    pub fn show_next_card(&mut self) {
        self.flipped = false;
        self.orientation = self.active.direction.orient(&mut self.rng);
    }
}
