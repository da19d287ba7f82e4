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

use axum::Form;
use axum::extract::State;
use axum::response::Redirect;
use serde::Deserialize;

use crate::deck::build_deck;
use crate::deck::reshuffle;
use crate::drill::state::MutableState;
use crate::drill::state::ServerState;
use crate::error::Fallible;
use crate::error::fail;
use crate::session::SessionState;
use crate::types::direction::Direction;
use crate::types::settings::BatchSize;
use crate::types::settings::GROUP_COUNT;
use crate::types::settings::PERIOD_COUNT;
use crate::types::timestamp::Timestamp;

#[derive(Debug, Deserialize)]
pub enum Action {
    SetDirection,
    TogglePeriod,
    AllPeriods,
    ToggleGroup,
    AllGroups,
    SetBatchSize,
    Start,
    Flip,
    Known,
    Unknown,
    Exit,
    ConfirmExit,
    CancelExit,
    Restart,
    NewGame,
    ToggleTheme,
}

#[derive(Deserialize)]
pub struct FormData {
    action: Action,
    #[serde(default)]
    value: Option<String>,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<FormData>,
) -> Redirect {
    match action_handler(&state, form.action, form.value.as_deref()) {
        Ok(_) => {}
        Err(e) => {
            log::error!("{e}");
        }
    }
    Redirect::to("/")
}

pub fn action_handler(state: &ServerState, action: Action, value: Option<&str>) -> Fallible<()> {
    let mut mutable = state.mutable.lock().unwrap();
    let m: &mut MutableState = &mut mutable;
    match action {
        Action::SetDirection => {
            m.draft.direction = Direction::parse(required(value)?)?;
        }
        Action::TogglePeriod => {
            let period = parse_category(required(value)?, PERIOD_COUNT)?;
            m.draft.filters.period.toggle(period);
        }
        Action::AllPeriods => {
            m.draft.filters.period.select_all();
        }
        Action::ToggleGroup => {
            let group = parse_category(required(value)?, GROUP_COUNT)?;
            m.draft.filters.group.toggle(group);
        }
        Action::AllGroups => {
            m.draft.filters.group.select_all();
        }
        Action::SetBatchSize => {
            m.draft.batch_size = BatchSize::parse(required(value)?)?;
        }
        Action::Start => {
            let settings = m.draft.clone();
            state.prefs.save_settings(&settings)?;
            let deck = build_deck(&state.catalog, &settings, &mut m.rng);
            match m.session.start(deck) {
                Ok(()) => {
                    m.active = settings;
                    m.notice = None;
                    m.confirm_exit = false;
                    m.finished_at = None;
                    m.show_next_card();
                }
                Err(e) => {
                    m.notice = Some(e.message().to_string());
                }
            }
        }
        Action::Flip => {
            if m.session.state() == SessionState::Running {
                m.flipped = !m.flipped;
            }
        }
        Action::Known | Action::Unknown => {
            if m.session.state() != SessionState::Running {
                return fail("answering outside a running session.");
            }
            if !m.flipped {
                return fail("answering a card that is not revealed.");
            }
            let known = matches!(action, Action::Known);
            match m.session.submit(known) {
                SessionState::Finished => {
                    m.finished_at = Some(Timestamp::now());
                }
                SessionState::Running | SessionState::Idle => {
                    m.show_next_card();
                }
            }
        }
        Action::Exit => {
            if m.session.state() == SessionState::Running {
                m.confirm_exit = true;
            }
        }
        Action::ConfirmExit => {
            if m.confirm_exit {
                m.session.exit();
                m.confirm_exit = false;
                m.flipped = false;
            }
        }
        Action::CancelExit => {
            m.confirm_exit = false;
        }
        Action::Restart => {
            let mut deck = m.session.batch().to_vec();
            reshuffle(&mut deck, &mut m.rng);
            m.session.start(deck)?;
            m.finished_at = None;
            m.confirm_exit = false;
            m.show_next_card();
        }
        Action::NewGame => {
            m.session.exit();
            m.finished_at = None;
            m.flipped = false;
        }
        Action::ToggleTheme => {
            m.theme = m.theme.toggled();
            state.prefs.save_theme(m.theme)?;
        }
    }
    Ok(())
}

fn required(value: Option<&str>) -> Fallible<&str> {
    match value {
        Some(value) => Ok(value),
        None => fail("missing form value."),
    }
}

/// Parse a period or group number in `1..=max`.
fn parse_category(value: &str, max: u8) -> Fallible<u8> {
    match value.parse::<u8>() {
        Ok(n) if (1..=max).contains(&n) => Ok(n),
        _ => fail(format!("invalid filter value: {value}")),
    }
}

#[cfg(test)]
mod tests {
    use std::fs::read_to_string;
    use std::sync::Arc;
    use std::sync::Mutex;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::catalog::Catalog;
    use crate::prefs::MemoryPreferenceStore;
    use crate::prefs::Preferences;
    use crate::session::NO_MATCHES;
    use crate::types::card::CardId;
    use crate::types::settings::SessionSettings;
    use crate::types::theme::Theme;

    fn server_state() -> Fallible<ServerState> {
        let catalog = Catalog::from_json(&read_to_string("./test/elements.json")?)?;
        let mutable = MutableState::new(
            SessionSettings::default(),
            Theme::Dark,
            StdRng::seed_from_u64(99),
        );
        Ok(ServerState {
            catalog: Arc::new(catalog),
            prefs: Preferences::new(MemoryPreferenceStore::default()),
            mutable: Arc::new(Mutex::new(mutable)),
        })
    }

    fn act(state: &ServerState, action: Action) -> Fallible<()> {
        action_handler(state, action, None)
    }

    fn act_with(state: &ServerState, action: Action, value: &str) -> Fallible<()> {
        action_handler(state, action, Some(value))
    }

    fn session_state(state: &ServerState) -> SessionState {
        state.mutable.lock().unwrap().session.state()
    }

    #[test]
    fn test_filter_toggles() -> Fallible<()> {
        let state = server_state()?;
        act_with(&state, Action::TogglePeriod, "2")?;
        act_with(&state, Action::TogglePeriod, "3")?;
        act_with(&state, Action::ToggleGroup, "18")?;
        {
            let m = state.mutable.lock().unwrap();
            assert!(m.draft.filters.period.is_selected(2));
            assert!(m.draft.filters.period.is_selected(3));
            assert!(m.draft.filters.group.is_selected(18));
        }
        act(&state, Action::AllPeriods)?;
        act_with(&state, Action::ToggleGroup, "18")?;
        let m = state.mutable.lock().unwrap();
        assert!(m.draft.filters.period.is_all());
        assert!(m.draft.filters.group.is_all());
        Ok(())
    }

    #[test]
    fn test_invalid_values_are_rejected() -> Fallible<()> {
        let state = server_state()?;
        assert!(act_with(&state, Action::TogglePeriod, "8").is_err());
        assert!(act_with(&state, Action::ToggleGroup, "0").is_err());
        assert!(act_with(&state, Action::SetBatchSize, "none").is_err());
        assert!(act_with(&state, Action::SetDirection, "up").is_err());
        assert!(act(&state, Action::TogglePeriod).is_err());
        Ok(())
    }

    #[test]
    fn test_start_saves_settings() -> Fallible<()> {
        let state = server_state()?;
        act_with(&state, Action::SetDirection, "name_to_symbol")?;
        act_with(&state, Action::SetBatchSize, "5")?;
        act(&state, Action::Start)?;
        assert_eq!(session_state(&state), SessionState::Running);
        let saved = state.prefs.settings()?.unwrap();
        assert_eq!(saved.direction, Direction::NameToSymbol);
        assert_eq!(saved.batch_size, BatchSize::parse("5")?);
        assert_eq!(state.mutable.lock().unwrap().session.progress(), (0, 5));
        Ok(())
    }

    #[test]
    fn test_start_with_no_matches_sets_notice() -> Fallible<()> {
        let state = server_state()?;
        act_with(&state, Action::TogglePeriod, "1")?;
        act_with(&state, Action::ToggleGroup, "2")?;
        act(&state, Action::Start)?;
        let m = state.mutable.lock().unwrap();
        assert_eq!(m.session.state(), SessionState::Idle);
        assert_eq!(m.notice.as_deref(), Some(NO_MATCHES));
        Ok(())
    }

    #[test]
    fn test_answer_requires_flip() -> Fallible<()> {
        let state = server_state()?;
        act(&state, Action::Start)?;
        assert!(act(&state, Action::Known).is_err());
        act(&state, Action::Flip)?;
        act(&state, Action::Known)?;
        let m = state.mutable.lock().unwrap();
        assert_eq!(m.session.progress(), (1, 11));
        assert!(!m.flipped);
        Ok(())
    }

    #[test]
    fn test_answer_while_idle_is_an_error() -> Fallible<()> {
        let state = server_state()?;
        assert!(act(&state, Action::Unknown).is_err());
        assert_eq!(session_state(&state), SessionState::Idle);
        Ok(())
    }

    #[test]
    fn test_full_session_then_restart_same_batch() -> Fallible<()> {
        let state = server_state()?;
        act_with(&state, Action::SetBatchSize, "5")?;
        act(&state, Action::Start)?;
        let batch: Vec<CardId> = {
            let m = state.mutable.lock().unwrap();
            let mut ids: Vec<CardId> = m.session.batch().iter().map(|c| c.id()).collect();
            ids.sort();
            ids
        };
        act(&state, Action::Flip)?;
        act(&state, Action::Unknown)?;
        while session_state(&state) == SessionState::Running {
            act(&state, Action::Flip)?;
            act(&state, Action::Known)?;
        }
        {
            let m = state.mutable.lock().unwrap();
            assert_eq!(m.session.state(), SessionState::Finished);
            assert!(m.finished_at.is_some());
            let stats = m.session.stats().unwrap();
            assert_eq!(stats.first_attempt_correct(), 4);
            assert_eq!(stats.first_attempt_incorrect(), 1);
        }
        act(&state, Action::Restart)?;
        let m = state.mutable.lock().unwrap();
        assert_eq!(m.session.state(), SessionState::Running);
        assert_eq!(m.session.progress(), (0, 5));
        assert!(m.finished_at.is_none());
        let mut ids: Vec<CardId> = m.session.batch().iter().map(|c| c.id()).collect();
        ids.sort();
        assert_eq!(ids, batch);
        Ok(())
    }

    #[test]
    fn test_exit_requires_confirmation() -> Fallible<()> {
        let state = server_state()?;
        act(&state, Action::Start)?;
        act(&state, Action::ConfirmExit)?;
        assert_eq!(session_state(&state), SessionState::Running);
        act(&state, Action::Exit)?;
        act(&state, Action::CancelExit)?;
        assert_eq!(session_state(&state), SessionState::Running);
        act(&state, Action::Exit)?;
        act(&state, Action::ConfirmExit)?;
        assert_eq!(session_state(&state), SessionState::Idle);
        Ok(())
    }

    #[test]
    fn test_mixed_direction_varies_orientation() -> Fallible<()> {
        let state = server_state()?;
        act_with(&state, Action::SetDirection, "mixed")?;
        act(&state, Action::Start)?;
        let mut orientations = Vec::new();
        for _ in 0..30 {
            orientations.push(state.mutable.lock().unwrap().orientation);
            act(&state, Action::Flip)?;
            act(&state, Action::Unknown)?;
        }
        let first = orientations[0];
        assert!(orientations.iter().any(|o| *o != first));
        Ok(())
    }

    #[test]
    fn test_toggle_theme_persists() -> Fallible<()> {
        let state = server_state()?;
        act(&state, Action::ToggleTheme)?;
        assert_eq!(state.mutable.lock().unwrap().theme, Theme::Light);
        assert_eq!(state.prefs.theme()?, Theme::Light);
        Ok(())
    }
}
