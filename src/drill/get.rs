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

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use maud::Markup;
use maud::html;

use crate::drill::state::MutableState;
use crate::drill::state::ServerState;
use crate::drill::template::page_template;
use crate::session::SessionState;
use crate::summary::summarize;
use crate::types::card::Card;
use crate::types::direction::Direction;
use crate::types::selection::Selection;
use crate::types::settings::BatchSize;
use crate::types::settings::GROUP_COUNT;
use crate::types::settings::PERIOD_COUNT;
use crate::types::timestamp::Timestamp;

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mutable = state.mutable.lock().unwrap();
    let body = match mutable.session.state() {
        SessionState::Idle => setup_screen(&mutable),
        SessionState::Running => {
            if mutable.confirm_exit {
                confirm_exit_screen()
            } else {
                game_screen(&mutable)
            }
        }
        SessionState::Finished => score_screen(&mutable),
    };
    let html = page_template(mutable.theme, body);
    (StatusCode::OK, Html(html.into_string()))
}

fn setup_screen(m: &MutableState) -> Markup {
    let draft = &m.draft;
    html! {
        div.root.setup {
            h1 { "Periodic table flashcards" }
            @if let Some(notice) = &m.notice {
                p.notice { (notice) }
            }
            section {
                h2 { "Direction" }
                form.choices action="/" method="post" {
                    input type="hidden" name="action" value="SetDirection";
                    @for direction in Direction::ALL {
                        (choice_button(direction.as_str(), direction.label(), direction == draft.direction))
                    }
                }
            }
            section {
                h2 { "Period" }
                (filter_buttons("AllPeriods", "TogglePeriod", PERIOD_COUNT, &draft.filters.period))
            }
            section {
                h2 { "Group" }
                (filter_buttons("AllGroups", "ToggleGroup", GROUP_COUNT, &draft.filters.group))
            }
            section {
                h2 { "Cards per session" }
                form.choices action="/" method="post" {
                    input type="hidden" name="action" value="SetBatchSize";
                    @for size in BatchSize::CHOICES {
                        (choice_button(&size.to_string(), &batch_label(size), size == draft.batch_size))
                    }
                }
            }
            form action="/" method="post" {
                button #start type="submit" name="action" value="Start" { "Start" }
            }
        }
    }
}

fn batch_label(size: BatchSize) -> String {
    match size {
        BatchSize::All => "All".to_string(),
        BatchSize::Limited(n) => n.to_string(),
    }
}

fn choice_button(value: &str, label: &str, selected: bool) -> Markup {
    html! {
        button.choice.selected[selected] type="submit" name="value" value=(value) {
            (label)
        }
    }
}

/// The "All" button plus one toggle per value.
fn filter_buttons(all_action: &str, toggle_action: &str, count: u8, selection: &Selection) -> Markup {
    html! {
        div.filters {
            form action="/" method="post" {
                button.choice.selected[selection.is_all()] type="submit" name="action" value=(all_action) {
                    "All"
                }
            }
            form.choices action="/" method="post" {
                input type="hidden" name="action" value=(toggle_action);
                @for value in 1..=count {
                    (choice_button(&value.to_string(), &value.to_string(), selection.is_selected(value)))
                }
            }
        }
    }
}

fn game_screen(m: &MutableState) -> Markup {
    let Some(card) = m.session.current() else {
        return html! {};
    };
    let (completed, total) = m.session.progress();
    let percent = if total == 0 { 0 } else { completed * 100 / total };
    html! {
        div.root.game {
            div.header {
                div.progress {
                    (format!("{completed}/{total}"))
                }
                div.progress-bar {
                    div.progress-fill style=(format!("width: {percent}%")) {}
                }
                div.remaining {
                    (format!("{} left", m.session.remaining()))
                }
                form action="/" method="post" {
                    button #exit type="submit" name="action" value="Exit" { "Exit" }
                }
            }
            form action="/" method="post" {
                button #flashcard .card.flipped[m.flipped] type="submit" name="action" value="Flip" {
                    div.front {
                        (card.front(m.orientation))
                    }
                    @if m.flipped {
                        div.back {
                            div.answer { (card.back(m.orientation)) }
                            (card_metadata(card))
                        }
                    } @else {
                        div.hint { "Press space or click to flip" }
                    }
                }
            }
            @if m.flipped {
                form.controls action="/" method="post" {
                    button #unknown type="submit" name="action" value="Unknown" { "Don't know" }
                    button #known type="submit" name="action" value="Known" { "Know" }
                }
            }
        }
    }
}

fn card_metadata(card: &Card) -> Markup {
    html! {
        dl.meta {
            dt { "Atomic number" }
            dd { (card.atomic_number()) }
            dt { "Group" }
            dd {
                @match card.group() {
                    Some(group) => (group),
                    None => "-",
                }
            }
            @if let Some(name) = card.name_en() {
                dt { "English" }
                dd { (name) }
            }
            @if let Some(name) = card.name_lat() {
                dt { "Latin" }
                dd { (name) }
            }
        }
    }
}

fn confirm_exit_screen() -> Markup {
    html! {
        div.root.confirm {
            p { "End the session? Progress will be lost." }
            form.controls action="/" method="post" {
                button #cancel type="submit" name="action" value="CancelExit" { "Keep going" }
                button #confirm type="submit" name="action" value="ConfirmExit" { "End session" }
            }
        }
    }
}

fn score_screen(m: &MutableState) -> Markup {
    let Some(stats) = m.session.stats() else {
        return html! {};
    };
    let finished_at = m.finished_at.unwrap_or_else(Timestamp::now);
    let summary = summarize(stats, finished_at);
    html! {
        div.root.finished {
            h1 { "Session Completed" }
            dl.score {
                dt { "Cards" }
                dd #total { (summary.total) }
                dt { "Known first time" }
                dd #correct { (summary.correct) }
                dt { "Accuracy" }
                dd #accuracy { (format!("{}%", summary.accuracy_percent)) }
                dt { "Time" }
                dd #elapsed { (summary.elapsed) }
            }
            form.controls action="/" method="post" {
                button #restart type="submit" name="action" value="Restart" { "Restart" }
                button #new-game type="submit" name="action" value="NewGame" { "New game" }
            }
        }
    }
}
