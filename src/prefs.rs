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

#[cfg(test)]
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use rusqlite::Connection;
use rusqlite::Transaction;

use crate::error::Fallible;
use crate::types::settings::SessionSettings;
use crate::types::theme::Theme;

const SETTINGS_KEY: &str = "chemflash_settings";
const THEME_KEY: &str = "chemflash_theme";

/// A string key-value store. A missing key is `Ok(None)`.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Fallible<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Fallible<()>;
}

/// Typed access to the saved settings and theme.
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn PreferenceStore>,
}

impl Preferences {
    pub fn new(store: impl PreferenceStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// The settings of the last session started, if any. Unreadable saved
    /// settings are treated as absent.
    pub fn settings(&self) -> Fallible<Option<SessionSettings>> {
        let Some(json) = self.store.get(SETTINGS_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&json) {
            Ok(settings) => Ok(Some(settings)),
            Err(e) => {
                log::warn!("Ignoring unreadable saved settings: {e}");
                Ok(None)
            }
        }
    }

    pub fn save_settings(&self, settings: &SessionSettings) -> Fallible<()> {
        let json = serde_json::to_string(settings)?;
        log::debug!("Saving settings: {json}");
        self.store.set(SETTINGS_KEY, &json)
    }

    pub fn theme(&self) -> Fallible<Theme> {
        let theme = match self.store.get(THEME_KEY)? {
            Some(value) => Theme::try_from(value.as_str()).unwrap_or_else(|e| {
                log::warn!("Ignoring saved theme: {e}");
                Theme::default()
            }),
            None => Theme::default(),
        };
        Ok(theme)
    }

    pub fn save_theme(&self, theme: Theme) -> Fallible<()> {
        log::debug!("Saving theme: {}", theme.as_str());
        self.store.set(THEME_KEY, theme.as_str())
    }
}

pub struct SqlitePreferenceStore {
    conn: Mutex<Connection>,
}

impl SqlitePreferenceStore {
    pub fn new(database_path: &str) -> Fallible<Self> {
        let mut conn = Connection::open(database_path)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn acquire(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap()
    }
}

impl PreferenceStore for SqlitePreferenceStore {
    fn get(&self, key: &str) -> Fallible<Option<String>> {
        let conn = self.acquire();
        let mut stmt = conn.prepare("select value from preferences where key = ?;")?;
        let mut rows = stmt.query([key])?;
        if let Some(row) = rows.next()? {
            let value: String = row.get(0)?;
            Ok(Some(value))
        } else {
            Ok(None)
        }
    }

    fn set(&self, key: &str, value: &str) -> Fallible<()> {
        let conn = self.acquire();
        let sql = "insert into preferences (key, value) values (?, ?) on conflict (key) do update set value = excluded.value;";
        conn.execute(sql, (key, value))?;
        Ok(())
    }
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["preferences"], |row| row.get(0))?;
    Ok(count > 0)
}

#[cfg(test)]
#[derive(Default)]
pub struct MemoryPreferenceStore {
    entries: Mutex<HashMap<String, String>>,
}

#[cfg(test)]
impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Fallible<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Fallible<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
