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

use std::env::current_dir;
use std::path::PathBuf;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::prefs::Preferences;
use crate::prefs::SqlitePreferenceStore;

/// A directory holding a catalog, its configuration and saved preferences.
pub struct Collection {
    pub directory: PathBuf,
    pub config: Config,
    pub catalog: Catalog,
    pub prefs: Preferences,
}

impl Collection {
    pub async fn open(directory: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        let directory = if directory.exists() {
            directory.canonicalize()?
        } else {
            return fail("directory does not exist.");
        };

        let config = Config::load(&directory)?;

        let catalog = Catalog::load(&directory.join(&config.catalog)).await?;
        if catalog.is_empty() {
            log::warn!("The catalog {} has no cards.", config.catalog);
        }

        let db_path: PathBuf = directory.join(&config.database);
        let db_path: &str = db_path
            .to_str()
            .ok_or_else(|| ErrorReport::new("invalid path"))?;
        let prefs = Preferences::new(SqlitePreferenceStore::new(db_path)?);

        Ok(Self {
            directory,
            config,
            catalog,
            prefs,
        })
    }
}
