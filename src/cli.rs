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

use clap::Parser;

use crate::check::check_collection;
use crate::collection::Collection;
use crate::drill::server::ServerConfig;
use crate::drill::server::start_server;
use crate::error::Fallible;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Drill element cards in the browser.
    Drill {
        /// Path to the collection directory. Defaults to the current directory.
        directory: Option<String>,
        /// The port to serve on. Overrides the configuration file.
        #[arg(long)]
        port: Option<u16>,
        /// Don't open the browser.
        #[arg(long)]
        no_open: bool,
    },
    /// Check that the collection loads.
    Check {
        /// Path to the collection directory. Defaults to the current directory.
        directory: Option<String>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Drill {
            directory,
            port,
            no_open,
        } => {
            let coll = Collection::open(directory).await?;
            let config = ServerConfig {
                port: port.unwrap_or(coll.config.port),
                open_browser: coll.config.open_browser && !no_open,
            };
            start_server(coll, config).await
        }
        Command::Check { directory } => check_collection(directory).await,
    }
}
