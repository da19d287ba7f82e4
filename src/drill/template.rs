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

use maud::DOCTYPE;
use maud::Markup;
use maud::html;

use crate::types::theme::Theme;

pub fn page_template(theme: Theme, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" data-theme=(theme.as_str()) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "chemflash" }
                link rel="stylesheet" href="/style.css";
            }
            body {
                form.theme-toggle action="/" method="post" {
                    button #theme type="submit" name="action" value="ToggleTheme" {
                        @match theme {
                            Theme::Dark => "Light mode",
                            Theme::Light => "Dark mode",
                        }
                    }
                }
                (body)
                script src="/script.js" {};
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_attribute() {
        let page = page_template(Theme::Light, html! { p { "hi" } }).into_string();
        assert!(page.contains("data-theme=\"light\""));
        assert!(page.contains("<p>hi</p>"));
        assert!(page.contains("Dark mode"));
    }
}
