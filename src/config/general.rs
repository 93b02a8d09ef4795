//! The general configuration settings for the bridge.
//!
//! Holds the `[general]` table of webview-bridge.toml: the external programs the stdio host
//! launches and the default log filter.

use crate::utils::logging::DEFAULT_LOG_FILTER;

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct General {
    editor: Option<String>,
    browser: Option<String>,
    log_filter: String,
}

impl Default for General {
    fn default() -> Self {
        General {
            editor: None,
            browser: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl General {
    /// Command used to open files, e.g. `"code --wait"`. Blank values count as unset.
    #[inline]
    pub fn editor(&self) -> Option<&str> {
        non_blank(self.editor.as_deref())
    }

    /// Program used to open URLs. Falls back to the platform launcher when unset.
    #[inline]
    pub fn browser(&self) -> Option<&str> {
        non_blank(self.browser.as_deref())
    }

    #[inline]
    pub fn log_filter(&self) -> &str {
        if self.log_filter.trim().is_empty() {
            DEFAULT_LOG_FILTER
        } else {
            &self.log_filter
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
