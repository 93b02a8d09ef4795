//! The search configuration settings for the bridge.
//!
//! This module defines the [Search] struct for deserializing the `[search]` table of
//! webview-bridge.toml and the [InternalSearch] struct holding the clamped values used at
//! runtime.

use crate::core::IgnoreList;
use crate::core::find::SearchLimits;
use crate::utils::helpers::{
    clamp_results, clamp_search_depth, default_list_max_results, default_max_depth,
    default_max_results,
};

use serde::Deserialize;

#[derive(Deserialize, Debug)]
#[serde(default)]
pub(crate) struct Search {
    #[serde(default = "default_max_depth")]
    max_depth: usize,
    #[serde(default = "default_max_results")]
    max_results: usize,
    #[serde(default = "default_list_max_results")]
    list_max_results: usize,
    extra_ignored: Vec<String>,
}

impl Default for Search {
    fn default() -> Self {
        Search {
            max_depth: default_max_depth(),
            max_results: default_max_results(),
            list_max_results: default_list_max_results(),
            extra_ignored: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InternalSearch {
    limits: SearchLimits,
    ignore: IgnoreList,
}

impl From<Search> for InternalSearch {
    fn from(s: Search) -> Self {
        let extra = s
            .extra_ignored
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
        Self {
            limits: SearchLimits {
                max_depth: clamp_search_depth(s.max_depth),
                max_results: clamp_results("max_results", s.max_results),
                list_max_results: clamp_results("list_max_results", s.list_max_results),
            },
            ignore: IgnoreList::with_extra(extra),
        }
    }
}

impl InternalSearch {
    #[inline]
    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    /// The default ignore-list plus `extra_ignored`.
    #[inline]
    pub fn ignore_list(&self) -> IgnoreList {
        self.ignore.clone()
    }
}
