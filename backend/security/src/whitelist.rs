//! Developer whitelist: user ids trusted with `force` and the debug commands.
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeveloperWhitelist {
    ids: HashSet<String>,
}

impl DeveloperWhitelist {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::default();
        for id in ids {
            list.allow(id.as_ref());
        }
        list
    }

    /// Returns `true` if `user_id` is whitelisted. Blank ids never are.
    pub fn contains(&self, user_id: &str) -> bool {
        let user_id = user_id.trim();
        !user_id.is_empty() && self.ids.contains(user_id)
    }

    /// Add an identifier. Blank input is ignored.
    pub fn allow(&mut self, user_id: &str) {
        let user_id = user_id.trim();
        if !user_id.is_empty() {
            self.ids.insert(user_id.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }
}
