//! Club browsing: category filter and the local join toggle.

use std::collections::HashSet;

use crate::models::Club;

/// Filter value that matches every club.
pub const ALL: &str = "All";

/// `All` followed by each distinct non-empty category, in first-seen order.
pub fn categories(clubs: &[Club]) -> Vec<String> {
    let mut seen = HashSet::new();
    std::iter::once(ALL.to_string())
        .chain(
            clubs
                .iter()
                .map(|c| c.category.as_str())
                .filter(|c| !c.is_empty() && seen.insert(*c))
                .map(str::to_string),
        )
        .collect()
}

pub fn filter_by_category(clubs: &[Club], category: &str) -> Vec<Club> {
    clubs
        .iter()
        .filter(|c| category == ALL || c.category == category)
        .cloned()
        .collect()
}

/// Clubs the viewer has joined during this visit. Not persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Memberships {
    joined: HashSet<String>,
}

impl Memberships {
    /// Flip membership of `club_id`; returns the new state.
    pub fn toggle(&mut self, club_id: &str) -> bool {
        if self.joined.remove(club_id) {
            false
        } else {
            self.joined.insert(club_id.to_string());
            true
        }
    }

    pub fn is_joined(&self, club_id: &str) -> bool {
        self.joined.contains(club_id)
    }

    pub fn button_label(&self, club_id: &str) -> &'static str {
        if self.is_joined(club_id) {
            "Joined ✓"
        } else {
            "Join"
        }
    }
}
