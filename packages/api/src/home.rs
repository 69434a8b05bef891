//! Static content of the landing page.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomeStat {
    pub value: u64,
    pub label: &'static str,
    pub tone: &'static str,
}

pub const STATS: [HomeStat; 4] = [
    HomeStat { value: 1240, label: "Students", tone: "purple" },
    HomeStat { value: 38, label: "Active Clubs", tone: "green" },
    HomeStat { value: 860, label: "Skills Listed", tone: "orange" },
    HomeStat { value: 412, label: "Exchanges Done", tone: "red" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub color: &'static str,
}

pub const FEATURES: [Feature; 4] = [
    Feature {
        icon: "🎯",
        title: "Skill Exchange",
        description: "Post what you can teach, find what you want to learn.",
        color: "#ede9fe",
    },
    Feature {
        icon: "🏛️",
        title: "Club Discovery",
        description: "Browse 38+ active clubs and find your community.",
        color: "#dcfce7",
    },
    Feature {
        icon: "🏆",
        title: "Leaderboard",
        description: "Earn points for every skill exchanged and climb the ranks.",
        color: "#fef3c7",
    },
    Feature {
        icon: "🤝",
        title: "Smart Matching",
        description: "Our algorithm connects you with the perfect skill buddy.",
        color: "#fee2e2",
    },
];

pub const BADGE_MESSAGES: [&str; 3] = [
    "Now live at your college",
    "38 Active Clubs",
    "860 Skills & counting",
];

/// Cycles through [`BADGE_MESSAGES`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BadgeRotation {
    index: usize,
}

impl BadgeRotation {
    pub fn current(&self) -> &'static str {
        BADGE_MESSAGES[self.index]
    }

    pub fn advance(&mut self) -> &'static str {
        self.index = (self.index + 1) % BADGE_MESSAGES.len();
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_wraps_around() {
        let mut badge = BadgeRotation::default();
        assert_eq!(badge.current(), "Now live at your college");
        assert_eq!(badge.advance(), "38 Active Clubs");
        assert_eq!(badge.advance(), "860 Skills & counting");
        assert_eq!(badge.advance(), "Now live at your college");
    }
}
