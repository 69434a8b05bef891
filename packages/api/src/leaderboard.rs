use store::DocumentStore;

use crate::entity::{load_or_sample, Fallback, Listing};
use crate::models::LeaderboardEntry;

pub const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];

/// Load entries (with sample fallback) ordered by points, highest first.
pub async fn load_leaderboard(
    store: &impl DocumentStore,
    fallback: Fallback,
) -> Listing<LeaderboardEntry> {
    let mut listing = load_or_sample::<LeaderboardEntry>(store, fallback).await;
    rank(&mut listing.items);
    listing
}

/// Sort by points descending. Ties keep their store order.
pub fn rank(entries: &mut [LeaderboardEntry]) {
    entries.sort_by(|a, b| b.points.cmp(&a.points));
}

/// Medal for the top three, otherwise the 1-based rank.
pub fn rank_label(index: usize) -> String {
    MEDALS
        .get(index)
        .map(|m| m.to_string())
        .unwrap_or_else(|| (index + 1).to_string())
}

/// Colour of the points column for a rank.
pub fn points_tone(index: usize) -> &'static str {
    match index {
        0 => "purple",
        1 => "green",
        2 => "orange",
        _ => "red",
    }
}

/// The top three in podium order: second, first, third. Pairs each entry
/// with its rank index.
pub fn podium(entries: &[LeaderboardEntry]) -> Vec<(usize, &LeaderboardEntry)> {
    [1, 0, 2]
        .into_iter()
        .filter_map(|i| entries.get(i).map(|e| (i, e)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples;
    use store::{Collection, MemoryStore, Write};

    #[tokio::test]
    async fn test_live_entries_sorted_by_points() {
        let store = MemoryStore::new();
        for (name, points) in [("Low", 10), ("High", 900), ("Mid", 400)] {
            store
                .add(
                    Collection::Leaderboard,
                    Write::default().field("name", name).field("points", points),
                )
                .await
                .unwrap();
        }
        let listing = load_leaderboard(&store, Fallback::Samples).await;
        let names: Vec<&str> = listing.items.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["High", "Mid", "Low"]);
    }

    #[tokio::test]
    async fn test_samples_when_unreachable() {
        let store = MemoryStore::new();
        store.set_offline(true);
        let listing = load_leaderboard(&store, Fallback::Samples).await;
        assert!(listing.is_sample());
        assert_eq!(listing.items[0].name, "Arjun Kumar");
    }

    #[test]
    fn test_medals_and_podium() {
        assert_eq!(rank_label(0), "🥇");
        assert_eq!(rank_label(2), "🥉");
        assert_eq!(rank_label(3), "4");

        let entries = samples::leaderboard();
        let order: Vec<(usize, &str)> = podium(&entries)
            .into_iter()
            .map(|(i, e)| (i, e.id.as_str()))
            .collect();
        assert_eq!(order, vec![(1, "l2"), (0, "l1"), (2, "l3")]);

        assert_eq!(podium(&entries[..1]).len(), 1);
        assert_eq!(points_tone(5), "red");
    }
}
