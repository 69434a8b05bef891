//! Skill discovery: search, tag filter, posting listings and requesting
//! exchanges.

use std::collections::HashSet;

use store::{Collection, DocumentStore, Write};

use crate::entity::{load, load_or_sample, Fallback, Listing};
use crate::models::{AuthUser, RequestStatus, SkillListing, DEFAULT_SKILL_COLOR};
use crate::toast::Notice;
use crate::validation::{require, split_list, ValidationError};

pub const ALL_TAGS: &str = "All";

/// `All` followed by every distinct tag in first-seen order.
pub fn all_tags(skills: &[SkillListing]) -> Vec<String> {
    let mut seen = HashSet::new();
    std::iter::once(ALL_TAGS.to_string())
        .chain(
            skills
                .iter()
                .flat_map(|s| s.tags.iter())
                .filter(|t| seen.insert(t.as_str()))
                .cloned(),
        )
        .collect()
}

/// Search box plus selected tag. Re-evaluated on every keystroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillFilter {
    pub search: String,
    pub tag: String,
}

impl Default for SkillFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            tag: ALL_TAGS.to_string(),
        }
    }
}

impl SkillFilter {
    /// Case-insensitive substring match on the title, and tag membership.
    pub fn matches(&self, skill: &SkillListing) -> bool {
        let tag_ok = self.tag == ALL_TAGS || self.tag.is_empty() || skill.tags.contains(&self.tag);
        tag_ok && skill.title.to_lowercase().contains(&self.search.to_lowercase())
    }

    pub fn apply(&self, skills: &[SkillListing]) -> Vec<SkillListing> {
        skills.iter().filter(|s| self.matches(s)).cloned().collect()
    }
}

/// Post-a-skill form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewSkill {
    pub title: String,
    pub description: String,
    /// Comma-separated.
    pub tags: String,
}

impl NewSkill {
    pub fn to_write(&self, author: &AuthUser) -> Result<Write, ValidationError> {
        let title = require("Skill title", &self.title)?;
        Ok(Write::default()
            .field("title", title)
            .field("description", self.description.trim())
            .field("tags", split_list(&self.tags))
            .field("author", author.author_name())
            .field("userId", author.uid.as_str())
            .field("exchanges", 0)
            .field("color", DEFAULT_SKILL_COLOR)
            .with_server_timestamp("createdAt"))
    }
}

/// State of the discover page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillBoard {
    pub listing: Listing<SkillListing>,
}

impl SkillBoard {
    pub async fn load(store: &impl DocumentStore, fallback: Fallback) -> Self {
        Self {
            listing: load_or_sample(store, fallback).await,
        }
    }

    pub fn skills(&self) -> &[SkillListing] {
        &self.listing.items
    }

    /// Post a new listing and re-fetch the collection. Signed-out viewers get
    /// an error toast and nothing is written.
    pub async fn post(
        &mut self,
        store: &impl DocumentStore,
        form: &NewSkill,
        user: Option<&AuthUser>,
    ) -> Result<Notice, ValidationError> {
        let notice = post_skill(store, form, user).await?;
        if notice.is_success() {
            if let Some(listing) = refetch(store).await {
                self.listing = listing;
            }
        }
        Ok(notice)
    }

    /// Ask the owner of `skill` for an exchange.
    pub async fn request_exchange(
        &self,
        store: &impl DocumentStore,
        skill: &SkillListing,
        user: Option<&AuthUser>,
    ) -> Notice {
        let Some(user) = user else {
            return Notice::error("Please sign in to request a skill.");
        };
        let write = exchange_request(skill, user);
        match store.add(Collection::Requests, write).await {
            Ok(id) => {
                tracing::info!("requested exchange {id} for skill {}", skill.id);
                Notice::success("Request sent! 🎉")
            }
            Err(e) => {
                tracing::error!("sending request failed: {e}");
                Notice::error("Error sending request.")
            }
        }
    }
}

/// Validate `form` and write it as a new listing by `user`.
pub async fn post_skill(
    store: &impl DocumentStore,
    form: &NewSkill,
    user: Option<&AuthUser>,
) -> Result<Notice, ValidationError> {
    let Some(user) = user else {
        return Ok(Notice::error("Please sign in to post a skill."));
    };
    let write = form.to_write(user)?;
    match store.add(Collection::Skills, write).await {
        Ok(id) => {
            tracing::info!("posted skill {id}");
            Ok(Notice::success("Skill posted! 🎉"))
        }
        Err(e) => {
            tracing::error!("posting skill failed: {e}");
            Ok(Notice::error("Error posting skill."))
        }
    }
}

/// The live listing after a post. `None` keeps whatever the page shows.
pub async fn refetch(store: &impl DocumentStore) -> Option<Listing<SkillListing>> {
    match load::<SkillListing>(store).await {
        Ok(skills) => Some(Listing::live(skills)),
        Err(e) => {
            tracing::warn!("re-fetching skills failed: {e}");
            None
        }
    }
}

/// The request document for `user` asking about `skill`.
pub fn exchange_request(skill: &SkillListing, user: &AuthUser) -> Write {
    Write::default()
        .field("from", user.author_name())
        .field("requesterId", user.uid.as_str())
        .field("skill", skill.title.as_str())
        .field("skillId", skill.id.as_str())
        .field("message", format!("I'd like to learn {}.", skill.title))
        .field("status", RequestStatus::Pending.as_str())
        .with_server_timestamp("createdAt")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::DataSource;
    use crate::models::ExchangeRequest;
    use crate::samples;
    use store::MemoryStore;

    fn user() -> AuthUser {
        AuthUser {
            uid: "u1".into(),
            email: Some("ann@college.edu".into()),
            display_name: Some("Ann Lee".into()),
            photo_url: None,
        }
    }

    fn search(text: &str) -> SkillFilter {
        SkillFilter {
            search: text.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_search_react_is_case_insensitive() {
        let mut skills = samples::skills();
        skills.push(SkillListing {
            id: "s7".into(),
            title: "REACT Native".into(),
            ..Default::default()
        });
        skills.push(SkillListing {
            id: "s8".into(),
            title: "Reactive Streams".into(),
            ..Default::default()
        });

        let ids: Vec<String> = search("react").apply(&skills).into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["s2", "s7", "s8"]);
        assert_eq!(search("ReAcT").apply(&skills), search("react").apply(&skills));
    }

    #[test]
    fn test_filter_idempotent() {
        let skills = samples::skills();
        let filter = SkillFilter {
            search: "dev".into(),
            tag: "Tech".into(),
        };
        let first = filter.apply(&skills);
        assert_eq!(first, filter.apply(&skills));
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].id, "s2");
    }

    #[test]
    fn test_all_tags() {
        let mut skills = samples::skills();
        skills[1].tags.push("Design".into());
        let tags = all_tags(&skills);
        assert_eq!(tags[0], "All");
        assert_eq!(tags[1..4], ["Design", "Figma", "Tech"]);
        assert_eq!(tags.len(), 13);
    }

    #[tokio::test]
    async fn test_post_requires_sign_in() {
        let store = MemoryStore::new();
        let mut board = SkillBoard::load(&store, Fallback::Samples).await;
        let form = NewSkill {
            title: "Rust".into(),
            ..Default::default()
        };
        let notice = board.post(&store, &form, None).await.unwrap();
        assert_eq!(notice, Notice::error("Please sign in to post a skill."));
        assert!(store.list(Collection::Skills).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_post_empty_title_rejected_before_write() {
        let store = MemoryStore::new();
        let mut board = SkillBoard::default();
        let form = NewSkill {
            title: " ".into(),
            tags: "Tech".into(),
            ..Default::default()
        };
        let err = board.post(&store, &form, Some(&user())).await.unwrap_err();
        assert_eq!(err, ValidationError::Required("Skill title"));
        assert!(store.list(Collection::Skills).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_post_refetches_live_list() {
        let store = MemoryStore::new();
        let mut board = SkillBoard::load(&store, Fallback::Samples).await;
        assert_eq!(board.listing.source, DataSource::Sample);

        let form = NewSkill {
            title: "Rust".into(),
            description: "Ownership and borrowing".into(),
            tags: "Tech, Systems, ".into(),
        };
        let notice = board.post(&store, &form, Some(&user())).await.unwrap();
        assert_eq!(notice, Notice::success("Skill posted! 🎉"));
        assert_eq!(board.listing.source, DataSource::Live);
        assert_eq!(board.skills().len(), 1);

        let skill = &board.skills()[0];
        assert_eq!(skill.tags, vec!["Tech", "Systems"]);
        assert_eq!(skill.author, "Ann Lee");
        assert_eq!(skill.user_id.as_deref(), Some("u1"));
        assert_eq!(skill.color(), DEFAULT_SKILL_COLOR);
    }

    #[tokio::test]
    async fn test_post_failure() {
        let store = MemoryStore::new();
        let mut board = SkillBoard::load(&store, Fallback::Samples).await;
        store.set_offline(true);
        let form = NewSkill {
            title: "Rust".into(),
            ..Default::default()
        };
        let notice = board.post(&store, &form, Some(&user())).await.unwrap();
        assert_eq!(notice, Notice::error("Error posting skill."));
        assert_eq!(board.skills(), samples::skills().as_slice());
    }

    #[tokio::test]
    async fn test_refetch_keeps_page_when_read_fails() {
        let store = MemoryStore::new();
        store
            .add(Collection::Skills, Write::default().field("title", "Chess"))
            .await
            .unwrap();
        let listing = refetch(&store).await.unwrap();
        assert_eq!(listing.source, DataSource::Live);
        assert_eq!(listing.items[0].title, "Chess");

        store.set_offline(true);
        assert!(refetch(&store).await.is_none());
    }

    #[tokio::test]
    async fn test_request_exchange_references_skill_id() {
        let store = MemoryStore::new();
        let board = SkillBoard::load(&store, Fallback::Samples).await;
        let skill = board.skills()[1].clone();

        let notice = board.request_exchange(&store, &skill, Some(&user())).await;
        assert_eq!(notice, Notice::success("Request sent! 🎉"));

        let docs = store.list(Collection::Requests).await.unwrap();
        let request: ExchangeRequest = docs[0].decode().unwrap();
        assert_eq!(request.skill_id.as_deref(), Some("s2"));
        assert_eq!(request.skill, "React Development");
        assert_eq!(request.from, "Ann Lee");
        assert_eq!(request.status, RequestStatus::Pending);
    }

    #[tokio::test]
    async fn test_request_exchange_signed_out() {
        let store = MemoryStore::new();
        let board = SkillBoard::default();
        let notice = board.request_exchange(&store, &samples::skills()[0], None).await;
        assert_eq!(notice, Notice::error("Please sign in to request a skill."));
        assert!(store.list(Collection::Requests).await.unwrap().is_empty());
    }
}
