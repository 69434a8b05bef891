//! # Exchange requests
//!
//! Accepting or declining a request patches the row locally whatever the
//! store answers, so the page always reflects the viewer's decision. A row
//! whose write failed is marked unsynced; [`RequestBoard::reconcile`]
//! re-issues those writes later. Rows that do not exist in the store (the
//! sample dataset) are dropped from reconciliation on the first `NotFound`.
//!
//! Requests made from the discover page carry the skill's id; older documents
//! only carry its title. [`resolve_skill`] joins on the id first and falls
//! back to the title.

use chrono::{DateTime, Utc};
use store::{Collection, DocumentStore, StoreError, Write};

use crate::entity::{load_or_sample, DataSource, Fallback, Listing};
use crate::models::{ExchangeRequest, RequestStatus, SkillListing};
use crate::toast::Notice;

#[derive(Debug, Clone, PartialEq)]
pub struct RequestRow {
    pub request: ExchangeRequest,
    /// False while the last status change has not reached the store.
    pub synced: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestBoard {
    pub rows: Vec<RequestRow>,
    pub source: DataSource,
}

/// Toast for a status change.
pub fn status_notice(status: RequestStatus) -> Notice {
    match status {
        RequestStatus::Accepted => Notice::success("✅ Request accepted!"),
        _ => Notice::error("❌ Request declined."),
    }
}

pub fn status_write(status: RequestStatus) -> Write {
    Write::default().field("status", status.as_str())
}

impl From<Listing<ExchangeRequest>> for RequestBoard {
    fn from(listing: Listing<ExchangeRequest>) -> Self {
        Self {
            rows: listing
                .items
                .into_iter()
                .map(|request| RequestRow { request, synced: true })
                .collect(),
            source: listing.source,
        }
    }
}

impl RequestBoard {
    pub async fn load(store: &impl DocumentStore, fallback: Fallback) -> Self {
        load_or_sample::<ExchangeRequest>(store, fallback).await.into()
    }

    pub fn get(&self, id: &str) -> Option<&ExchangeRequest> {
        self.rows.iter().find(|r| r.request.id == id).map(|r| &r.request)
    }

    /// Patch the row locally. Returns false when no row has this id.
    ///
    /// The page calls this before the write starts, then hands the write's
    /// outcome to [`RequestBoard::record_write`].
    pub fn apply(&mut self, id: &str, status: RequestStatus) -> bool {
        match self.rows.iter_mut().find(|r| r.request.id == id) {
            Some(row) => {
                row.request.status = status;
                true
            }
            None => false,
        }
    }

    /// Patch the row, write the new status and record the outcome.
    pub async fn change_status(
        &mut self,
        store: &impl DocumentStore,
        id: &str,
        status: RequestStatus,
    ) -> Notice {
        self.apply(id, status);
        let result = write_status(store, id, status).await;
        self.record_write(id, status, result)
    }

    /// Record how the write for an applied status change ended. The row keeps
    /// its status either way; a failed write leaves it unsynced.
    pub fn record_write(
        &mut self,
        id: &str,
        status: RequestStatus,
        result: Result<(), StoreError>,
    ) -> Notice {
        let synced = match result {
            Ok(()) => {
                tracing::info!("request {id} is now {status}");
                true
            }
            Err(e) => {
                tracing::error!("saving status of request {id} failed, kept locally: {e}");
                false
            }
        };
        if let Some(row) = self.rows.iter_mut().find(|r| r.request.id == id) {
            row.synced = synced;
        }
        status_notice(status)
    }

    /// Status changes still waiting to reach the store.
    pub fn unsynced(&self) -> Vec<(String, RequestStatus)> {
        self.rows
            .iter()
            .filter(|r| !r.synced)
            .map(|r| (r.request.id.clone(), r.request.status))
            .collect()
    }

    /// Mark the outcome of a retried write. Returns whether the row is now
    /// settled.
    pub fn settle(&mut self, id: &str, result: Result<(), StoreError>) -> bool {
        let settled = match result {
            Ok(()) => true,
            Err(e) if e.is_not_found() => {
                tracing::debug!("request {id} is not in the store; not retrying");
                true
            }
            Err(e) => {
                tracing::warn!("request {id} still unsynced: {e}");
                false
            }
        };
        if settled {
            if let Some(row) = self.rows.iter_mut().find(|r| r.request.id == id) {
                row.synced = true;
            }
        }
        settled
    }

    /// Retry every unsynced status write once. Returns how many remain
    /// unsynced.
    pub async fn reconcile(&mut self, store: &impl DocumentStore) -> usize {
        for (id, status) in self.unsynced() {
            let result = write_status(store, &id, status).await;
            self.settle(&id, result);
        }
        self.rows.iter().filter(|r| !r.synced).count()
    }
}

/// Store the status of request `id`.
pub async fn write_status(
    store: &impl DocumentStore,
    id: &str,
    status: RequestStatus,
) -> Result<(), StoreError> {
    store.update(Collection::Requests, id, status_write(status)).await
}

/// The listing a request refers to: by id when the request has one, else by
/// title (case-insensitive).
pub fn resolve_skill<'a>(
    request: &ExchangeRequest,
    skills: &'a [SkillListing],
) -> Option<&'a SkillListing> {
    if let Some(id) = request.skill_id.as_deref() {
        if let Some(skill) = skills.iter().find(|s| s.id == id) {
            return Some(skill);
        }
    }
    skills
        .iter()
        .find(|s| s.title.eq_ignore_ascii_case(request.skill.trim()))
}

/// Human-friendly creation time. Stored timestamps are shown relative to
/// `now`; anything else (legacy display strings) is shown as is.
pub fn display_time(created_at: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(raw) = created_at else {
        return String::new();
    };
    let Ok(at) = DateTime::parse_from_rfc3339(raw) else {
        return raw.to_string();
    };
    let elapsed = now.signed_duration_since(at.with_timezone(&Utc));
    let plural = |n: i64, unit: &str| {
        if n == 1 {
            format!("1 {unit} ago")
        } else {
            format!("{n} {unit}s ago")
        }
    };
    match elapsed.num_minutes() {
        m if m < 1 => "just now".to_string(),
        m if m < 60 => format!("{m} min ago"),
        m if m < 60 * 24 => plural(m / 60, "hr"),
        m if m < 60 * 24 * 30 => plural(m / (60 * 24), "day"),
        _ => at.format("%b %-d, %Y").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples;
    use crate::toast::NoticeKind;
    use chrono::TimeZone;
    use std::cell::RefCell;
    use store::MemoryStore;

    #[tokio::test]
    async fn test_accept_survives_failed_write() {
        let store = MemoryStore::new();
        let mut board = RequestBoard::load(&store, Fallback::Samples).await;
        assert_eq!(board.get("r1").unwrap().status, RequestStatus::Pending);

        store.set_offline(true);
        let notice = board.change_status(&store, "r1", RequestStatus::Accepted).await;

        let r1 = board.get("r1").unwrap();
        assert_eq!(r1.status, RequestStatus::Accepted);
        assert_eq!(r1.status.label(), "Accepted");
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(notice.message, "✅ Request accepted!");
        assert_eq!(board.unsynced(), vec![("r1".to_string(), RequestStatus::Accepted)]);
    }

    #[tokio::test]
    async fn test_decline_with_live_data() {
        let store = MemoryStore::new();
        let id = store
            .add(
                Collection::Requests,
                Write::default().field("from", "Kay P").field("status", "pending"),
            )
            .await
            .unwrap();
        let mut board = RequestBoard::load(&store, Fallback::Samples).await;
        assert_eq!(board.source, DataSource::Live);

        let notice = board.change_status(&store, &id, RequestStatus::Declined).await;
        assert_eq!(notice, Notice::error("❌ Request declined."));
        assert!(board.unsynced().is_empty());

        let stored: ExchangeRequest = store
            .get(Collection::Requests, &id)
            .await
            .unwrap()
            .unwrap()
            .decode()
            .unwrap();
        assert_eq!(stored.status, RequestStatus::Declined);
    }

    #[tokio::test]
    async fn test_reconcile_retries_unsynced_writes() {
        let store = MemoryStore::new();
        let id = store
            .add(Collection::Requests, Write::default().field("status", "pending"))
            .await
            .unwrap();
        let mut board = RequestBoard::load(&store, Fallback::Samples).await;

        store.set_offline(true);
        board.change_status(&store, &id, RequestStatus::Accepted).await;
        assert_eq!(board.reconcile(&store).await, 1);

        store.set_offline(false);
        assert_eq!(board.reconcile(&store).await, 0);
        let stored = store.get(Collection::Requests, &id).await.unwrap().unwrap();
        assert_eq!(stored.fields["status"], "accepted");
    }

    #[tokio::test]
    async fn test_reconcile_drops_rows_missing_from_store() {
        let store = MemoryStore::new();
        let mut board = RequestBoard::from(Listing {
            items: samples::requests(),
            source: DataSource::Sample,
        });
        assert!(board.apply("r3", RequestStatus::Declined));
        board.record_write("r3", RequestStatus::Declined, Err(StoreError::Offline));
        assert_eq!(board.unsynced().len(), 1);

        // Sample rows were never stored: update answers NotFound.
        assert_eq!(board.reconcile(&store).await, 0);
        assert_eq!(board.get("r3").unwrap().status, RequestStatus::Declined);
    }

    #[test]
    fn test_apply_patches_before_write() {
        let mut board = RequestBoard::from(Listing {
            items: samples::requests(),
            source: DataSource::Sample,
        });
        assert!(board.apply("r1", RequestStatus::Accepted));
        assert_eq!(board.get("r1").unwrap().status, RequestStatus::Accepted);
        assert!(board.unsynced().is_empty());
        assert!(!board.apply("missing", RequestStatus::Accepted));
    }

    #[tokio::test]
    async fn test_overlapping_status_changes_both_kept() {
        let store = MemoryStore::new();
        let mut ids = Vec::new();
        for from in ["Kay P", "Lee M"] {
            let write = Write::default().field("from", from).field("status", "pending");
            ids.push(store.add(Collection::Requests, write).await.unwrap());
        }
        let board = RefCell::new(RequestBoard::load(&store, Fallback::Samples).await);

        // Each action patches the shared board, awaits its own write, then
        // records the outcome on the shared board again.
        let act = |id: String, status: RequestStatus| {
            let (board, store) = (&board, &store);
            async move {
                board.borrow_mut().apply(&id, status);
                let result = write_status(store, &id, status).await;
                board.borrow_mut().record_write(&id, status, result)
            }
        };
        tokio::join!(
            act(ids[0].clone(), RequestStatus::Accepted),
            act(ids[1].clone(), RequestStatus::Declined),
        );

        let board = board.into_inner();
        assert_eq!(board.get(&ids[0]).unwrap().status, RequestStatus::Accepted);
        assert_eq!(board.get(&ids[1]).unwrap().status, RequestStatus::Declined);
        assert!(board.unsynced().is_empty());
    }

    #[test]
    fn test_resolve_skill() {
        let skills = samples::skills();
        let requests = samples::requests();
        // r2 names "React Dev" but points at s2 by id.
        assert_eq!(resolve_skill(&requests[1], &skills).map(|s| s.id.as_str()), Some("s2"));

        let legacy = ExchangeRequest {
            skill: "photography".into(),
            ..Default::default()
        };
        assert_eq!(resolve_skill(&legacy, &skills).map(|s| s.id.as_str()), Some("s3"));

        let dangling = ExchangeRequest {
            skill: "Juggling".into(),
            skill_id: Some("gone".into()),
            ..Default::default()
        };
        assert!(resolve_skill(&dangling, &skills).is_none());
    }

    #[test]
    fn test_display_time() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        assert_eq!(display_time(Some("2 hrs ago"), now), "2 hrs ago");
        assert_eq!(display_time(None, now), "");
        assert_eq!(display_time(Some("2024-03-10T11:59:40Z"), now), "just now");
        assert_eq!(display_time(Some("2024-03-10T11:15:00Z"), now), "45 min ago");
        assert_eq!(display_time(Some("2024-03-10T11:00:00.000Z"), now), "1 hr ago");
        assert_eq!(display_time(Some("2024-03-10T02:00:00Z"), now), "10 hrs ago");
        assert_eq!(display_time(Some("2024-03-07T12:00:00Z"), now), "3 days ago");
        assert_eq!(display_time(Some("2023-12-25T09:00:00Z"), now), "Dec 25, 2023");
    }
}
