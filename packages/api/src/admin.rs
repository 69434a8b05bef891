//! Club administration: create and delete clubs.
//!
//! Unlike the public club list, the admin list shows only what the store
//! actually holds; a failed read shows an empty list.

use store::{Collection, DocumentStore, Write};

use crate::entity::{load, Entity};
use crate::models::{AuthUser, Club, DEFAULT_CLUB_EMOJI};
use crate::toast::Notice;
use crate::validation::{require, ValidationError};

/// Header gradients offered by the create form.
pub const GRADIENT_PRESETS: [[&str; 2]; 5] = [
    ["#7c3aed", "#4f46e5"],
    ["#059669", "#10b981"],
    ["#f59e0b", "#f97316"],
    ["#dc2626", "#f87171"],
    ["#0369a1", "#38bdf8"],
];

/// Create-club form state.
#[derive(Debug, Clone, PartialEq)]
pub struct NewClub {
    pub name: String,
    pub description: String,
    pub emoji: String,
    pub category: String,
    /// Index into [`GRADIENT_PRESETS`].
    pub gradient: usize,
}

impl Default for NewClub {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            emoji: DEFAULT_CLUB_EMOJI.to_string(),
            category: String::new(),
            gradient: 0,
        }
    }
}

impl NewClub {
    /// Validate and build the document to add.
    pub fn to_write(&self, admin: &AuthUser) -> Result<Write, ValidationError> {
        let name = require("Club name", &self.name)?;
        let [from, to] = GRADIENT_PRESETS
            .get(self.gradient)
            .copied()
            .unwrap_or(GRADIENT_PRESETS[0]);
        Ok(Write::default()
            .field("name", name)
            .field("description", self.description.trim())
            .field("emoji", self.emoji.trim())
            .field("category", self.category.trim())
            .field("grad", vec![from, to])
            .field("members", 0)
            .field("adminId", admin.uid.as_str())
            .with_server_timestamp("createdAt"))
    }
}

/// State of the admin page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminBoard {
    pub clubs: Vec<Club>,
    pending_delete: Option<String>,
}

impl AdminBoard {
    pub async fn load(store: &impl DocumentStore) -> Self {
        let mut board = Self::default();
        board.reload(store).await;
        board
    }

    pub async fn reload(&mut self, store: &impl DocumentStore) {
        self.clubs = fetch_clubs(store).await;
    }

    /// Add a club and re-fetch the list. Validation failures are returned
    /// before anything is written; store outcomes come back as a toast.
    pub async fn create(
        &mut self,
        store: &impl DocumentStore,
        form: &NewClub,
        admin: &AuthUser,
    ) -> Result<Notice, ValidationError> {
        let notice = add_club(store, form, admin).await?;
        if notice.is_success() {
            self.reload(store).await;
        }
        Ok(notice)
    }

    /// Ask for confirmation before deleting `club_id`.
    pub fn request_delete(&mut self, club_id: &str) {
        self.pending_delete = Some(club_id.to_string());
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// The club awaiting confirmation, if any.
    pub fn pending_delete(&self) -> Option<&Club> {
        let id = self.pending_delete.as_deref()?;
        self.clubs.iter().find(|c| c.id == id)
    }

    /// Confirm the pending deletion, handing back the id to delete.
    pub fn take_pending_delete(&mut self) -> Option<String> {
        self.pending_delete.take()
    }

    /// Delete the club awaiting confirmation. Without a pending request
    /// nothing is deleted and no toast is produced.
    pub async fn confirm_delete(&mut self, store: &impl DocumentStore) -> Option<Notice> {
        let id = self.take_pending_delete()?;
        Some(match delete_club(store, &id).await {
            Ok(notice) => {
                self.reload(store).await;
                notice
            }
            Err(notice) => notice,
        })
    }
}

/// The clubs the store holds. A failed read gives an empty list.
pub async fn fetch_clubs(store: &impl DocumentStore) -> Vec<Club> {
    match load::<Club>(store).await {
        Ok(clubs) => clubs,
        Err(e) => {
            tracing::warn!("could not load clubs for admin: {e}");
            Vec::new()
        }
    }
}

/// Validate `form` and write the new club.
pub async fn add_club(
    store: &impl DocumentStore,
    form: &NewClub,
    admin: &AuthUser,
) -> Result<Notice, ValidationError> {
    let write = form.to_write(admin)?;
    match store.add(Club::COLLECTION, write).await {
        Ok(id) => {
            tracing::info!("created club {id}");
            Ok(Notice::success("Club created! 🎉"))
        }
        Err(e) => {
            tracing::error!("creating club failed: {e}");
            Ok(Notice::error("Error creating club."))
        }
    }
}

/// Delete club `id`. Both outcomes carry the toast to show; `Ok` means the
/// list should be re-fetched.
pub async fn delete_club(store: &impl DocumentStore, id: &str) -> Result<Notice, Notice> {
    match store.delete(Collection::Clubs, id).await {
        Ok(()) => {
            tracing::info!("deleted club {id}");
            Ok(Notice::info("Club deleted."))
        }
        Err(e) => {
            tracing::error!("deleting club {id} failed: {e}");
            Err(Notice::error("Error deleting club."))
        }
    }
}
