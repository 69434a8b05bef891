//! # API crate: ClubConnect application logic
//!
//! Everything the web frontend does that is not markup lives here: entity
//! models, sample data, loading with fallback, form validation, the identity
//! provider boundary, session state and each page's actions. The `ui` crate
//! only wires these into components.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`models`] | | `Club`, `SkillListing`, `ExchangeRequest`, `LeaderboardEntry`, `UserProfile`, `AuthUser` |
//! | [`samples`] | | Built-in dataset shown when the store is unreachable or empty |
//! | [`entity`] | | `Entity` trait, collection loading and sample fallback |
//! | [`identity`] | `firebase` for [`identity::FirebaseAuth`] | Identity provider trait, Firebase and in-memory providers |
//! | [`session`] | | Session snapshot store fed by provider notifications |
//! | [`routes`] | | Page table, nav links and the auth guard |
//! | [`toast`] | | Single-slot notification queue |
//! | [`counter`] | | Home page count-up animation and visibility trigger |
//! | [`home`], [`clubs`], [`skills`], [`requests`], [`leaderboard`], [`admin`], [`profile`], [`account`] | | Per-page state and actions |
//! | [`backend`] | | Chooses Firebase or demo backends from config |
//!
//! Actions that only report back to the user return a [`toast::Notice`];
//! actions whose failure the caller branches on return `Result`.

pub mod account;
pub mod admin;
pub mod backend;
pub mod clubs;
pub mod counter;
pub mod entity;
pub mod error;
pub mod home;
pub mod identity;
pub mod leaderboard;
pub mod models;
pub mod profile;
pub mod requests;
pub mod routes;
pub mod samples;
pub mod session;
pub mod skills;
pub mod toast;
pub mod validation;

pub use backend::Backend;
pub use entity::{DataSource, Entity, Fallback, Listing};
pub use error::ActionError;
pub use identity::{AnyIdentity, AuthError, IdentityProvider, ProviderState};
pub use models::{
    AuthUser, Club, ExchangeRequest, LeaderboardEntry, RequestStatus, SkillListing, UserProfile,
};
pub use routes::{Access, Page};
pub use session::{SessionSnapshot, SessionStore};
pub use toast::{Notice, NoticeKind};
pub use validation::ValidationError;

pub use store::ClubConnectConfig;
