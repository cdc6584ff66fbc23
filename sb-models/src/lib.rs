//! StayBook Models - API data models, local key-value storage, and the
//! persisted session token.
//!
//! Storage is a single `kv_store` table in SQLite; the `TokenStore` keeps the
//! bearer token and identity snapshot there and broadcasts session changes.

pub mod db;
pub mod models;
pub mod schema;
pub mod store;
pub mod token_store;

// Re-export key types
pub use db::{Database, DbPool};
pub use models::booking::{Booking, BookingRequest, BookingStatus, PaymentMethod};
pub use models::hotel::{Hotel, Province};
pub use models::review::{Review, ReviewRequest};
pub use models::room::{
    Feature, Page, PriceRange, RoomDetail, RoomImage, RoomSearchQuery, RoomSummary, SortDirection,
};
pub use models::session::{AuthPayload, Identity, Session, SessionState};
pub use models::user::{User, UserProfile};
pub use store::{KeyValueStore, MemoryStore, SharedStore, SqliteStore};
pub use token_store::TokenStore;
