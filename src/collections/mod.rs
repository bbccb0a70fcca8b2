//! Collection services and their HTTP handlers
//!
//! - [`PropertyCollection`]: read-only listings with filters and pagination
//! - [`UserCollection`]: user creation with sequential ids
//! - [`FavoriteCollection`]: idempotent favorites with delete by id

pub mod favorites;
pub mod handlers;
pub mod properties;
pub mod users;

pub use favorites::FavoriteCollection;
pub use handlers::AppState;
pub use properties::PropertyCollection;
pub use users::UserCollection;
