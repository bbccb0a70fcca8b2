//! Core module containing the records, queries, errors and service traits

pub mod error;
pub mod query;
pub mod record;
pub mod service;
pub mod store;
pub mod validation;

pub use error::{ListingsError, ListingsResult};
pub use query::{ParsedQuery, PropertyQuery};
pub use record::{
    FavoriteRecord, NewUser, PropertyFields, PropertyRecord, Purpose, Status, UserRecord,
};
pub use service::{FavoriteService, PropertyService, UserService};
pub use store::DocumentStore;
