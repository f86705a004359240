//! In-memory data graph of users, posts and comments with referential integrity.
//! Run Criterion benchmarks with `cargo bench` to inspect reports under `target/criterion`.

pub mod bench_utils;
pub mod cli;
pub mod config;
pub mod errors;
pub mod fixtures;
pub mod ids;
pub mod model;
pub mod mutation;
pub mod operation;
pub mod query;
pub mod relations;
pub mod safety;
pub mod shared;
pub mod store;

pub use crate::config::{IdStrategy, SeedSource, StoreConfig};
pub use crate::errors::PostGraphError;
pub use crate::ids::{IdGenerator, RandomIds, SequentialIds};
pub use crate::model::{Comment, EntityKind, NewComment, NewPost, NewUser, Post, User, UserPatch};
pub use crate::mutation::{CascadePlan, Mutator};
pub use crate::operation::Operation;
pub use crate::query::StoreQuery;
pub use crate::relations::Relations;
pub use crate::safety::{IntegrityError, IntegrityReport};
pub use crate::shared::SharedStore;
pub use crate::store::Store;
