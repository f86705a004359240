//! Thread-safe wrapper for callers that cannot serialize access themselves.
//!
//! Reads share the store lock. Every mutation holds the write lock across its
//! whole check-then-mutate sequence, so no reader ever observes a half-applied
//! cascade. Lock order is always store, then mutator.

use parking_lot::{Mutex, RwLock};
use serde_json::Value;

use crate::{
    errors::PostGraphError,
    model::{Comment, NewComment, NewPost, NewUser, Post, User, UserPatch},
    mutation::Mutator,
    operation::{self, Operation},
    safety::{IntegrityReport, run_integrity_checks},
    store::Store,
};

pub struct SharedStore {
    store: RwLock<Store>,
    mutator: Mutex<Mutator>,
}

impl SharedStore {
    pub fn new(store: Store, mutator: Mutator) -> Self {
        Self {
            store: RwLock::new(store),
            mutator: Mutex::new(mutator),
        }
    }

    /// Runs `f` with shared access to the store.
    pub fn read<R>(&self, f: impl FnOnce(&Store) -> R) -> R {
        f(&*self.store.read())
    }

    /// Runs `f` with exclusive access to the store and the mutator.
    pub fn write<R>(&self, f: impl FnOnce(&mut Store, &mut Mutator) -> R) -> R {
        let mut store = self.store.write();
        let mut mutator = self.mutator.lock();
        f(&mut *store, &mut *mutator)
    }

    pub fn snapshot(&self) -> Store {
        self.read(Store::clone)
    }

    pub fn list_users(&self, query: Option<&str>) -> Vec<User> {
        self.read(|store| store.query().list_users(query).into_iter().cloned().collect())
    }

    pub fn list_posts(&self, query: Option<&str>) -> Vec<Post> {
        self.read(|store| store.query().list_posts(query).into_iter().cloned().collect())
    }

    pub fn list_comments(&self, query: Option<&str>) -> Vec<Comment> {
        self.read(|store| {
            store
                .query()
                .list_comments(query)
                .into_iter()
                .cloned()
                .collect()
        })
    }

    pub fn create_user(&self, input: NewUser) -> Result<User, PostGraphError> {
        self.write(|store, mutator| mutator.create_user(store, input))
    }

    pub fn update_user(&self, id: &str, patch: UserPatch) -> Result<User, PostGraphError> {
        self.write(|store, mutator| mutator.update_user(store, id, patch))
    }

    pub fn delete_user(&self, id: &str) -> Result<User, PostGraphError> {
        self.write(|store, mutator| mutator.delete_user(store, id))
    }

    pub fn create_post(&self, input: NewPost) -> Result<Post, PostGraphError> {
        self.write(|store, mutator| mutator.create_post(store, input))
    }

    pub fn delete_post(&self, id: &str) -> Result<Post, PostGraphError> {
        self.write(|store, mutator| mutator.delete_post(store, id))
    }

    pub fn create_comment(&self, input: NewComment) -> Result<Comment, PostGraphError> {
        self.write(|store, mutator| mutator.create_comment(store, input))
    }

    pub fn delete_comment(&self, id: &str) -> Result<Comment, PostGraphError> {
        self.write(|store, mutator| mutator.delete_comment(store, id))
    }

    pub fn execute(&self, op: Operation) -> Result<Value, PostGraphError> {
        if op.is_read_only() {
            self.read(|store| operation::execute_read(store, &op))
        } else {
            self.write(|store, mutator| operation::execute(store, mutator, op))
        }
    }

    pub fn integrity_report(&self) -> IntegrityReport {
        self.read(run_integrity_checks)
    }
}
