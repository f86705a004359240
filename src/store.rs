//! Backing collections for the data graph.
//!
//! [`Store`] is the single source of truth for users, posts and comments. It
//! keeps each collection in insertion order and carries no integrity logic of
//! its own; [`crate::mutation::Mutator`] is the only writer.

use serde::{Deserialize, Serialize};

use crate::model::{Comment, EntityKind, Post, User};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    #[serde(default)]
    users: Vec<User>,
    #[serde(default)]
    posts: Vec<Post>,
    #[serde(default)]
    comments: Vec<Comment>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from existing collections without validating them.
    /// Use [`crate::safety::run_integrity_checks`] to audit the result.
    pub fn from_parts(users: Vec<User>, posts: Vec<Post>, comments: Vec<Comment>) -> Self {
        Self {
            users,
            posts,
            comments,
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn post(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    pub fn comment(&self, id: &str) -> Option<&Comment> {
        self.comments.iter().find(|comment| comment.id == id)
    }

    pub fn contains_id(&self, kind: EntityKind, id: &str) -> bool {
        match kind {
            EntityKind::User => self.user(id).is_some(),
            EntityKind::Post => self.post(id).is_some(),
            EntityKind::Comment => self.comment(id).is_some(),
        }
    }

    pub fn len(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::User => self.users.len(),
            EntityKind::Post => self.posts.len(),
            EntityKind::Comment => self.comments.len(),
        }
    }
}

impl Store {
    pub(crate) fn users_mut(&mut self) -> &mut Vec<User> {
        &mut self.users
    }

    pub(crate) fn posts_mut(&mut self) -> &mut Vec<Post> {
        &mut self.posts
    }

    pub(crate) fn comments_mut(&mut self) -> &mut Vec<Comment> {
        &mut self.comments
    }

    pub(crate) fn user_position(&self, id: &str) -> Option<usize> {
        self.users.iter().position(|user| user.id == id)
    }

    pub(crate) fn post_position(&self, id: &str) -> Option<usize> {
        self.posts.iter().position(|post| post.id == id)
    }

    pub(crate) fn comment_position(&self, id: &str) -> Option<usize> {
        self.comments.iter().position(|comment| comment.id == id)
    }
}
