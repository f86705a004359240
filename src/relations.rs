//! Lazy foreign-key joins between users, posts and comments.
//!
//! Every lookup is a linear scan over the relevant collection. A foreign key
//! that no longer resolves means a cascade was skipped somewhere, so it is
//! reported as [`PostGraphError::IntegrityFault`] rather than an empty result.

use crate::{
    errors::PostGraphError,
    model::{Comment, EntityKind, Post, User},
    store::Store,
};

pub struct Relations<'a> {
    store: &'a Store,
}

impl<'a> Relations<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    pub fn author_of_post(&self, post: &Post) -> Result<&'a User, PostGraphError> {
        self.store.user(&post.author).ok_or_else(|| {
            PostGraphError::integrity_fault(EntityKind::Post, &post.id, "author", &post.author)
        })
    }

    pub fn comments_on_post(&self, post: &Post) -> Vec<&'a Comment> {
        self.store
            .comments()
            .iter()
            .filter(|comment| comment.post == post.id)
            .collect()
    }

    pub fn author_of_comment(&self, comment: &Comment) -> Result<&'a User, PostGraphError> {
        self.store.user(&comment.author).ok_or_else(|| {
            PostGraphError::integrity_fault(
                EntityKind::Comment,
                &comment.id,
                "author",
                &comment.author,
            )
        })
    }

    pub fn post_of_comment(&self, comment: &Comment) -> Result<&'a Post, PostGraphError> {
        self.store.post(&comment.post).ok_or_else(|| {
            PostGraphError::integrity_fault(EntityKind::Comment, &comment.id, "post", &comment.post)
        })
    }

    pub fn posts_by_user(&self, user: &User) -> Vec<&'a Post> {
        self.store
            .posts()
            .iter()
            .filter(|post| post.author == user.id)
            .collect()
    }

    pub fn comments_by_user(&self, user: &User) -> Vec<&'a Comment> {
        self.store
            .comments()
            .iter()
            .filter(|comment| comment.author == user.id)
            .collect()
    }

    pub fn user_posts(&self, user_id: &str) -> Result<Vec<&'a Post>, PostGraphError> {
        Ok(self.posts_by_user(self.user(user_id)?))
    }

    pub fn user_comments(&self, user_id: &str) -> Result<Vec<&'a Comment>, PostGraphError> {
        Ok(self.comments_by_user(self.user(user_id)?))
    }

    pub fn post_author(&self, post_id: &str) -> Result<&'a User, PostGraphError> {
        self.author_of_post(self.post(post_id)?)
    }

    pub fn post_comments(&self, post_id: &str) -> Result<Vec<&'a Comment>, PostGraphError> {
        Ok(self.comments_on_post(self.post(post_id)?))
    }

    pub fn comment_author(&self, comment_id: &str) -> Result<&'a User, PostGraphError> {
        self.author_of_comment(self.comment(comment_id)?)
    }

    pub fn comment_post(&self, comment_id: &str) -> Result<&'a Post, PostGraphError> {
        self.post_of_comment(self.comment(comment_id)?)
    }

    fn user(&self, id: &str) -> Result<&'a User, PostGraphError> {
        self.store
            .user(id)
            .ok_or_else(|| PostGraphError::not_found(EntityKind::User, id))
    }

    fn post(&self, id: &str) -> Result<&'a Post, PostGraphError> {
        self.store
            .post(id)
            .ok_or_else(|| PostGraphError::not_found(EntityKind::Post, id))
    }

    fn comment(&self, id: &str) -> Result<&'a Comment, PostGraphError> {
        self.store
            .comment(id)
            .ok_or_else(|| PostGraphError::not_found(EntityKind::Comment, id))
    }
}

impl Store {
    pub fn relations(&self) -> Relations<'_> {
        Relations::new(self)
    }
}
