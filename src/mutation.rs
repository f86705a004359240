//! Create/update/delete operations over a [`Store`].
//!
//! Each operation validates everything it needs against the current store
//! before touching it, so a failed call leaves the store exactly as it was.
//! Deletions that cascade first compute a [`CascadePlan`] and then apply it in
//! a single pass per collection.

use ahash::AHashSet;

use crate::{
    errors::PostGraphError,
    ids::{IdGenerator, RandomIds},
    model::{Comment, EntityKind, NewComment, NewPost, NewUser, Post, User, UserPatch},
    store::Store,
};

/// Records removed as a side effect of deleting a user or post.
#[derive(Debug, Default, Clone)]
pub struct CascadePlan {
    pub posts: AHashSet<String>,
    pub comments: AHashSet<String>,
}

impl CascadePlan {
    /// Posts authored by `user_id`, every comment on them, and every comment
    /// `user_id` wrote elsewhere.
    pub fn for_user(store: &Store, user_id: &str) -> Self {
        let posts: AHashSet<String> = store
            .posts()
            .iter()
            .filter(|post| post.author == user_id)
            .map(|post| post.id.clone())
            .collect();
        let comments = store
            .comments()
            .iter()
            .filter(|comment| comment.author == user_id || posts.contains(&comment.post))
            .map(|comment| comment.id.clone())
            .collect();
        Self { posts, comments }
    }

    /// Every comment attached to `post_id`.
    pub fn for_post(store: &Store, post_id: &str) -> Self {
        let comments = store
            .comments()
            .iter()
            .filter(|comment| comment.post == post_id)
            .map(|comment| comment.id.clone())
            .collect();
        Self {
            posts: AHashSet::new(),
            comments,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty() && self.comments.is_empty()
    }

    fn apply(&self, store: &mut Store) {
        if !self.posts.is_empty() {
            store
                .posts_mut()
                .retain(|post| !self.posts.contains(&post.id));
        }
        if !self.comments.is_empty() {
            store
                .comments_mut()
                .retain(|comment| !self.comments.contains(&comment.id));
        }
    }
}

pub struct Mutator {
    ids: Box<dyn IdGenerator>,
}

impl Mutator {
    pub fn new<G: IdGenerator + 'static>(ids: G) -> Self {
        Self { ids: Box::new(ids) }
    }

    pub fn create_user(&mut self, store: &mut Store, input: NewUser) -> Result<User, PostGraphError> {
        if email_taken(store, &input.email, None) {
            return Err(PostGraphError::duplicate_email(input.email));
        }
        let user = User {
            id: self.fresh_id(store, EntityKind::User),
            name: input.name,
            email: input.email,
            age: input.age,
        };
        tracing::debug!(id = %user.id, email = %user.email, "created user");
        store.users_mut().push(user.clone());
        Ok(user)
    }

    pub fn update_user(
        &mut self,
        store: &mut Store,
        id: &str,
        patch: UserPatch,
    ) -> Result<User, PostGraphError> {
        let index = store
            .user_position(id)
            .ok_or_else(|| PostGraphError::not_found(EntityKind::User, id))?;
        if patch.is_empty() {
            return Ok(store.users()[index].clone());
        }
        if let Some(email) = &patch.email {
            if email_taken(store, email, Some(id)) {
                return Err(PostGraphError::duplicate_email(email.as_str()));
            }
        }
        let user = &mut store.users_mut()[index];
        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(age) = patch.age {
            user.age = age;
        }
        tracing::debug!(id = %user.id, "updated user");
        Ok(user.clone())
    }

    pub fn delete_user(&mut self, store: &mut Store, id: &str) -> Result<User, PostGraphError> {
        let index = store
            .user_position(id)
            .ok_or_else(|| PostGraphError::not_found(EntityKind::User, id))?;
        let plan = CascadePlan::for_user(store, id);
        let user = store.users_mut().remove(index);
        if !plan.is_empty() {
            plan.apply(store);
        }
        tracing::info!(
            id = %user.id,
            posts = plan.posts.len(),
            comments = plan.comments.len(),
            "deleted user with cascade"
        );
        Ok(user)
    }

    pub fn create_post(&mut self, store: &mut Store, input: NewPost) -> Result<Post, PostGraphError> {
        if store.user(&input.author).is_none() {
            return Err(PostGraphError::invalid_reference("author", input.author));
        }
        let post = Post {
            id: self.fresh_id(store, EntityKind::Post),
            title: input.title,
            body: input.body,
            published: input.published,
            author: input.author,
        };
        tracing::debug!(id = %post.id, author = %post.author, "created post");
        store.posts_mut().push(post.clone());
        Ok(post)
    }

    pub fn delete_post(&mut self, store: &mut Store, id: &str) -> Result<Post, PostGraphError> {
        let index = store
            .post_position(id)
            .ok_or_else(|| PostGraphError::not_found(EntityKind::Post, id))?;
        let plan = CascadePlan::for_post(store, id);
        let post = store.posts_mut().remove(index);
        if !plan.is_empty() {
            plan.apply(store);
        }
        tracing::info!(id = %post.id, comments = plan.comments.len(), "deleted post with cascade");
        Ok(post)
    }

    pub fn create_comment(
        &mut self,
        store: &mut Store,
        input: NewComment,
    ) -> Result<Comment, PostGraphError> {
        if store.user(&input.author).is_none() {
            return Err(PostGraphError::invalid_reference("author", input.author));
        }
        let published = store.post(&input.post).is_some_and(|post| post.published);
        if !published {
            return Err(PostGraphError::invalid_reference("post", input.post));
        }
        let comment = Comment {
            id: self.fresh_id(store, EntityKind::Comment),
            text: input.text,
            author: input.author,
            post: input.post,
        };
        tracing::debug!(id = %comment.id, post = %comment.post, "created comment");
        store.comments_mut().push(comment.clone());
        Ok(comment)
    }

    pub fn delete_comment(&mut self, store: &mut Store, id: &str) -> Result<Comment, PostGraphError> {
        let index = store
            .comment_position(id)
            .ok_or_else(|| PostGraphError::not_found(EntityKind::Comment, id))?;
        let comment = store.comments_mut().remove(index);
        tracing::debug!(id = %comment.id, "deleted comment");
        Ok(comment)
    }

    fn fresh_id(&mut self, store: &Store, kind: EntityKind) -> String {
        loop {
            let id = self.ids.next_id();
            if !store.contains_id(kind, &id) {
                return id;
            }
            tracing::debug!(%kind, %id, "generated id already live, retrying");
        }
    }
}

impl Default for Mutator {
    fn default() -> Self {
        Self::new(RandomIds::new())
    }
}

fn email_taken(store: &Store, email: &str, except: Option<&str>) -> bool {
    store
        .users()
        .iter()
        .any(|user| user.email == email && Some(user.id.as_str()) != except)
}
