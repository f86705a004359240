use crate::{
    model::{Comment, Post, User},
    store::Store,
};

/// Read-only listing over a [`Store`] with optional case-insensitive
/// substring filters. Results keep insertion order and never fail.
pub struct StoreQuery<'a> {
    store: &'a Store,
}

impl<'a> StoreQuery<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Users whose `name` contains `query`.
    pub fn list_users(&self, query: Option<&str>) -> Vec<&'a User> {
        let needle = Needle::new(query);
        self.store
            .users()
            .iter()
            .filter(|user| needle.matches(&user.name))
            .collect()
    }

    /// Posts whose `title` or `body` contains `query`.
    pub fn list_posts(&self, query: Option<&str>) -> Vec<&'a Post> {
        let needle = Needle::new(query);
        self.store
            .posts()
            .iter()
            .filter(|post| needle.matches(&post.title) || needle.matches(&post.body))
            .collect()
    }

    /// Comments whose `text` contains `query`.
    pub fn list_comments(&self, query: Option<&str>) -> Vec<&'a Comment> {
        let needle = Needle::new(query);
        self.store
            .comments()
            .iter()
            .filter(|comment| needle.matches(&comment.text))
            .collect()
    }
}

impl Store {
    pub fn query(&self) -> StoreQuery<'_> {
        StoreQuery::new(self)
    }
}

struct Needle(Option<String>);

impl Needle {
    fn new(query: Option<&str>) -> Self {
        Self(query.map(str::to_lowercase))
    }

    fn matches(&self, haystack: &str) -> bool {
        match &self.0 {
            None => true,
            Some(needle) => haystack.to_lowercase().contains(needle.as_str()),
        }
    }
}
