use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    model::{Comment, Post, User},
    store::Store,
};

#[derive(Clone, Copy, Debug)]
pub struct DatasetShape {
    pub users: usize,
    pub posts_per_user: usize,
    pub comments_per_post: usize,
    /// Probability that a generated post is published.
    pub published_ratio: f64,
}

impl DatasetShape {
    pub fn new(users: usize, posts_per_user: usize, comments_per_post: usize) -> Self {
        Self {
            users,
            posts_per_user,
            comments_per_post,
            published_ratio: 0.5,
        }
    }

    pub fn total_posts(&self) -> usize {
        self.users * self.posts_per_user
    }

    pub fn total_comments(&self) -> usize {
        self.total_posts() * self.comments_per_post
    }
}

/// Builds a consistent store: every post and comment references a generated
/// user, and comment authors are drawn at random from all users.
pub fn generate_dataset(shape: DatasetShape, seed: u64) -> Store {
    assert!(shape.users > 0, "dataset needs at least one user");
    let mut rng = StdRng::seed_from_u64(seed);
    let users: Vec<User> = (0..shape.users)
        .map(|idx| User {
            id: format!("u{idx}"),
            name: format!("User {idx}"),
            email: format!("user{idx}@example.com"),
            age: Some(18 + (idx % 60) as u32),
        })
        .collect();
    let mut posts = Vec::with_capacity(shape.total_posts());
    let mut comments = Vec::with_capacity(shape.total_comments());
    for author in 0..shape.users {
        for slot in 0..shape.posts_per_user {
            let post_id = format!("p{author}_{slot}");
            for c in 0..shape.comments_per_post {
                let commenter = rng.gen_range(0..shape.users);
                comments.push(Comment {
                    id: format!("c{author}_{slot}_{c}"),
                    text: format!("Comment {c} on post {slot} by user {author}"),
                    author: format!("u{commenter}"),
                    post: post_id.clone(),
                });
            }
            posts.push(Post {
                id: post_id,
                title: format!("Post {slot} by user {author}"),
                body: format!("Body text {slot}"),
                published: rng.gen_bool(shape.published_ratio),
                author: format!("u{author}"),
            });
        }
    }
    Store::from_parts(users, posts, comments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::safety::run_integrity_checks;

    #[test]
    fn generated_dataset_is_consistent() {
        let shape = DatasetShape::new(10, 3, 4);
        let store = generate_dataset(shape, 42);
        assert_eq!(store.users().len(), 10);
        assert_eq!(store.posts().len(), shape.total_posts());
        assert_eq!(store.comments().len(), shape.total_comments());
        assert!(!run_integrity_checks(&store).has_issues());
    }

    #[test]
    fn same_seed_same_dataset() {
        let shape = DatasetShape::new(5, 2, 2);
        assert_eq!(generate_dataset(shape, 7), generate_dataset(shape, 7));
    }
}
