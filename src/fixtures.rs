//! Seed data and JSON snapshots.
//!
//! Snapshots use the serialized form of [`Store`]:
//! `{ "users": [...], "posts": [...], "comments": [...] }`. Loading a snapshot
//! runs the full integrity audit and rejects anything that would break the
//! invariants the mutation engine relies on. [`read_store`] skips the audit
//! and is only meant for inspecting a snapshot with the integrity checks.

use std::{fs, path::Path};

use crate::{
    errors::PostGraphError,
    model::{Comment, Post, User},
    safety::run_strict_integrity_checks,
    store::Store,
};

/// The demo data set: three users, three posts and four comments.
pub fn demo_store() -> Store {
    let users = vec![
        user("1", "Andrew", "andrew@example.com", Some(27)),
        user("2", "Sarah", "sarah@example.com", None),
        user("3", "Mike", "mike@example.com", None),
    ];
    let posts = vec![
        post("10", "First post", "This is the first post.", false, "1"),
        post("20", "Second post", "This is the second post.", true, "1"),
        post("30", "Third post", "This is the third post.", false, "2"),
    ];
    let comments = vec![
        comment("100", "The test text 1", "1", "30"),
        comment("200", "Some test text 2", "1", "30"),
        comment("300", "Another test text 3", "1", "30"),
        comment("400", "Final test text 4", "2", "20"),
    ];
    Store::from_parts(users, posts, comments)
}

pub fn store_from_json(json: &str) -> Result<Store, PostGraphError> {
    let store = parse_store(json)?;
    audit(&store)?;
    Ok(store)
}

pub fn load_store<P: AsRef<Path>>(path: P) -> Result<Store, PostGraphError> {
    let path = path.as_ref();
    let store = read_store(path)?;
    audit(&store)?;
    tracing::debug!(
        path = %path.display(),
        users = store.users().len(),
        posts = store.posts().len(),
        comments = store.comments().len(),
        "loaded snapshot"
    );
    Ok(store)
}

/// Parses a snapshot without auditing it. The result may hold dangling keys
/// or duplicates and must not be handed to a [`crate::Mutator`].
pub fn read_store<P: AsRef<Path>>(path: P) -> Result<Store, PostGraphError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .map_err(|e| PostGraphError::fixture(format!("{}: {e}", path.display())))?;
    parse_store(&json)
}

pub fn save_store<P: AsRef<Path>>(store: &Store, path: P) -> Result<(), PostGraphError> {
    let path = path.as_ref();
    let json =
        serde_json::to_string_pretty(store).map_err(|e| PostGraphError::fixture(e.to_string()))?;
    fs::write(path, json).map_err(|e| PostGraphError::fixture(format!("{}: {e}", path.display())))
}

fn parse_store(json: &str) -> Result<Store, PostGraphError> {
    serde_json::from_str(json).map_err(|e| PostGraphError::fixture(e.to_string()))
}

fn audit(store: &Store) -> Result<(), PostGraphError> {
    run_strict_integrity_checks(store).map_err(|err| {
        tracing::warn!(report = ?err.report, "rejected snapshot");
        PostGraphError::fixture(err.to_string())
    })
}

fn user(id: &str, name: &str, email: &str, age: Option<u32>) -> User {
    User {
        id: id.into(),
        name: name.into(),
        email: email.into(),
        age,
    }
}

fn post(id: &str, title: &str, body: &str, published: bool, author: &str) -> Post {
    Post {
        id: id.into(),
        title: title.into(),
        body: body.into(),
        published,
        author: author.into(),
    }
}

fn comment(id: &str, text: &str, author: &str, post: &str) -> Comment {
    Comment {
        id: id.into(),
        text: text.into(),
        author: author.into(),
        post: post.into(),
    }
}
