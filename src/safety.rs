use std::{fmt, result};

use ahash::{AHashMap, AHashSet};
use serde::Serialize;

use crate::store::Store;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct IntegrityReport {
    pub total_users: usize,
    pub total_posts: usize,
    pub total_comments: usize,
    pub dangling_post_authors: usize,
    pub dangling_comment_authors: usize,
    pub dangling_comment_posts: usize,
    pub duplicate_emails: usize,
    pub duplicate_ids: usize,
}

impl IntegrityReport {
    pub fn merge(&mut self, other: &IntegrityReport) {
        self.total_users = self.total_users.max(other.total_users);
        self.total_posts = self.total_posts.max(other.total_posts);
        self.total_comments = self.total_comments.max(other.total_comments);
        self.dangling_post_authors += other.dangling_post_authors;
        self.dangling_comment_authors += other.dangling_comment_authors;
        self.dangling_comment_posts += other.dangling_comment_posts;
        self.duplicate_emails += other.duplicate_emails;
        self.duplicate_ids += other.duplicate_ids;
    }

    pub fn has_issues(&self) -> bool {
        self.dangling_post_authors > 0
            || self.dangling_comment_authors > 0
            || self.dangling_comment_posts > 0
            || self.duplicate_emails > 0
            || self.duplicate_ids > 0
    }
}

#[derive(Debug)]
pub struct IntegrityError {
    pub report: IntegrityReport,
}

impl fmt::Display for IntegrityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "integrity violations detected: {} dangling keys, {} duplicate emails, {} duplicate ids",
            self.report.dangling_post_authors
                + self.report.dangling_comment_authors
                + self.report.dangling_comment_posts,
            self.report.duplicate_emails,
            self.report.duplicate_ids,
        )
    }
}

impl std::error::Error for IntegrityError {}

/// Counts foreign keys that do not resolve to a live record. Comments on
/// unpublished posts are fine: `published` is only checked at creation.
pub fn validate_referential_integrity(store: &Store) -> IntegrityReport {
    let users: AHashSet<&str> = store.users().iter().map(|user| user.id.as_str()).collect();
    let posts: AHashSet<&str> = store.posts().iter().map(|post| post.id.as_str()).collect();
    let mut report = base_report(store);
    report.dangling_post_authors = store
        .posts()
        .iter()
        .filter(|post| !users.contains(post.author.as_str()))
        .count();
    report.dangling_comment_authors = store
        .comments()
        .iter()
        .filter(|comment| !users.contains(comment.author.as_str()))
        .count();
    report.dangling_comment_posts = store
        .comments()
        .iter()
        .filter(|comment| !posts.contains(comment.post.as_str()))
        .count();
    report
}

pub fn validate_unique_emails(store: &Store) -> IntegrityReport {
    let mut report = base_report(store);
    report.duplicate_emails = surplus(store.users().iter().map(|user| user.email.as_str()));
    report
}

pub fn validate_unique_ids(store: &Store) -> IntegrityReport {
    let mut report = base_report(store);
    report.duplicate_ids = surplus(store.users().iter().map(|user| user.id.as_str()))
        + surplus(store.posts().iter().map(|post| post.id.as_str()))
        + surplus(store.comments().iter().map(|comment| comment.id.as_str()));
    report
}

pub fn run_integrity_checks(store: &Store) -> IntegrityReport {
    let mut report = IntegrityReport::default();
    report.merge(&validate_referential_integrity(store));
    report.merge(&validate_unique_emails(store));
    report.merge(&validate_unique_ids(store));
    report
}

pub fn run_strict_integrity_checks(store: &Store) -> result::Result<(), IntegrityError> {
    let report = run_integrity_checks(store);
    if report.has_issues() {
        Err(IntegrityError { report })
    } else {
        Ok(())
    }
}

fn base_report(store: &Store) -> IntegrityReport {
    IntegrityReport {
        total_users: store.users().len(),
        total_posts: store.posts().len(),
        total_comments: store.comments().len(),
        ..IntegrityReport::default()
    }
}

// Occurrences beyond the first of each key.
fn surplus<'a>(keys: impl Iterator<Item = &'a str>) -> usize {
    let mut counts: AHashMap<&str, usize> = AHashMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts.values().map(|count| count - 1).sum()
}
