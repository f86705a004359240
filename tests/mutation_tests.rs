use postgraph::{
    EntityKind, Mutator, NewComment, NewPost, NewUser, PostGraphError, SequentialIds, Store,
    UserPatch, fixtures::demo_store,
};

fn setup() -> (Store, Mutator) {
    (Store::new(), Mutator::new(SequentialIds::new("id")))
}

fn new_post(author: &str, published: bool) -> NewPost {
    NewPost {
        title: "T".into(),
        body: "B".into(),
        published,
        author: author.into(),
    }
}

fn new_comment(author: &str, post: &str) -> NewComment {
    NewComment {
        text: "hi".into(),
        author: author.into(),
        post: post.into(),
    }
}

#[test]
fn test_create_user_returns_stored_record() {
    let (mut store, mut mutator) = setup();
    let ann = mutator
        .create_user(&mut store, NewUser::new("Ann", "ann@x.com").with_age(30))
        .expect("create");
    assert_eq!(ann.id, "id1");
    assert_eq!(ann.name, "Ann");
    assert_eq!(ann.email, "ann@x.com");
    assert_eq!(ann.age, Some(30));
    assert_eq!(store.users(), &[ann]);
}

#[test]
fn test_create_user_rejects_duplicate_email() {
    let (mut store, mut mutator) = setup();
    mutator
        .create_user(&mut store, NewUser::new("Ann", "ann@x.com").with_age(30))
        .expect("create");
    let err = mutator
        .create_user(&mut store, NewUser::new("Bob", "ann@x.com"))
        .expect_err("duplicate");
    assert_eq!(err, PostGraphError::DuplicateEmail("ann@x.com".into()));
    assert_eq!(store.users().len(), 1);
}

#[test]
fn test_create_post_requires_live_author() {
    let mut store = demo_store();
    let mut mutator = Mutator::new(SequentialIds::new("p"));
    let post = mutator
        .create_post(&mut store, new_post("1", true))
        .expect("create");
    assert_eq!(post.author, "1");
    assert!(store.post(&post.id).is_some());

    let before = store.clone();
    let err = mutator
        .create_post(&mut store, new_post("missing", true))
        .expect_err("missing author");
    assert!(matches!(
        err,
        PostGraphError::InvalidReference { field: "author", ref id } if id == "missing"
    ));
    assert_eq!(store, before);
}

#[test]
fn test_create_comment_requires_published_post() {
    let mut store = demo_store();
    let mut mutator = Mutator::new(SequentialIds::new("c"));
    let comment = mutator
        .create_comment(&mut store, new_comment("1", "20"))
        .expect("published post");
    assert_eq!(comment.post, "20");

    let before = store.clone();
    let err = mutator
        .create_comment(&mut store, new_comment("1", "10"))
        .expect_err("unpublished post");
    assert!(matches!(
        err,
        PostGraphError::InvalidReference { field: "post", .. }
    ));
    let err = mutator
        .create_comment(&mut store, new_comment("1", "999"))
        .expect_err("missing post");
    assert!(matches!(
        err,
        PostGraphError::InvalidReference { field: "post", .. }
    ));
    assert_eq!(store, before);
}

#[test]
fn test_create_comment_checks_author_before_post() {
    let mut store = demo_store();
    let mut mutator = Mutator::default();
    let err = mutator
        .create_comment(&mut store, new_comment("ghost", "10"))
        .expect_err("missing author");
    assert!(matches!(
        err,
        PostGraphError::InvalidReference { field: "author", .. }
    ));
}

#[test]
fn test_existing_comments_are_not_revalidated() {
    // demo comments 100..300 sit on unpublished post 30
    let mut store = demo_store();
    let mut mutator = Mutator::default();
    mutator
        .update_user(&mut store, "1", UserPatch::default().name("Andy"))
        .expect("update");
    assert!(store.comment("100").is_some());
    assert!(store.comment("300").is_some());
}

#[test]
fn test_update_user_applies_only_given_fields() {
    let mut store = demo_store();
    let mut mutator = Mutator::default();
    let updated = mutator
        .update_user(&mut store, "1", UserPatch::default().name("Drew"))
        .expect("update");
    assert_eq!(updated.name, "Drew");
    assert_eq!(updated.email, "andrew@example.com");
    assert_eq!(updated.age, Some(27));
    assert_eq!(store.user("1"), Some(&updated));

    let cleared = mutator
        .update_user(&mut store, "1", UserPatch::default().age(None))
        .expect("clear age");
    assert_eq!(cleared.age, None);
    assert_eq!(cleared.name, "Drew");
}

#[test]
fn test_empty_update_leaves_user_alone() {
    let mut store = demo_store();
    let mut mutator = Mutator::default();
    let before = store.clone();
    assert!(UserPatch::default().is_empty());
    let same = mutator
        .update_user(&mut store, "1", UserPatch::default())
        .expect("empty patch");
    assert_eq!(store.user("1"), Some(&same));
    assert_eq!(store, before);

    let err = mutator
        .update_user(&mut store, "404", UserPatch::default())
        .expect_err("missing");
    assert_eq!(err, PostGraphError::not_found(EntityKind::User, "404"));
}

#[test]
fn test_update_user_to_own_email_succeeds() {
    let mut store = demo_store();
    let mut mutator = Mutator::default();
    let updated = mutator
        .update_user(
            &mut store,
            "2",
            UserPatch::default().email("sarah@example.com"),
        )
        .expect("self email");
    assert_eq!(updated.email, "sarah@example.com");
}

#[test]
fn test_update_user_rejects_email_of_other_user() {
    let mut store = demo_store();
    let mut mutator = Mutator::default();
    let before = store.clone();
    let err = mutator
        .update_user(
            &mut store,
            "2",
            UserPatch::default()
                .email("mike@example.com")
                .name("Changed"),
        )
        .expect_err("taken");
    assert_eq!(err, PostGraphError::DuplicateEmail("mike@example.com".into()));
    assert_eq!(store, before);
}

#[test]
fn test_update_missing_user_is_not_found() {
    let mut store = demo_store();
    let mut mutator = Mutator::default();
    let err = mutator
        .update_user(&mut store, "404", UserPatch::default().name("x"))
        .expect_err("missing");
    assert_eq!(err, PostGraphError::not_found(EntityKind::User, "404"));
}

#[test]
fn test_deletes_of_missing_records_are_not_found() {
    let mut store = demo_store();
    let mut mutator = Mutator::default();
    let before = store.clone();
    assert!(matches!(
        mutator.delete_user(&mut store, "9"),
        Err(PostGraphError::NotFound { kind: EntityKind::User, .. })
    ));
    assert!(matches!(
        mutator.delete_post(&mut store, "9"),
        Err(PostGraphError::NotFound { kind: EntityKind::Post, .. })
    ));
    assert!(matches!(
        mutator.delete_comment(&mut store, "9"),
        Err(PostGraphError::NotFound { kind: EntityKind::Comment, .. })
    ));
    assert_eq!(store, before);
}

#[test]
fn test_generated_ids_skip_live_records() {
    let mut store = demo_store();
    let mut mutator = Mutator::new(SequentialIds::new(""));
    let user = mutator
        .create_user(&mut store, NewUser::new("Zoe", "zoe@example.com"))
        .expect("create");
    // "1", "2" and "3" are taken by the demo users
    assert_eq!(user.id, "4");
}

#[test]
fn test_emails_stay_unique_across_mutations() {
    let (mut store, mut mutator) = setup();
    let emails = ["a@x", "b@x", "c@x", "a@x", "b@x"];
    for (idx, email) in emails.iter().enumerate() {
        let _ = mutator.create_user(&mut store, NewUser::new(format!("n{idx}"), *email));
    }
    assert_eq!(store.users().len(), 3);
    let _ = mutator.update_user(&mut store, "id1", UserPatch::default().email("c@x"));
    let _ = mutator.update_user(&mut store, "id2", UserPatch::default().email("d@x"));
    let mut seen: Vec<_> = store.users().iter().map(|u| u.email.clone()).collect();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), store.users().len());
}
