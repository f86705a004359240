use postgraph::{
    Comment, EntityKind, Mutator, Post, SequentialIds, Store, User,
    bench_utils::{DatasetShape, generate_dataset},
    fixtures::demo_store,
    safety::run_integrity_checks,
};

fn user(id: &str) -> User {
    User {
        id: id.into(),
        name: id.to_uppercase(),
        email: format!("{id}@x.com"),
        age: None,
    }
}

fn post(id: &str, author: &str) -> Post {
    Post {
        id: id.into(),
        title: format!("title {id}"),
        body: "body".into(),
        published: true,
        author: author.into(),
    }
}

fn comment(id: &str, author: &str, post: &str) -> Comment {
    Comment {
        id: id.into(),
        text: format!("text {id}"),
        author: author.into(),
        post: post.into(),
    }
}

/// u1 wrote p1 (with c1 from u2) and c2 on u2's p3; p3 also has c3 from u2.
fn graph() -> Store {
    Store::from_parts(
        vec![user("u1"), user("u2")],
        vec![post("p1", "u1"), post("p3", "u2")],
        vec![
            comment("c1", "u2", "p1"),
            comment("c2", "u1", "p3"),
            comment("c3", "u2", "p3"),
        ],
    )
}

fn ids<T, F: Fn(&T) -> &str>(items: &[T], id: F) -> Vec<String> {
    items.iter().map(|item| id(item).to_string()).collect()
}

#[test]
fn test_delete_user_cascades_posts_and_comments() {
    let mut store = graph();
    let mut mutator = Mutator::default();
    let removed = mutator.delete_user(&mut store, "u1").expect("delete");
    assert_eq!(removed, user("u1"));
    assert_eq!(ids(store.users(), |u| u.id.as_str()), vec!["u2"]);
    assert_eq!(ids(store.posts(), |p| p.id.as_str()), vec!["p3"]);
    assert_eq!(ids(store.comments(), |c| c.id.as_str()), vec!["c3"]);
    assert!(!run_integrity_checks(&store).has_issues());
}

#[test]
fn test_delete_post_removes_exactly_its_comments() {
    let mut store = graph();
    let mut mutator = Mutator::default();
    let removed = mutator.delete_post(&mut store, "p3").expect("delete");
    assert_eq!(removed.id, "p3");
    assert_eq!(ids(store.posts(), |p| p.id.as_str()), vec!["p1"]);
    assert_eq!(ids(store.comments(), |c| c.id.as_str()), vec!["c1"]);
    assert_eq!(store.users().len(), 2);
}

#[test]
fn test_delete_comment_touches_nothing_else() {
    let mut store = graph();
    let mut mutator = Mutator::default();
    let removed = mutator.delete_comment(&mut store, "c2").expect("delete");
    assert_eq!(removed, comment("c2", "u1", "p3"));
    assert_eq!(ids(store.comments(), |c| c.id.as_str()), vec!["c1", "c3"]);
    assert_eq!(store.posts().len(), 2);
    assert_eq!(store.users().len(), 2);
}

#[test]
fn test_delete_demo_author_leaves_other_users_content() {
    let mut store = demo_store();
    let mut mutator = Mutator::new(SequentialIds::new("x"));
    mutator.delete_user(&mut store, "1").expect("delete");
    // posts 10 and 20 were Andrew's; comments 100-300 were his on post 30,
    // and comment 400 sat on his post 20
    assert_eq!(ids(store.posts(), |p| p.id.as_str()), vec!["30"]);
    assert!(store.comments().is_empty());
    assert_eq!(store.len(EntityKind::Comment), 0);
    assert_eq!(ids(store.users(), |u| u.id.as_str()), vec!["2", "3"]);
    assert_eq!(store.len(EntityKind::User), 2);
}

#[test]
fn test_cascades_keep_generated_graph_consistent() {
    let mut store = generate_dataset(DatasetShape::new(20, 3, 5), 0xCA5C);
    let mut mutator = Mutator::default();
    for id in ["u3", "u7", "u11"] {
        mutator.delete_user(&mut store, id).expect("delete user");
    }
    mutator.delete_post(&mut store, "p0_1").expect("delete post");
    let report = run_integrity_checks(&store);
    assert!(!report.has_issues(), "{report:?}");
    for gone in ["u3", "u7", "u11"] {
        assert!(store.posts().iter().all(|p| p.author != gone));
        assert!(store.comments().iter().all(|c| c.author != gone));
    }
    assert!(store.comments().iter().all(|c| c.post != "p0_1"));
}
