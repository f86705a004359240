//! Named operations as data, for callers that speak JSON.
//!
//! An [`Operation`] is tagged by its `op` field, e.g.
//! `{"op":"createPost","title":"T","body":"B","published":true,"author":"1"}`.
//! [`execute`] runs it against an explicit store and returns the affected
//! entity (or entity list) as a JSON value.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    errors::PostGraphError,
    model::{NewComment, NewPost, NewUser, UserPatch},
    mutation::Mutator,
    store::Store,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Operation {
    ListUsers {
        #[serde(default)]
        query: Option<String>,
    },
    ListPosts {
        #[serde(default)]
        query: Option<String>,
    },
    ListComments {
        #[serde(default)]
        query: Option<String>,
    },
    CreateUser(NewUser),
    UpdateUser {
        id: String,
        data: UserPatch,
    },
    DeleteUser {
        id: String,
    },
    CreatePost(NewPost),
    DeletePost {
        id: String,
    },
    CreateComment(NewComment),
    DeleteComment {
        id: String,
    },
    UserPosts {
        #[serde(alias = "userId")]
        id: String,
    },
    UserComments {
        #[serde(alias = "userId")]
        id: String,
    },
    PostAuthor {
        #[serde(alias = "postId")]
        id: String,
    },
    PostComments {
        #[serde(alias = "postId")]
        id: String,
    },
    CommentAuthor {
        #[serde(alias = "commentId")]
        id: String,
    },
    CommentPost {
        #[serde(alias = "commentId")]
        id: String,
    },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::ListUsers { .. } => "listUsers",
            Operation::ListPosts { .. } => "listPosts",
            Operation::ListComments { .. } => "listComments",
            Operation::CreateUser(_) => "createUser",
            Operation::UpdateUser { .. } => "updateUser",
            Operation::DeleteUser { .. } => "deleteUser",
            Operation::CreatePost(_) => "createPost",
            Operation::DeletePost { .. } => "deletePost",
            Operation::CreateComment(_) => "createComment",
            Operation::DeleteComment { .. } => "deleteComment",
            Operation::UserPosts { .. } => "userPosts",
            Operation::UserComments { .. } => "userComments",
            Operation::PostAuthor { .. } => "postAuthor",
            Operation::PostComments { .. } => "postComments",
            Operation::CommentAuthor { .. } => "commentAuthor",
            Operation::CommentPost { .. } => "commentPost",
        }
    }

    pub fn is_read_only(&self) -> bool {
        !matches!(
            self,
            Operation::CreateUser(_)
                | Operation::UpdateUser { .. }
                | Operation::DeleteUser { .. }
                | Operation::CreatePost(_)
                | Operation::DeletePost { .. }
                | Operation::CreateComment(_)
                | Operation::DeleteComment { .. }
        )
    }
}

pub fn parse_operation(line: &str) -> Result<Operation, PostGraphError> {
    serde_json::from_str(line).map_err(|e| PostGraphError::invalid_input(e.to_string()))
}

pub fn execute(
    store: &mut Store,
    mutator: &mut Mutator,
    operation: Operation,
) -> Result<Value, PostGraphError> {
    tracing::debug!(op = operation.name(), "executing operation");
    match operation {
        Operation::CreateUser(input) => to_json(mutator.create_user(store, input)?),
        Operation::UpdateUser { id, data } => to_json(mutator.update_user(store, &id, data)?),
        Operation::DeleteUser { id } => to_json(mutator.delete_user(store, &id)?),
        Operation::CreatePost(input) => to_json(mutator.create_post(store, input)?),
        Operation::DeletePost { id } => to_json(mutator.delete_post(store, &id)?),
        Operation::CreateComment(input) => to_json(mutator.create_comment(store, input)?),
        Operation::DeleteComment { id } => to_json(mutator.delete_comment(store, &id)?),
        read => execute_read(store, &read),
    }
}

/// Runs a read-only operation. Mutating operations are rejected with
/// [`PostGraphError::InvalidInput`].
pub fn execute_read(store: &Store, operation: &Operation) -> Result<Value, PostGraphError> {
    let query = store.query();
    let relations = store.relations();
    match operation {
        Operation::ListUsers { query: q } => to_json(query.list_users(q.as_deref())),
        Operation::ListPosts { query: q } => to_json(query.list_posts(q.as_deref())),
        Operation::ListComments { query: q } => to_json(query.list_comments(q.as_deref())),
        Operation::UserPosts { id } => to_json(relations.user_posts(id)?),
        Operation::UserComments { id } => to_json(relations.user_comments(id)?),
        Operation::PostAuthor { id } => to_json(relations.post_author(id)?),
        Operation::PostComments { id } => to_json(relations.post_comments(id)?),
        Operation::CommentAuthor { id } => to_json(relations.comment_author(id)?),
        Operation::CommentPost { id } => to_json(relations.comment_post(id)?),
        other => Err(PostGraphError::invalid_input(format!(
            "{} mutates the store",
            other.name()
        ))),
    }
}

fn to_json<T: Serialize>(value: T) -> Result<Value, PostGraphError> {
    serde_json::to_value(value).map_err(|e| PostGraphError::invalid_input(e.to_string()))
}
