use crate::datastore::tables::{posts, users};
use crate::datastore::userfilters::UserFilters;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An author. Address and company are stored as opaque JSON blobs, the way the placeholder API
/// hands them out.
#[derive(Queryable, Insertable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[table_name = "users"]
pub struct User {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Value>,
}

impl User {
    /// Does this user match all specified filters?
    pub fn matches(&self, filters: &UserFilters) -> bool {
        if let Some(id) = filters.id {
            if id != self.id {
                return false;
            }
        }
        if let Some(username) = &filters.username {
            if username != &self.username {
                return false;
            }
        }
        if let Some(name) = &filters.name {
            if name != &self.name {
                return false;
            }
        }
        true
    }
}

/// A post as stored.
#[derive(Queryable, Insertable, Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[table_name = "posts"]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub user_id: i32,
}

/// A post with its author embedded. This is what `GET /api/posts` returns and what the posts view
/// works on.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthoredPost {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub user_id: i32,
    pub user: User,
}

impl From<(Post, User)> for AuthoredPost {
    fn from((post, user): (Post, User)) -> Self {
        Self {
            id: post.id,
            title: post.title,
            body: post.body,
            user_id: post.user_id,
            user,
        }
    }
}

/// How many rows a reseed wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedSummary {
    pub users: usize,
    pub posts: usize,
}
