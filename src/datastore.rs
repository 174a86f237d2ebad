#[cfg(test)]
pub mod mock;
pub mod postgres;
pub mod structs;
pub mod tables;
pub mod userfilters;

use crate::datastore::structs::{AuthoredPost, Post, SeedSummary, User};
use crate::twoface::Fallible;
use async_trait::async_trait;
use userfilters::UserFilters;

#[async_trait]
/// The interface for storing posts and their authors.
pub trait PostStore: Send + Sync {
    /// Every post with its author embedded, most recent (highest id) first.
    async fn list_posts(&self) -> Fallible<Vec<AuthoredPost>>;
    /// Fails with `Cause::NotFound` if there is no such post.
    async fn delete_post(&self, id: i32) -> Fallible<()>;
    async fn find_user(&self, id: i32) -> Fallible<Option<User>>;
    async fn list_users(&self, filters: UserFilters) -> Fallible<Vec<User>>;
    /// Replace everything in the store with the given users and posts.
    async fn reseed(&self, users: Vec<User>, posts: Vec<Post>) -> Fallible<SeedSummary>;
}
