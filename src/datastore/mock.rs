use crate::datastore::{
    structs::{AuthoredPost, Post, SeedSummary, User},
    userfilters::UserFilters,
    PostStore,
};
use crate::twoface::{Cause, ExternalError, Fallible, TfError};
use anyhow::anyhow;
use async_trait::async_trait;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

type Store<T> = Arc<Mutex<Vec<T>>>;

/// A mock implementation of datastore::PostStore
#[derive(Clone, Default, Debug)]
pub struct Client {
    posts: Store<Post>,
    users: Store<User>,
    broken: Arc<AtomicBool>,
}

impl Client {
    pub fn with_data(users: Vec<User>, posts: Vec<Post>) -> Self {
        Self {
            posts: Arc::new(Mutex::new(posts)),
            users: Arc::new(Mutex::new(users)),
            ..Default::default()
        }
    }

    /// Make every subsequent call fail like a lost database connection would.
    pub fn break_connection(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }

    pub fn post_ids(&self) -> Vec<i32> {
        self.posts.lock().unwrap().iter().map(|p| p.id).collect()
    }

    fn check(&self, text: &'static str) -> Fallible<()> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(TfError::new(
                anyhow!("mock connection is broken"),
                ExternalError {
                    cause: Cause::ServerError,
                    text,
                },
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl PostStore for Client {
    async fn list_posts(&self) -> Fallible<Vec<AuthoredPost>> {
        self.check("Failed to fetch posts")?;
        let users = self.users.lock().unwrap();
        let mut posts: Vec<AuthoredPost> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter_map(|post| {
                let author = users.iter().find(|u| u.id == post.user_id)?;
                Some(AuthoredPost::from((post.clone(), author.clone())))
            })
            .collect();
        posts.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(posts)
    }

    async fn delete_post(&self, id: i32) -> Fallible<()> {
        self.check("Failed to delete post")?;
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(TfError::not_found(
                anyhow!("no post with id {}", id),
                "Post not found",
            ));
        }
        Ok(())
    }

    async fn find_user(&self, id: i32) -> Fallible<Option<User>> {
        self.check("Failed to fetch user(s)")?;
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn list_users(&self, filters: UserFilters) -> Fallible<Vec<User>> {
        self.check("Failed to fetch user(s)")?;
        let users = self.users.lock().unwrap();
        Ok(users.iter().filter(|u| u.matches(&filters)).cloned().collect())
    }

    async fn reseed(&self, users: Vec<User>, posts: Vec<Post>) -> Fallible<SeedSummary> {
        self.check("Failed to seed database")?;
        let summary = SeedSummary {
            users: users.len(),
            posts: posts.len(),
        };
        *self.users.lock().unwrap() = users;
        *self.posts.lock().unwrap() = posts;
        Ok(summary)
    }
}
