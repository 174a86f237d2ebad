//! Replace the database contents with the placeholder API's users and posts.
use crate::datastore::{
    structs::{Post, SeedSummary, User},
    PostStore,
};
use anyhow::{anyhow, bail};
use awc::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use url::Url;

const MAX_SOURCE_BODY: usize = 8 * 1024 * 1024;

/// A user as the placeholder API serves it.
#[derive(Deserialize, Debug)]
pub struct SourceUser {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub address: Option<Value>,
    pub company: Option<Value>,
}

impl From<SourceUser> for User {
    fn from(u: SourceUser) -> Self {
        Self {
            id: u.id,
            name: u.name,
            username: u.username,
            email: u.email,
            phone: u.phone.filter(|s| !s.is_empty()),
            website: u.website.filter(|s| !s.is_empty()),
            address: u.address.filter(|v| !v.is_null()),
            company: u.company.filter(|v| !v.is_null()),
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SourcePost {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub body: String,
}

impl From<SourcePost> for Post {
    fn from(p: SourcePost) -> Self {
        Self {
            id: p.id,
            title: p.title,
            body: p.body,
            user_id: p.user_id,
        }
    }
}

async fn fetch<T: DeserializeOwned>(client: &Client, url: Url) -> anyhow::Result<T> {
    let mut resp = client
        .get(url.as_str())
        .send()
        .await
        .map_err(|e| anyhow!("GET {} failed: {}", url, e))?;
    if !resp.status().is_success() {
        bail!("GET {} returned {}", url, resp.status());
    }
    resp.json::<T>()
        .limit(MAX_SOURCE_BODY)
        .await
        .map_err(|e| anyhow!("couldn't decode {}: {}", url, e))
}

/// Download users and posts from `source` and reseed `store` with them.
pub async fn run<DS: PostStore>(store: &DS, source: &Url) -> anyhow::Result<SeedSummary> {
    let client = Client::default();
    let users: Vec<SourceUser> = fetch(&client, source.join("users")?).await?;
    let posts: Vec<SourcePost> = fetch(&client, source.join("posts")?).await?;
    info!(users = users.len(), posts = posts.len(), %source, "downloaded seed data");
    reseed(store, users, posts).await
}

/// Posts whose author isn't among `users` are dropped rather than failing the whole seed.
pub async fn reseed<DS: PostStore>(
    store: &DS,
    users: Vec<SourceUser>,
    posts: Vec<SourcePost>,
) -> anyhow::Result<SeedSummary> {
    let users: Vec<User> = users.into_iter().map(User::from).collect();
    let (posts, orphans): (Vec<Post>, Vec<Post>) = posts
        .into_iter()
        .map(Post::from)
        .partition(|p| users.iter().any(|u| u.id == p.user_id));
    if !orphans.is_empty() {
        info!(count = orphans.len(), "skipping posts without a known author");
    }
    let summary = store
        .reseed(users, posts)
        .await
        .map_err(|e| e.into_internal())?;
    info!(users = summary.users, posts = summary.posts, "seeded database");
    Ok(summary)
}
