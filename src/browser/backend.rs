use crate::datastore::structs::AuthoredPost;
use anyhow::{anyhow, bail, Context};
use async_trait::async_trait;
use awc::Client;
use url::Url;

/// Largest `GET /api/posts` body the client will read.
const MAX_POSTS_BODY: usize = 8 * 1024 * 1024;

/// Where the posts view gets its data. Futures aren't `Send`: everything runs on the session's
/// arbiter.
#[async_trait(?Send)]
pub trait Backend {
    /// All posts with authors embedded, most recent first.
    async fn fetch_posts(&self) -> anyhow::Result<Vec<AuthoredPost>>;
    async fn delete_post(&self, id: i32) -> anyhow::Result<()>;
}

/// Talks to the `/api` endpoints over HTTP.
pub struct HttpBackend {
    client: Client,
    base: Url,
}

impl HttpBackend {
    /// `base` is the server root, e.g. `http://127.0.0.1:8080/`.
    pub fn new(base: Url) -> Self {
        Self {
            client: Client::default(),
            base,
        }
    }

    fn endpoint(&self, path: &str) -> anyhow::Result<Url> {
        self.base
            .join(path)
            .with_context(|| format!("couldn't build URL for {}", path))
    }
}

#[async_trait(?Send)]
impl Backend for HttpBackend {
    async fn fetch_posts(&self) -> anyhow::Result<Vec<AuthoredPost>> {
        let url = self.endpoint("api/posts")?;
        let mut resp = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| anyhow!("GET {} failed: {}", url, e))?;
        if !resp.status().is_success() {
            bail!("GET {} returned {}", url, resp.status());
        }
        resp.json::<Vec<AuthoredPost>>()
            .limit(MAX_POSTS_BODY)
            .await
            .map_err(|e| anyhow!("couldn't decode posts from {}: {}", url, e))
    }

    async fn delete_post(&self, id: i32) -> anyhow::Result<()> {
        let url = self.endpoint(&format!("api/{}", id))?;
        let resp = self
            .client
            .delete(url.as_str())
            .send()
            .await
            .map_err(|e| anyhow!("DELETE {} failed: {}", url, e))?;
        if !resp.status().is_success() {
            bail!("DELETE {} returned {}", url, resp.status());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_rt::test]
    async fn test_endpoints() {
        let backend = HttpBackend {
            client: Client::default(),
            base: Url::parse("http://blog.test:8080/").unwrap(),
        };
        assert_eq!(
            backend.endpoint("api/posts").unwrap().as_str(),
            "http://blog.test:8080/api/posts"
        );
        assert_eq!(
            backend.endpoint("api/12").unwrap().as_str(),
            "http://blog.test:8080/api/12"
        );
    }
}
