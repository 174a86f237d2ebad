use crate::browser::delete::DeleteState;
use crate::browser::filters::{FilterField, Filters};
use crate::datastore::structs::{AuthoredPost, User};
use actix::MessageResponse;
use serde_json::Value;
use std::fmt;

/// A visible post plus its per-post view state.
#[derive(Debug, Clone, PartialEq)]
pub struct PostCard {
    pub post: AuthoredPost,
    pub expanded: bool,
}

/// Everything needed to draw the posts view at one instant.
#[derive(Debug, Clone, MessageResponse)]
pub struct PageView {
    pub cards: Vec<PostCard>,
    pub page: usize,
    pub total_pages: usize,
    pub filtered_count: usize,
    pub page_window: Vec<usize>,
    pub pending_filters: Filters,
    pub active_filters: Filters,
    pub filter_commits: u64,
    pub delete: DeleteState,
    pub author: Option<User>,
    pub error: Option<String>,
}

impl PageView {
    pub fn confirming_delete(&self) -> Option<i32> {
        match self.delete {
            DeleteState::PendingConfirmation(id) => Some(id),
            _ => None,
        }
    }
}

/// `https://` is assumed when the website has no scheme.
pub fn website_url(website: &str) -> String {
    if website.starts_with("http") {
        website.to_owned()
    } else {
        format!("https://{}", website)
    }
}

pub fn company_label(company: &Value) -> String {
    match company.get("name").and_then(Value::as_str) {
        Some(name) if !name.is_empty() => name.to_owned(),
        _ => company.to_string(),
    }
}

pub fn address_label(address: &Value) -> String {
    let field = |key: &str| address.get(key).and_then(Value::as_str).unwrap_or_default();
    match field("street") {
        "" => address.to_string(),
        street => format!("{}, {}", street, field("city")),
    }
}

const FILTER_LABELS: &[(FilterField, &str)] = &[
    (FilterField::Title, "title"),
    (FilterField::AuthorName, "author"),
    (FilterField::AuthorHandle, "handle"),
];

fn write_filter(f: &mut fmt::Formatter<'_>, label: &str, active: &str, pending: &str) -> fmt::Result {
    write!(f, "  {:<7}{:?}", label, active)?;
    if active != pending {
        write!(f, " (typing {:?})", pending)?;
    }
    writeln!(f)
}

impl fmt::Display for PageView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(error) = &self.error {
            writeln!(f, "!! {}", error)?;
        }
        writeln!(
            f,
            "Posts: page {} of {}, {} matching",
            self.page, self.total_pages, self.filtered_count
        )?;
        if self.active_filters.is_empty() && self.pending_filters.is_empty() {
            writeln!(f, "  no filters")?;
        } else {
            for &(field, label) in FILTER_LABELS {
                let active = self.active_filters.get(field);
                let pending = self.pending_filters.get(field);
                write_filter(f, label, active, pending)?;
            }
        }
        if self.cards.is_empty() {
            writeln!(f, "  (no posts)")?;
        }
        for card in &self.cards {
            let post = &card.post;
            writeln!(
                f,
                "  [{}] {} (user {}: {} @{})",
                post.id, post.title, post.user_id, post.user.name, post.user.username
            )?;
            if card.expanded {
                for line in post.body.lines() {
                    writeln!(f, "        {}", line)?;
                }
            }
        }
        let buttons: Vec<String> = self
            .page_window
            .iter()
            .map(|&n| {
                if n == self.page {
                    format!("[{}]", n)
                } else {
                    n.to_string()
                }
            })
            .collect();
        writeln!(f, "Pages: {}", buttons.join(" "))?;
        if let Some(id) = self.confirming_delete() {
            writeln!(f, "Are you sure you want to delete post {}? (yes/no)", id)?;
        } else if let DeleteState::Deleting(id) = self.delete {
            writeln!(f, "Deleting post {}...", id)?;
        }
        if let Some(user) = &self.author {
            writeln!(f, "-- {} (@{})", user.name, user.username)?;
            writeln!(f, "   {}", user.email)?;
            if let Some(phone) = &user.phone {
                writeln!(f, "   {}", phone)?;
            }
            if let Some(company) = &user.company {
                writeln!(f, "   Company: {}", company_label(company))?;
            }
            if let Some(address) = &user.address {
                writeln!(f, "   Address: {}", address_label(address))?;
            }
            if let Some(website) = &user.website {
                writeln!(f, "   {}", website_url(website))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
impl PageView {
    pub fn post_ids(&self) -> Vec<i32> {
        self.cards.iter().map(|c| c.post.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::filters::tests::post;
    use serde_json::json;

    #[test]
    fn test_author_labels() {
        assert_eq!(website_url("hildegard.org"), "https://hildegard.org");
        assert_eq!(website_url("http://anastasia.net"), "http://anastasia.net");
        assert_eq!(
            company_label(&json!({"name": "Romaguera-Crona", "bs": "harness"})),
            "Romaguera-Crona"
        );
        assert_eq!(company_label(&json!({"bs": "harness"})), "{\"bs\":\"harness\"}");
        assert_eq!(
            address_label(&json!({"street": "Kulas Light", "city": "Gwenborough"})),
            "Kulas Light, Gwenborough"
        );
        assert_eq!(address_label(&json!("somewhere")), "\"somewhere\"");
    }

    #[test]
    fn test_render() {
        let mut hello = post(1, "Hello", "Leanne Graham", "Bret");
        hello.user.website = Some("hildegard.org".to_owned());
        let view = PageView {
            cards: vec![PostCard {
                post: hello.clone(),
                expanded: true,
            }],
            page: 2,
            total_pages: 3,
            filtered_count: 19,
            page_window: vec![1, 2, 3],
            pending_filters: Filters {
                title: "hel".to_owned(),
                ..Default::default()
            },
            active_filters: Filters::default(),
            filter_commits: 0,
            delete: DeleteState::PendingConfirmation(1),
            author: Some(hello.user),
            error: Some("Failed to delete post".to_owned()),
        };
        let text = view.to_string();
        assert!(text.starts_with("!! Failed to delete post\n"));
        assert!(text.contains("page 2 of 3, 19 matching"));
        assert!(text.contains("(typing \"hel\")"));
        assert!(text.contains("[1] Hello (user 1: Leanne Graham @Bret)"));
        assert!(text.contains("        body 1"));
        assert!(text.contains("Pages: 1 [2] 3"));
        assert!(text.contains("delete post 1? (yes/no)"));
        assert!(text.contains("https://hildegard.org"));
        assert_eq!(view.confirming_delete(), Some(1));
        assert_eq!(view.post_ids(), vec![1]);
    }

    #[test]
    fn test_render_without_filters() {
        let view = PageView {
            cards: Vec::new(),
            page: 1,
            total_pages: 1,
            filtered_count: 0,
            page_window: vec![1],
            pending_filters: Filters::default(),
            active_filters: Filters::default(),
            filter_commits: 0,
            delete: DeleteState::Deleting(4),
            author: None,
            error: None,
        };
        let text = view.to_string();
        assert!(text.contains("  no filters\n"));
        assert!(!text.contains("title"));
        assert!(text.contains("(no posts)"));
        assert!(text.contains("Deleting post 4..."));
        assert!(!text.contains("yes/no"));
    }
}
