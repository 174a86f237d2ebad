//! Substring filters over posts and their authors. An empty filter matches everything; set
//! filters are ANDed together.
use crate::datastore::structs::AuthoredPost;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Title,
    AuthorName,
    AuthorHandle,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub title: String,
    pub author_name: String,
    pub author_handle: String,
}

impl Filters {
    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Title => &self.title,
            FilterField::AuthorName => &self.author_name,
            FilterField::AuthorHandle => &self.author_handle,
        }
    }

    fn get_mut(&mut self, field: FilterField) -> &mut String {
        match field {
            FilterField::Title => &mut self.title,
            FilterField::AuthorName => &mut self.author_name,
            FilterField::AuthorHandle => &mut self.author_handle,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.author_name.is_empty() && self.author_handle.is_empty()
    }

    /// Does this post match all non-empty filters? Comparison is case-insensitive.
    pub fn matches(&self, post: &AuthoredPost) -> bool {
        contains_ignore_case(&post.title, &self.title)
            && contains_ignore_case(&post.user.name, &self.author_name)
            && contains_ignore_case(&post.user.username, &self.author_handle)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// What the user is typing (`pending`) and what the list is currently filtered by (`active`).
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    pending: Filters,
    active: Filters,
    commits: u64,
}

impl FilterState {
    /// Update a pending value. The visible list is unaffected until `commit`.
    pub fn edit(&mut self, field: FilterField, value: String) {
        *self.pending.get_mut(field) = value;
    }

    /// Make the pending values active.
    pub fn commit(&mut self) {
        self.active = self.pending.clone();
        self.commits += 1;
    }

    pub fn pending(&self) -> &Filters {
        &self.pending
    }

    pub fn active(&self) -> &Filters {
        &self.active
    }

    /// How many times `commit` has run.
    pub fn commits(&self) -> u64 {
        self.commits
    }
}
