//! What one page of the filtered post list shows. Recomputed from scratch after every change.
use crate::browser::filters::Filters;
use crate::browser::pagination::{page_bounds, total_pages};
use crate::datastore::structs::AuthoredPost;

/// One page of the filtered post list.
#[derive(Debug, PartialEq)]
pub struct Projection<'a> {
    pub visible: Vec<&'a AuthoredPost>,
    /// The page `visible` was taken from, after clamping.
    pub page: usize,
    pub total_pages: usize,
    pub filtered_count: usize,
}

/// Filter `posts` (keeping their order) and cut out `page`. Pure: same inputs, same output.
pub fn project<'a>(posts: &'a [AuthoredPost], filters: &Filters, page: usize) -> Projection<'a> {
    let filtered: Vec<&AuthoredPost> = posts.iter().filter(|p| filters.matches(p)).collect();
    let total_pages = total_pages(filtered.len());
    let page = page.max(1).min(total_pages);
    let (start, end) = page_bounds(page, filtered.len());
    Projection {
        visible: filtered[start..end].to_vec(),
        page,
        total_pages,
        filtered_count: filtered.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::filters::tests::post;

    fn many(n: i32) -> Vec<AuthoredPost> {
        // Newest first, like the API returns them.
        (1..=n)
            .rev()
            .map(|id| post(id, &format!("post {}", id), "Leanne Graham", "Bret"))
            .collect()
    }

    fn ids(projection: &Projection<'_>) -> Vec<i32> {
        projection.visible.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_hello_filter() {
        let posts = vec![
            post(1, "Hello", "Leanne", "Bret"),
            post(2, "World", "Ervin", "Antonette"),
        ];
        let filters = Filters {
            title: "hello".to_owned(),
            ..Default::default()
        };
        let projection = project(&posts, &filters, 1);
        assert_eq!(ids(&projection), vec![1]);
        assert_eq!(projection.total_pages, 1);
        assert_eq!(projection.filtered_count, 1);
    }

    #[test]
    fn test_pages_are_contiguous_slices() {
        let posts = many(19);
        let filters = Filters::default();
        assert_eq!(ids(&project(&posts, &filters, 1)), (11..=19).rev().collect::<Vec<_>>());
        assert_eq!(ids(&project(&posts, &filters, 2)), (2..=10).rev().collect::<Vec<_>>());
        let last = project(&posts, &filters, 3);
        assert_eq!(ids(&last), vec![1]);
        assert_eq!(last.total_pages, 3);
    }

    #[test]
    fn test_out_of_range_page_is_clamped() {
        let posts = many(18);
        let projection = project(&posts, &Filters::default(), 3);
        assert_eq!(projection.page, 2);
        assert_eq!(projection.visible.len(), 9);

        let nothing = Filters {
            title: "no such post".to_owned(),
            ..Default::default()
        };
        let projection = project(&posts, &nothing, 4);
        assert_eq!(projection.page, 1);
        assert_eq!(projection.total_pages, 1);
        assert!(projection.visible.is_empty());
    }

    #[test]
    fn test_projection_is_repeatable() {
        let posts = many(30);
        let filters = Filters {
            title: "1".to_owned(),
            ..Default::default()
        };
        assert_eq!(project(&posts, &filters, 2), project(&posts, &filters, 2));
    }
}
