use crate::browser::backend::Backend;
use crate::browser::delete::DeleteWorkflow;
use crate::browser::filters::{FilterField, FilterState};
use crate::browser::pagination::{page_window, Pagination};
use crate::browser::projection::{project, Projection};
use crate::browser::view::{PageView, PostCard};
use crate::datastore::structs::AuthoredPost;
use actix::prelude::*;
use std::collections::HashSet;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const FETCH_FAILED: &str = "Failed to fetch posts";
pub const DELETE_FAILED: &str = "Failed to delete post";

/// The posts view: the fetched posts plus filter, page, delete and per-post state. Runs on one
/// arbiter, so every transition happens in response to a single message or timer.
pub struct PostsSession {
    backend: Rc<dyn Backend>,
    debounce_delay: Duration,
    /// Outstanding debounce timer. At most one.
    debounce: Option<SpawnHandle>,
    posts: Vec<AuthoredPost>,
    filters: FilterState,
    page: Pagination,
    deletion: DeleteWorkflow,
    error: Option<String>,
    expanded: HashSet<i32>,
    /// Post whose author popup is open.
    author_of: Option<i32>,
}

impl PostsSession {
    pub fn new(backend: Rc<dyn Backend>, debounce_delay: Duration) -> Self {
        Self {
            backend,
            debounce_delay,
            debounce: None,
            posts: Vec::new(),
            filters: FilterState::default(),
            page: Pagination::default(),
            deletion: DeleteWorkflow::default(),
            error: None,
            expanded: HashSet::new(),
            author_of: None,
        }
    }

    fn projection(&self) -> Projection<'_> {
        project(&self.posts, self.filters.active(), self.page.current())
    }

    fn clamp_page(&mut self) {
        let total = self.projection().total_pages;
        self.page.clamp_to(total);
    }

    fn commit_filters(&mut self) {
        self.filters.commit();
        self.page.reset();
        debug!(filters = ?self.filters.active(), "filters applied");
    }

    fn cancel_debounce(&mut self, ctx: &mut Context<Self>) {
        if let Some(handle) = self.debounce.take() {
            ctx.cancel_future(handle);
        }
    }

    fn finish_load(&mut self, result: anyhow::Result<Vec<AuthoredPost>>) {
        match result {
            Ok(posts) => {
                info!(count = posts.len(), "fetched posts");
                self.posts = posts;
                self.error = None;
                let ids: HashSet<i32> = self.posts.iter().map(|p| p.id).collect();
                self.expanded.retain(|id| ids.contains(id));
                if self.author_of.map_or(false, |id| !ids.contains(&id)) {
                    self.author_of = None;
                }
                self.clamp_page();
            }
            Err(e) => {
                warn!("{:#}", e);
                self.error = Some(FETCH_FAILED.to_owned());
            }
        }
    }

    fn finish_delete(&mut self, post_id: i32, result: anyhow::Result<()>) {
        self.deletion.finish(post_id);
        match result {
            Ok(()) => {
                info!(post_id, "deleted post");
                self.posts.retain(|p| p.id != post_id);
                self.expanded.remove(&post_id);
                if self.author_of == Some(post_id) {
                    self.author_of = None;
                }
                self.clamp_page();
            }
            Err(e) => {
                warn!(post_id, "{:#}", e);
                self.error = Some(DELETE_FAILED.to_owned());
            }
        }
    }

    fn view(&self) -> PageView {
        let projection = self.projection();
        let author = self.author_of.and_then(|id| {
            self.posts
                .iter()
                .find(|p| p.id == id)
                .map(|p| p.user.clone())
        });
        PageView {
            cards: projection
                .visible
                .iter()
                .map(|&post| PostCard {
                    post: post.clone(),
                    expanded: self.expanded.contains(&post.id),
                })
                .collect(),
            page: projection.page,
            total_pages: projection.total_pages,
            filtered_count: projection.filtered_count,
            page_window: page_window(projection.page, projection.total_pages).collect(),
            pending_filters: self.filters.pending().clone(),
            active_filters: self.filters.active().clone(),
            filter_commits: self.filters.commits(),
            delete: self.deletion.state(),
            author,
            error: self.error.clone(),
        }
    }
}

impl Actor for PostsSession {
    type Context = Context<Self>;
}

/// Fetch every post, replacing what the session holds.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Load;

impl Handler<Load> for PostsSession {
    type Result = ResponseActFuture<Self, ()>;

    fn handle(&mut self, _: Load, _: &mut Context<Self>) -> Self::Result {
        let backend = Rc::clone(&self.backend);
        let fetch = async move { backend.fetch_posts().await };
        Box::pin(
            fetch
                .into_actor(self)
                .map(|result, act, _ctx| act.finish_load(result)),
        )
    }
}

/// A keystroke in one of the filter boxes. Applied once no edit has arrived for the debounce
/// delay.
#[derive(Message)]
#[rtype(result = "()")]
pub struct EditFilter {
    pub field: FilterField,
    pub value: String,
}

impl Handler<EditFilter> for PostsSession {
    type Result = ();

    fn handle(&mut self, msg: EditFilter, ctx: &mut Context<Self>) {
        self.filters.edit(msg.field, msg.value);
        self.cancel_debounce(ctx);
        let handle = ctx.run_later(self.debounce_delay, |act, _ctx| {
            act.debounce = None;
            act.commit_filters();
        });
        self.debounce = Some(handle);
    }
}

/// Apply the pending filters now.
#[derive(Message)]
#[rtype(result = "()")]
pub struct ApplyFilters;

impl Handler<ApplyFilters> for PostsSession {
    type Result = ();

    fn handle(&mut self, _: ApplyFilters, ctx: &mut Context<Self>) {
        self.cancel_debounce(ctx);
        self.commit_filters();
    }
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct GoToPage(pub usize);

impl Handler<GoToPage> for PostsSession {
    type Result = ();

    fn handle(&mut self, GoToPage(page): GoToPage, _: &mut Context<Self>) {
        let total = self.projection().total_pages;
        self.page.go_to(page, total);
    }
}

/// Move forwards (positive) or backwards from whatever page the session is on now.
#[derive(Message)]
#[rtype(result = "()")]
pub struct StepPage(pub isize);

impl Handler<StepPage> for PostsSession {
    type Result = ();

    fn handle(&mut self, StepPage(step): StepPage, _: &mut Context<Self>) {
        let (page, total) = {
            let projection = self.projection();
            (projection.page, projection.total_pages)
        };
        let target = (page as isize + step).max(1) as usize;
        self.page.go_to(target, total);
    }
}

/// Open the confirmation prompt for a post.
#[derive(Message)]
#[rtype(result = "()")]
pub struct RequestDelete(pub i32);

impl Handler<RequestDelete> for PostsSession {
    type Result = ();

    fn handle(&mut self, RequestDelete(post_id): RequestDelete, _: &mut Context<Self>) {
        self.deletion.request(post_id);
    }
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct CancelDelete;

impl Handler<CancelDelete> for PostsSession {
    type Result = ();

    fn handle(&mut self, _: CancelDelete, _: &mut Context<Self>) {
        self.deletion.cancel();
    }
}

/// Close the prompt and delete its post. Resolves once the request has completed.
#[derive(Message)]
#[rtype(result = "()")]
pub struct ConfirmDelete;

impl Handler<ConfirmDelete> for PostsSession {
    type Result = ResponseActFuture<Self, ()>;

    fn handle(&mut self, _: ConfirmDelete, _: &mut Context<Self>) -> Self::Result {
        let post_id = match self.deletion.confirm() {
            Some(post_id) => post_id,
            None => return Box::pin(async {}.into_actor(self)),
        };
        let backend = Rc::clone(&self.backend);
        let delete = async move { backend.delete_post(post_id).await };
        Box::pin(
            delete
                .into_actor(self)
                .map(move |result, act, _ctx| act.finish_delete(post_id, result)),
        )
    }
}

/// Show or hide a post's body.
#[derive(Message)]
#[rtype(result = "()")]
pub struct ToggleBody(pub i32);

impl Handler<ToggleBody> for PostsSession {
    type Result = ();

    fn handle(&mut self, ToggleBody(post_id): ToggleBody, _: &mut Context<Self>) {
        if !self.expanded.remove(&post_id) {
            self.expanded.insert(post_id);
        }
    }
}

/// Open the author popup for a post. `None` closes it.
#[derive(Message)]
#[rtype(result = "()")]
pub struct ShowAuthor(pub Option<i32>);

impl Handler<ShowAuthor> for PostsSession {
    type Result = ();

    fn handle(&mut self, ShowAuthor(post_id): ShowAuthor, _: &mut Context<Self>) {
        self.author_of = post_id.filter(|id| self.posts.iter().any(|p| p.id == *id));
    }
}

#[derive(Message)]
#[rtype(result = "PageView")]
pub struct GetView;

impl Handler<GetView> for PostsSession {
    type Result = PageView;

    fn handle(&mut self, _: GetView, _: &mut Context<Self>) -> PageView {
        self.view()
    }
}
