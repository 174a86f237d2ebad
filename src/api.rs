use crate::datastore::PostStore;
use crate::metrics;
use crate::twoface::Fallible;
use actix_web::web;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

pub mod posts;
pub mod users;

/// App data shared by every handler.
pub struct State<DS> {
    pub ds: Arc<DS>,
}

impl<DS> Clone for State<DS> {
    fn clone(&self) -> Self {
        Self {
            ds: Arc::clone(&self.ds),
        }
    }
}

/// Routes, relative to the `/api` scope.
pub fn configure<DS: PostStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/posts").route(web::get().to(posts::list_posts::<DS>)))
        .service(web::resource("/users").route(web::get().to(users::lookup_users::<DS>)))
        .service(web::resource("/{id}").route(web::delete().to(posts::delete_post::<DS>)));
}

/// Execute the closure, then log its operational metrics, e.g. time taken, whether it returned Ok/Err, etc.
async fn observe<F, Fut, R>(name: &'static str, f: F) -> Fallible<R>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Fallible<R>>,
{
    let start = Instant::now();
    let return_val = f().await;
    let duration = start.elapsed();
    metrics::HANDLER_SECS
        .with_label_values(&[name])
        .observe(duration.as_secs_f64());
    metrics::RESPONSES
        .with_label_values(&[name, variant_name(&return_val)])
        .inc();
    return_val
}

fn variant_name<T, E>(result: &Result<T, E>) -> &'static str {
    if result.is_ok() {
        "ok"
    } else {
        "err"
    }
}
