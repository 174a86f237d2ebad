use crate::api::{observe, State};
use crate::datastore::{structs::AuthoredPost, PostStore};
use crate::twoface::Fallible;
use actix_web::{web, HttpResponse};

/// Every post with its author, most recent first. The posts view filters and paginates
/// client-side, so there are no query parameters.
pub async fn list_posts<DS: PostStore>(
    state: web::Data<State<DS>>,
) -> Fallible<web::Json<Vec<AuthoredPost>>> {
    observe("list_posts", || async {
        let posts = state.ds.list_posts().await?;
        Ok(web::Json(posts))
    })
    .await
}

/// Responds 204 with no body. Deleting a missing (or already deleted) post is a 404.
pub async fn delete_post<DS: PostStore>(
    state: web::Data<State<DS>>,
    id: web::Path<i32>,
) -> Fallible<HttpResponse> {
    observe("delete_post", || async {
        state.ds.delete_post(*id).await?;
        Ok(HttpResponse::NoContent().finish())
    })
    .await
}

#[cfg(test)]
mod tests {
    use crate::api::{self, fixtures, State};
    use crate::datastore::mock;
    use actix_web::{http::StatusCode, test, web, App};
    use serde_json::Value;
    use std::sync::Arc;

    #[actix_rt::test]
    async fn test_list_posts_newest_first_with_authors() {
        let store = fixtures::store();
        let mut app = test::init_service(
            App::new()
                .data(State {
                    ds: Arc::new(store),
                })
                .service(web::scope("/api").configure(api::configure::<mock::Client>)),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/posts").to_request();
        let body: Value = test::read_response_json(&mut app, req).await;
        let posts = body.as_array().unwrap();
        let ids: Vec<i64> = posts.iter().map(|p| p["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![4, 3, 2, 1]);
        assert_eq!(posts[0]["userId"], 2);
        assert_eq!(posts[0]["user"]["username"], "Antonette");
        assert_eq!(posts[1]["user"]["name"], "Leanne Graham");
    }

    #[actix_rt::test]
    async fn test_delete_post_then_delete_again() {
        let store = fixtures::store();
        let mut app = test::init_service(
            App::new()
                .data(State {
                    ds: Arc::new(store.clone()),
                })
                .service(web::scope("/api").configure(api::configure::<mock::Client>)),
        )
        .await;

        let req = test::TestRequest::delete().uri("/api/3").to_request();
        let resp = test::call_service(&mut app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert!(test::read_body(resp).await.is_empty());
        assert_eq!(store.post_ids(), vec![1, 2, 4]);

        // Same id again: treated like any other missing post.
        let req = test::TestRequest::delete().uri("/api/3").to_request();
        let resp = test::call_service(&mut app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = test::read_body(resp).await;
        assert_eq!(&body[..], &b"{\"error\":\"NotFound: Post not found\"}"[..]);
    }

    #[actix_rt::test]
    async fn test_storage_failures_are_500s() {
        let store = fixtures::store();
        store.break_connection();
        let mut app = test::init_service(
            App::new()
                .data(State {
                    ds: Arc::new(store.clone()),
                })
                .service(web::scope("/api").configure(api::configure::<mock::Client>)),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/posts").to_request();
        let resp = test::call_service(&mut app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = test::read_body(resp).await;
        assert_eq!(
            &body[..],
            &b"{\"error\":\"ServerError: Failed to fetch posts\"}"[..]
        );

        let req = test::TestRequest::delete().uri("/api/1").to_request();
        let resp = test::call_service(&mut app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(store.post_ids(), vec![1, 2, 3, 4]);
    }

    #[actix_rt::test]
    async fn test_wrong_method_is_rejected() {
        let mut app = test::init_service(
            App::new()
                .data(State {
                    ds: Arc::new(fixtures::store()),
                })
                .service(web::scope("/api").configure(api::configure::<mock::Client>)),
        )
        .await;

        let req = test::TestRequest::post().uri("/api/posts").to_request();
        let resp = test::call_service(&mut app, req).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
