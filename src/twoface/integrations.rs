//! Lets handlers return `Fallible<T>` directly.

use crate::twoface::TfError;
use actix_web::{
    http::{header, StatusCode},
    HttpResponse,
};
use serde::Serialize;
use tracing::error;

// The internal half is logged, the external half is sent as `{"error": "<Cause>: <text>"}`.
impl actix_web::ResponseError for TfError {
    fn status_code(&self) -> StatusCode {
        self.external.cause.into()
    }

    fn error_response(&self) -> HttpResponse {
        error!(cause = %self.external.cause, "{:#}", self.internal);
        let resp = serde_json::to_string(&ErrBody {
            error: self.to_string(),
        })
        .unwrap_or_else(|e| {
            error!("Serde error: {}", e);
            "{\"error\": \"ServerError: Internal server error\"}".to_owned()
        });
        HttpResponse::build(self.status_code())
            .header(header::CONTENT_TYPE, "application/json")
            .body(resp)
    }
}

#[derive(Serialize)]
struct ErrBody {
    error: String,
}

#[cfg(test)]
mod tests {
    use crate::twoface::*;
    use actix_web::{http::StatusCode, test, web, App};
    use anyhow::anyhow;

    #[actix_rt::test]
    async fn test_error_body_hides_internal_error() {
        async fn index() -> Fallible<web::Json<String>> {
            Err::<String, _>(anyhow!("connection refused to db.internal:5432"))
                .describe_err(ExternalError {
                    cause: Cause::NotFound,
                    text: "Post not found",
                })
                .map(web::Json)
        }

        let mut app =
            test::init_service(App::new().service(web::resource("/").route(web::get().to(index))))
                .await;

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&mut app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body = test::read_body(resp).await;
        assert_eq!(&body[..], &b"{\"error\":\"NotFound: Post not found\"}"[..]);
    }
}
