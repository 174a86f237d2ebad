use crate::datastore::{
    postgres::{errors::BlockingResp, PostgresStore},
    structs::{AuthoredPost, Post, SeedSummary, User},
    tables::{posts, users},
    userfilters::UserFilters,
    PostStore,
};
use crate::twoface::{Cause, ExternalError, Fallible, TfError};
use actix_web::web::block;
use anyhow::anyhow;
use async_trait::async_trait;
use diesel::{
    expression::BoxableExpression,
    pg::Pg,
    query_dsl::{QueryDsl, RunQueryDsl},
    result::Error as DieselError,
    sql_types::Bool,
    Connection, ExpressionMethods, OptionalExtension,
};
use tracing::{debug, info};

const FETCH_POSTS_FAILED: ExternalError = ExternalError {
    cause: Cause::ServerError,
    text: "Failed to fetch posts",
};
const DELETE_POST_FAILED: ExternalError = ExternalError {
    cause: Cause::ServerError,
    text: "Failed to delete post",
};
const FETCH_USERS_FAILED: ExternalError = ExternalError {
    cause: Cause::ServerError,
    text: "Failed to fetch user(s)",
};
const SEED_FAILED: ExternalError = ExternalError {
    cause: Cause::ServerError,
    text: "Failed to seed database",
};

#[async_trait]
impl PostStore for PostgresStore {
    async fn list_posts(&self) -> Fallible<Vec<AuthoredPost>> {
        let conn = self.checkout(FETCH_POSTS_FAILED)?;
        let rows = block(move || {
            posts::table
                .inner_join(users::table)
                .order(posts::id.desc())
                .load::<(Post, User)>(&conn)
        })
        .await
        .to_resp(FETCH_POSTS_FAILED)?;
        debug!(count = rows.len(), "loaded posts");
        Ok(rows.into_iter().map(AuthoredPost::from).collect())
    }

    async fn delete_post(&self, id: i32) -> Fallible<()> {
        let conn = self.checkout(DELETE_POST_FAILED)?;
        let deleted = block(move || diesel::delete(posts::table.find(id)).execute(&conn))
            .await
            .to_resp(DELETE_POST_FAILED)?;
        if deleted == 0 {
            return Err(TfError::not_found(
                anyhow!("no post with id {}", id),
                "Post not found",
            ));
        }
        info!(post_id = id, "deleted post");
        Ok(())
    }

    async fn find_user(&self, id: i32) -> Fallible<Option<User>> {
        let conn = self.checkout(FETCH_USERS_FAILED)?;
        block(move || users::table.find(id).first::<User>(&conn).optional())
            .await
            .to_resp(FETCH_USERS_FAILED)
    }

    async fn list_users(&self, filters: UserFilters) -> Fallible<Vec<User>> {
        let conn = self.checkout(FETCH_USERS_FAILED)?;
        block(move || {
            let mut query = users::table.into_boxed();
            for filter in filters.as_sql_where() {
                query = query.filter(filter);
            }
            query.order(users::id.asc()).load::<User>(&conn)
        })
        .await
        .to_resp(FETCH_USERS_FAILED)
    }

    async fn reseed(&self, new_users: Vec<User>, new_posts: Vec<Post>) -> Fallible<SeedSummary> {
        let conn = self.checkout(SEED_FAILED)?;
        block(move || {
            conn.transaction::<_, DieselError, _>(|| {
                // Posts reference users, so they go first.
                diesel::delete(posts::table).execute(&conn)?;
                diesel::delete(users::table).execute(&conn)?;
                let users = diesel::insert_into(users::table)
                    .values(&new_users)
                    .execute(&conn)?;
                let posts = diesel::insert_into(posts::table)
                    .values(&new_posts)
                    .execute(&conn)?;
                Ok(SeedSummary { users, posts })
            })
        })
        .await
        .to_resp(SEED_FAILED)
    }
}

impl UserFilters {
    pub fn as_sql_where(
        &self,
    ) -> Vec<Box<dyn BoxableExpression<users::table, Pg, SqlType = Bool>>> {
        let mut wheres: Vec<Box<dyn BoxableExpression<users::table, Pg, SqlType = Bool>>> =
            Vec::new();
        if let Some(id) = self.id {
            wheres.push(Box::new(users::id.eq(id)))
        }
        if let Some(username) = &self.username {
            wheres.push(Box::new(users::username.eq(username.clone())))
        }
        if let Some(name) = &self.name {
            wheres.push(Box::new(users::name.eq(name.clone())))
        }
        wheres
    }
}
