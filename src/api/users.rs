use crate::api::{observe, State};
use crate::datastore::{structs::User, userfilters::UserFilters, PostStore};
use crate::twoface::{Fallible, OrNotFound};
use actix_web::web;
use serde::Serialize;

/// `?id=` looks up one user. Otherwise every user matching all of `username`/`name` is
/// returned, which is everyone when neither is given.
#[derive(Serialize, Debug)]
#[serde(untagged)]
pub enum UserLookup {
    One(User),
    Many(Vec<User>),
}

pub async fn lookup_users<DS: PostStore>(
    state: web::Data<State<DS>>,
    filters: web::Query<UserFilters>,
) -> Fallible<web::Json<UserLookup>> {
    observe("lookup_users", || async {
        let filters = filters.into_inner();
        if let Some(id) = filters.id {
            let user = state
                .ds
                .find_user(id)
                .await?
                .or_not_found("User not found", || format!("no user with id {}", id))?;
            return Ok(web::Json(UserLookup::One(user)));
        }
        let users = state.ds.list_users(filters).await?;
        Ok(web::Json(UserLookup::Many(users)))
    })
    .await
}
