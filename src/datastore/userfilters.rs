//! Ways to look up users. Filter semantics work just like SQL:
//! If a field is unset, its filter won't be applied.
//! If set, filter out users whose field isn't exactly equal to it.
use serde::Deserialize;

/// Filters accepted by the user lookup endpoint and the datastore.
#[derive(Default, Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct UserFilters {
    pub id: Option<i32>,
    pub username: Option<String>,
    pub name: Option<String>,
}
