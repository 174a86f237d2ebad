//! The posts view. Fetches every post once, then filters, paginates and deletes client-side.
pub mod backend;
pub mod console;
pub mod delete;
pub mod filters;
pub mod pagination;
pub mod projection;
pub mod session;
pub mod view;
