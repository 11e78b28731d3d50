pub mod draft;
pub mod movie;
pub mod schema;
