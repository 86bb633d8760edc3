//! PostgreSQL repository implementations.

pub mod post;
pub mod user;

pub use post::PgPostRepository;
pub use user::PgUserRepository;
