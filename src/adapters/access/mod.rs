//! Access checker adapters.

mod postgres_access_checker;
mod stub_access_checker;

pub use postgres_access_checker::PostgresAccessChecker;
pub use stub_access_checker::StubAccessChecker;
