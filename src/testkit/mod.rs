//! Test-support toolkit consumed by the external test suite.
//!
//! Nothing in here is used by the digest itself; it is shipped as a public
//! module so out-of-crate tests can share one set of helpers.

pub mod database;
pub mod fixtures;
pub mod graphql;
pub mod stringify;
pub mod stripe;
pub mod wait;

pub use fixtures::data;
pub use graphql::{graphql_query, make_request, ExecutionResult, RequestContext, TestUser};
pub use stringify::stringify;
pub use wait::{wait_for_condition, WaitOptions};
