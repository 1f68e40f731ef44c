use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::core::Result;

/// Authenticated user a test query runs as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestUser {
    pub id: i64,
    pub email: String,
    pub roles: Vec<String>,
}

/// Per-request execution context: the user, the raw query text, and a fresh
/// set of per-request data loaders (never shared between requests).
#[derive(Debug, Default)]
pub struct RequestContext {
    pub remote_user: Option<TestUser>,
    pub body: String,
    pub loaders: HashMap<String, Value>,
}

/// Raw execution result: data and/or errors, exactly as the executor
/// produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub data: Option<Value>,
    pub errors: Vec<String>,
}

/// The schema executor is an external collaborator; tests plug in whatever
/// implementation their suite carries.
#[async_trait]
pub trait SchemaExecutor: Send + Sync {
    async fn execute(
        &self,
        query: &str,
        variables: Option<Value>,
        context: RequestContext,
    ) -> Result<ExecutionResult>;
}

/// Source of authorization roles for a user, refreshed before a query runs.
#[async_trait]
pub trait RoleSource: Send + Sync {
    async fn refresh_roles(&self, user: &mut TestUser) -> Result<()>;
}

/// Build a request context carrying the user, the raw query string, and a
/// freshly constructed loader map.
pub fn make_request(user: Option<TestUser>, query: &str) -> RequestContext {
    RequestContext {
        remote_user: user,
        body: query.to_string(),
        loaders: HashMap::new(),
    }
}

/// Execute a query against the schema with a fresh request context,
/// refreshing the user's roles first when a role source is supplied.
pub async fn graphql_query(
    executor: &dyn SchemaExecutor,
    role_source: Option<&dyn RoleSource>,
    query: &str,
    variables: Option<Value>,
    mut user: Option<TestUser>,
) -> Result<ExecutionResult> {
    if let (Some(source), Some(user)) = (role_source, user.as_mut()) {
        source.refresh_roles(user).await?;
    }

    let context = make_request(user, query);
    executor.execute(query, variables, context).await
}
