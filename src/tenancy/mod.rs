//! Tenant isolation and enforcement engine.
//!
//! Every data route goes through the same pipeline: the middleware resolves a
//! [`context::TenantContext`] once per request, handlers fetch rows through
//! [`access::fetch_resource`] / [`access::list_resources`], and the
//! [`ownership`] truth table plus the process-wide [`mode::EnforcementMode`]
//! decide what is visible and whether a legacy-data warning rides along.

pub mod access;
pub mod cache;
pub mod context;
pub mod mode;
pub mod ownership;
pub mod principal;

pub use access::{fetch_resource, list_resources, AccessError, RequestScope, ResourceLookup};
pub use cache::{CacheError, WorkspaceCache, WorkspaceSource};
pub use context::{resolve, ResolveError, TenantContext, TenantDirectory};
pub use mode::EnforcementMode;
pub use ownership::{AccessDecision, TenantScoped};
pub use principal::Principal;
