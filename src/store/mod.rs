pub mod clients;
pub mod models;
pub mod projects;
pub mod scoped;
pub mod tasks;
pub mod tenants;
pub mod time_entries;
pub mod workspaces;

pub use scoped::ScopedStore;
pub use tenants::PgTenantDirectory;
pub use workspaces::PgWorkspaceSource;
