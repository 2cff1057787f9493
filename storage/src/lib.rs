//! Storage contracts and the in-memory reference adapter.
//!
//! The engine consumes storage exclusively through the [`StorageAdapter`]
//! trait; hosts plug in their own persistence by implementing the
//! repository traits. [`memory::MemoryStorage`] is a complete in-process
//! implementation used by tests and by embeddings that do not need a
//! database.

pub mod memory;
pub mod query;
pub mod repository;

pub use memory::MemoryStorage;
pub use query::{
    FilterValue, GroupSortBy, LogFilter, LogFilterOperator, LogGroupQuery, LogGroupResult,
    LogQuery, PaginatedResult, SortDir,
};
pub use repository::{
    ExpiredBatch, GroupRepository, NewGroup, NewNotFoundLog, NewRedirect, NewRedirectLog,
    NewTenantHost, NotFoundLogRepository, RedirectLogRepository, RedirectRepository,
    StorageAdapter, TenantHostRepository, TenantRepository,
};
