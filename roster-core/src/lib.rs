#![forbid(unsafe_code)]

pub mod domain;
pub mod error;
pub mod filter;
pub mod reconcile;
pub mod session;
pub mod source;
pub mod visibility;

pub mod store;
pub mod store_factory;
pub mod store_fs;
pub mod store_mem;

// Re-exports: stable API surface
pub use domain::{AnnotatedCompany, Company, CompanyDetail, PageResult};
pub use filter::{FilterMode, filter_view};
pub use reconcile::reconcile;
pub use session::{CompaniesState, LoadStatus, PageTicket, Session};
pub use source::CompanySource;
pub use visibility::VisibilitySet;
