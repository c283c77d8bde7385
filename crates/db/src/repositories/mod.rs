//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations, hiding
//! the `SeaORM` implementation details from the rest of the application.
//!
//! Error policy, uniform across repositories: point lookups and listings
//! return empty values on a miss *and* on a backend failure (the failure is
//! logged here); creates return the stored record or a typed error carrying
//! the conflict case; status updates report plain success/failure. Handlers
//! turn absence into user-facing messages and never see raw `DbErr`s on
//! read paths.

pub mod account;
pub mod appointment;
pub mod article;
pub mod dashboard;
pub mod session;

pub use account::{AccountError, AccountRepository, CreateAccountInput};
pub use appointment::{
    AppointmentRepository, AppointmentWithAccount, AttachmentRef, CreateAppointmentInput,
};
pub use article::{ArticleRepository, CreateArticleInput};
pub use dashboard::DashboardRepository;
pub use session::SessionRepository;
