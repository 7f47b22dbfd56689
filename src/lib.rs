//! Filter-and-aggregate pipeline behind the Future Jobs Explorer dashboard.
//!
//! Load a job postings dataset once with [`data::loader::load_file`], wrap it
//! in a [`Dashboard`], then call [`Dashboard::compute`] with fresh
//! [`FilterCriteria`] on every interaction.

pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod report;

pub use dashboard::{Dashboard, DashboardView};
pub use data::filter::{FilterCriteria, FilteredView};
pub use data::model::{DateRange, JobDataset, JobPosting, SalaryRange, YearMonth};
pub use error::{ConfigError, LoadError};
