/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file, normalize → JobDataset
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ JobDataset  │  Vec<JobPosting>, option lists, bounds (immutable)
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterCriteria → FilteredView
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌───────────┐  ┌──────────┐
///   │ aggregate  │  │ metrics   │  ranked tables / headline numbers
///   └───────────┘  └──────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod metrics;
pub mod model;
pub mod normalize;
