/// Data layer: core types, loading, and the two derived views.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ LaunchDataset │  Vec<LaunchRecord>, site index, payload bounds
///   └───────────────┘
///        │  (site selector, payload range)
///        ├──────────────────────┐
///        ▼                      ▼
///   ┌───────────┐          ┌──────────┐
///   │ aggregate │ counts   │  filter  │ ordered subset
///   └───────────┘          └──────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
