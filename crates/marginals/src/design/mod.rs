//! Design construction for marginal predictions.
//!
//! # Key Types
//!
//! - [`DesignConfig`]: validated configuration (bon builder)
//! - [`GridPoints`]: explicit candidate values per variable
//! - [`Design`]: the resulting table plus its grid and background rows
//!
//! # Example
//!
//! ```
//! use marginals::data::Table;
//! use marginals::design::{build_design, DesignConfig};
//!
//! let data = Table::builder()
//!     .add_continuous("x", vec![0.0, 1.0, 2.0, 3.0])
//!     .add_nominal("c", ["a", "b", "a", "b"])
//!     .build()
//!     .unwrap();
//!
//! let config = DesignConfig::builder()
//!     .vars(["x"])
//!     .grid_size(3)
//!     .sample_size(4)
//!     .build()
//!     .unwrap();
//!
//! let design = build_design(&data, &config).unwrap();
//! assert_eq!(design.n_rows(), 12);
//! ```

mod builder;
mod config;
mod points;

pub use builder::{build_design, build_design_with_rng, Design};
pub use config::{DesignConfig, DesignConfigBuilder, DEFAULT_MAX_ROWS};
pub use points::GridPoints;
