//! # eKonSpacing
//!
//! Korean spacing recognition dataset. Re-exports [`ekonspacing_core`].
//!
//! ```rust
//! use ekonspacing::Record;
//!
//! let record = Record::from_line("가 나").unwrap();
//! assert_eq!(record.spacing_tags, vec![4, 4]);
//! ```
pub use ekonspacing_core::*;
