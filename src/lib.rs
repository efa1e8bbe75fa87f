//! # Gradebook: Course Grade Tracking Service
//!
//! Gradebook tracks course records (name, grade, credit weight,
//! academic year, semester) in a pluggable key-value store and computes
//! credit-weighted grade averages sliced by course set, semester, or
//! year, including what-if "simulate a grade change" deltas.
//!
//! The aggregation engine is a set of pure functions over a
//! materialized record snapshot - it never fetches, never mutates its
//! input, and holds no state. Persistence, HTTP, and the retrying
//! client are thin layers around it.
//!
//! ## Example
//!
//! ```rust
//! use gradebook::aggregate;
//! use gradebook::course::{CourseRecord, Semester};
//!
//! let records = vec![
//!     CourseRecord::new("a", "Algorithms", 80, 2.0, 2024, Semester::A),
//!     CourseRecord::new("b", "Databases", 100, 1.0, 2024, Semester::B),
//! ];
//!
//! // Credit-weighted: (80*2 + 100*1) / 3
//! let avg = aggregate::weighted_average(&records);
//! assert!((avg - 260.0 / 3.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod aggregate;
pub mod api;
pub mod client;
pub mod course;
pub mod error;
pub mod kv;

pub use client::{Client, RetryPolicy};
pub use error::{Error, Result};
