//! # widerow testkit
//!
//! Test utilities for widerow.
//!
//! This crate provides:
//! - A mapped sample entity whose getters hand out collection proxies
//! - A listener that records every mark
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust,ignore
//! use widerow_testkit::prelude::*;
//!
//! #[test]
//! fn put_marks_preferences() {
//!     let mut bean = CompleteBean::with_preferences(1, Arc::new(complete_bean_meta()));
//!     bean.preferences().put(4, "FR".into());
//!     assert_eq!(bean.dirty().len(), 1);
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use fixtures::*;
pub use generators::*;
