//! Test modules relocated from implementation files.
//!
//! Inline test modules exceeding a screenful live here instead, one file
//! per implementation module, plus shared fixtures in `support`.

mod support;

mod indexed_tests;
mod scope_tests;
