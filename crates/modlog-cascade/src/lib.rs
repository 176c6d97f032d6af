//! # modlog-cascade
//!
//! Keeps four dependent selection fields (year, make, model, trim) in step
//! with an external [`LookupService`](modlog_lookup::LookupService) and,
//! once a trim resolves, writes the derived specification into a form.
//!
//! The page is abstracted behind [`host::FormHost`]; [`host::MemoryPage`]
//! is an in-memory implementation.

pub mod controller;
pub mod error;
pub mod host;
pub mod options;
pub mod spec;
