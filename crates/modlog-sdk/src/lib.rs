//! # modlog-sdk
//!
//! Public SDK for using modlog as a Rust library.
//!
//! Provides two entry points:
//! - [`ControllerBuilder`](builder::ControllerBuilder): Fluent API for
//!   configuring a cascade controller backed by the CarQuery API.
//! - [`ProjectClient`](project::ProjectClient): The project page's other
//!   asynchronous calls (removing a mod, fetching a modal form).
//!
//! # Example
//!
//! ```rust,no_run
//! use modlog_cascade::host::MemoryPage;
//! use modlog_sdk::builder::ControllerBuilder;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let controller = ControllerBuilder::new()
//!     .timeout_ms(5_000)
//!     .build(MemoryPage::new())?;
//! controller.initialize().await?;
//! controller.select_year(Some("2015")).await?;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod project;
