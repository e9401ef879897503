//! Source adapters wrapping the external telemetry commands.
//!
//! Each adapter owns one [`ExternalCommand`](crate::exec::ExternalCommand)
//! invocation and turns its output into a typed record. Adapters report
//! trouble as [`SourceError`](crate::error::SourceError); the collector
//! decides how each failure degrades on the wire.

pub mod disk;
pub mod gpu;
pub mod models;
pub mod system;
pub mod thermal;

pub use disk::DiskSource;
pub use gpu::GpuSource;
pub use models::ModelListSource;
pub use system::SystemLoadSource;
pub use thermal::ThermalSource;
