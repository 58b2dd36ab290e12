pub mod failure;
pub mod monitoring_job;
pub mod observation_loader;

pub use failure::FailureKind;
pub use monitoring_job::MonitoringJob;
pub use observation_loader::{LoadedObservations, ObservationLoader};
