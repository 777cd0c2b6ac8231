mod degradation_event;
mod health;
mod session_context;

pub use degradation_event::DegradationEvent;
pub use health::{HealthReport, HealthSnapshot, HealthStatus};
pub use session_context::SessionContext;
