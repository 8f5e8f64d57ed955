pub mod features;
pub mod gas;
pub mod response;
pub mod telemetry;

pub use features::*;
pub use gas::*;
pub use response::*;
pub use telemetry::*;
