pub mod address_flow;
pub mod funnel;

pub use address_flow::{AddressFlow, LookupOutcome};
pub use funnel::{AddressPhase, Effect, FunnelSession, Intent, Screen};
