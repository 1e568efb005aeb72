//! Chain access capabilities.
//!
//! Jobs never talk to a concrete client. They depend on two narrow traits:
//! [`ChainQuery`] for list-all storage reads and [`ChainSubmit`] for
//! submitting one mutating call and awaiting its acknowledgment.
//! [`GatewayClient`] implements both over HTTP.

mod gateway;
mod traits;
mod types;

pub use gateway::GatewayClient;
pub use traits::*;
pub use types::*;
