//! Domain types and the ports through which the gate talks to the outside.

mod lenient;
pub mod ledger;
pub mod offer;
pub mod payout;
pub mod ports;
pub mod session;
