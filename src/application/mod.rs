//! Application layer containing the request-level use cases.
//!
//! `BalanceGate` is the entry point for every inbound operation. It resolves
//! the shared upstream session through `SessionBootstrapper`, debits the
//! `Ledger`, and on insufficient funds falls back to the catalog and the
//! `DetailEnricher`.

pub mod bootstrap;
pub mod enricher;
pub mod engine;
