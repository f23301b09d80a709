//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!          ┌─────────────┐        ┌─────────────────────┐        ┌───────────────┐
//!  CLI ───▶│  inbound    │───────▶│     application     │───────▶│   outbound    │───▶ SQLite
//!          │  betting    │        │ validator + ledger  │        │ LedgerStore   │     memory
//!          └─────────────┘        └─────────────────────┘        └───────────────┘
//! ```
//!
//! - [`inbound`]: the bet submission surface and its response shapes
//! - [`outbound`]: the transactional store the ledger writes through

pub mod inbound;
pub mod outbound;
