//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points of the store engine. Adapters implement
//! them to plug in persistence, notification delivery and time.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌─────────────┐
//! │ Store   │            │  Listing    │              │Notification │
//! │ Repo    │            │  Repo       │              │   Sink      │
//! └─────────┘            └─────────────┘              └─────────────┘
//! ```

pub mod outbound;
