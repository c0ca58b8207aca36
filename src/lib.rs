//! # campusdesk
//!
//! Front-end core of a role-based school administration client.
//!
//! Two independent stacks are wired together here:
//!
//! - **Context selection**: the signed-in user's permissions decide which of
//!   the College → Class → Section selectors exist; the selection store
//!   cascades changes down the hierarchy and fetches option lists from the
//!   backend ([`client::ApiClient`]).
//! - **Settings**: interface preferences persisted to durable storage and
//!   projected onto a document root ([`drawer::SettingsDrawer`]).
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── campusdesk-core/           # AppError, permission normalization
//! ├── campusdesk-models/         # ids, option DTOs, settings record
//! ├── campusdesk-config/         # env-driven configuration
//! ├── campusdesk-cache/          # option-list TTL cache
//! ├── campusdesk-observability/  # tracing setup
//! ├── campusdesk-context/        # permissions, selection store, fetcher
//! └── campusdesk-settings/       # reducer, storage, projection
//! src/
//! ├── cli/          # clap commands
//! ├── client.rs     # reqwest backend client
//! ├── components/   # permission-gated selectors
//! ├── drawer.rs     # settings drawer bindings
//! └── state.rs      # AppState
//! ```
//!
//! ## Environment Variables
//!
//! ```bash
//! CAMPUSDESK_API_URL=http://localhost:3000
//! CAMPUSDESK_API_TOKEN=...
//! CAMPUSDESK_STORAGE_DIR=storage/settings
//! CACHE_TTL_SECONDS=300
//! LOG_LEVEL=info
//! ```

pub mod cli;
pub mod client;
pub mod components;
pub mod drawer;
pub mod state;
