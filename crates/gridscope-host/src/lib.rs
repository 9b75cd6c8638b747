//! Host access for gridscope.
//!
//! The engine in `gridscope-seeker` works on plain in-memory records. This
//! crate is the part that talks to a table host and keeps UI-side state:
//!
//! - [`TableHost`]: async access to selection, views, fields and cells
//! - [`JsonHost`]: a host answering from a JSON snapshot document
//! - [`fetch_snapshot`] / [`fetch_record`]: pull a view or a record into
//!   engine records
//! - [`ExplorerSession`]: filters, query and pager over one snapshot
//! - [`Debouncer`]: lets the last of a burst of keystrokes through
//!
//! # Example
//!
//! ```no_run
//! use gridscope_host::{fetch_snapshot, ExplorerSession, JsonHost};
//! use gridscope_seeker::Seeker;
//!
//! # async fn run() -> gridscope_host::Result<()> {
//! let host = JsonHost::from_path("tasks.json")?;
//! if let Some(snapshot) = fetch_snapshot(&host).await? {
//!     let mut session = ExplorerSession::new(snapshot, Seeker::default());
//!     session.set_query("release");
//!     for record in session.page() {
//!         println!("{}", record.id);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod debounce;
mod error;
mod host;
mod json_host;
mod session;
mod snapshot;

// Re-export public API
pub use debounce::{Debouncer, DEFAULT_DELAY};
pub use error::{HostError, Result};
pub use host::{Selection, TableHost, ViewMeta, ViewType};
pub use json_host::{HostDocument, JsonHost, RecordDocument, TableDocument, ViewDocument};
pub use session::{ExplorerSession, SESSION_PAGE_SIZE};
pub use snapshot::{fetch_record, fetch_snapshot, RecordSnapshot, TableSnapshot};
