//! Service layer: encoding pipeline, view building and session handling.
//!
//! Everything here is independent of HTTP. Handlers call into
//! [`dashboard::start_session`] and [`session::SessionStore`].

pub mod dashboard;
pub mod encoding;
pub mod jitter;
pub mod palette;
pub mod quantile;
pub mod session;
pub mod views;

pub use dashboard::{load_config, open_dashboard, start_session};
pub use encoding::{encode, sort_categories};
pub use jitter::{apply_jitter, remove_jitter, JitterSettings, JITTER_WIDTH};
pub use palette::{plasma, EncodingTables};
pub use quantile::{qcut, QuantileBins};
pub use session::{transition, LoadedDashboard, Session, SessionError, SessionStore, Transition};
pub use views::build_dashboard;
