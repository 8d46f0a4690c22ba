//! Client-side view-model for the CV Manager resume-ranking service.
//!
//! Flow: [`submission`] builds the multipart payload, [`transport`] sends it to
//! the upload proxy, and [`view_model::RankingView`] applies the result to its
//! [`store`] and [`selection`] before [`chart`] and [`view`] project it for
//! rendering.

pub mod chart;
pub mod config;
pub mod errors;
pub mod models;
pub mod selection;
pub mod store;
pub mod submission;
pub mod transport;
pub mod view;
pub mod view_model;

pub use config::ClientConfig;
pub use errors::{ClientError, TransportError, TransportErrorKind, ValidationError};
pub use models::{RankingEntry, RankingResponse, ResumeDetail};
pub use transport::{HttpTransport, RankingTransport};
pub use view_model::RankingView;
