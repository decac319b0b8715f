//! Client application - typed API calls, the view-routing table, and the
//! controllers that keep per-view state.
//!
//! Requires the `client` feature. Uses reqwest for HTTP.
//!
//! ## Views
//!
//! - `/`                  — list of all videos.
//! - `/add-video`         — empty form; save creates a video.
//! - `/video/:id`         — form populated from the video; save updates it.
//! - `/video/delete/:id`  — confirmation showing the video; confirm deletes it.
//! - anything else        — redirects to `/`.
//!
//! Every successful save or delete returns to `/`.

mod app;
mod error;
mod http;
mod routes;

pub use app::{App, Page, Screen, Transition, VideoForm, ViewState};
pub use error::ClientError;
pub use http::{VideoClient, DEFAULT_TIMEOUT};
pub use routes::{resolve, Resolution, RouteDef, Template, View, ViewKind, FALLBACK, ROUTES};
