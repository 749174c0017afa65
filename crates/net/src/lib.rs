pub mod biography;
pub mod error;
pub mod router;
pub mod server;

pub use error::BiographyError;
pub use server::{build_app, serve, AppOptions};
