pub mod form;
pub mod parser;
pub mod view;

pub use form::{BiographyForm, FormError};
pub use parser::profile::{BiographyRecord, Field, Gender};
pub use view::{Notice, View};
