pub mod db;

pub mod calendar;
pub mod categories;
pub mod expenses;
pub mod importer;
pub mod users;

pub mod constants;
pub mod errors;
pub mod schema;

pub use errors::{Error, Result};
pub use expenses::*;
pub use importer::*;
