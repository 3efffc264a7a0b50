pub(crate) mod importer_constants;
pub(crate) mod importer_errors;
pub(crate) mod importer_model;
pub(crate) mod importer_service;

pub use importer_constants::*;
pub use importer_errors::ImportError;
pub use importer_model::ImportReport;
pub use importer_service::{ImportService, ImportServiceTrait};
