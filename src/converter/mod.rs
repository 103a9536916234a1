//! # Converter Module
//!
//! Modulo che separa le responsabilità della conversione in sottomoduli:
//! - `batch_converter`: Orchestratore principale del batch
//! - `file_processor`: Pipeline del singolo file
//! - `path_resolver`: Calcolo dei path di output e gestione delle collisioni

pub mod batch_converter;
pub mod file_processor;
pub mod path_resolver;

pub use batch_converter::{run_conversion, BatchConverter, RunReport};
pub use file_processor::{FileOutcome, FileProcessor};
pub use path_resolver::{PathResolution, PathResolver};
