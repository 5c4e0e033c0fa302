//! PRD handlers - generation and export of requirements documents.

mod export_prd;
mod generate_prd;

pub use export_prd::{ExportPrdCommand, ExportPrdError, ExportPrdHandler, ExportPrdResult};
pub use generate_prd::{
    GeneratePrdCommand, GeneratePrdError, GeneratePrdHandler, GeneratePrdResult,
};
