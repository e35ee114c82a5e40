// Use cases wiring the pipeline stages into runnable flows.

pub mod fix_locations_use_case;
pub mod import_use_case;

pub use fix_locations_use_case::FixLocationsUseCase;
pub use import_use_case::{ImportOptions, ImportUseCase};
