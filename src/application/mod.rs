pub mod use_cases;

pub use use_cases::import_directory::ImportDirectoryUseCase;
pub use use_cases::occupant_history::OccupantHistoryUseCase;
