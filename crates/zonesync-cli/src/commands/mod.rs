pub mod check;
pub mod migrate;
pub mod sync;

pub use check::CheckCommand;
pub use migrate::MigrateCommand;
pub use sync::SyncCommand;
