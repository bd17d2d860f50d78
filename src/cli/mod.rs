pub mod commands;
pub mod ui;

pub use commands::install::InstallArgs;
pub use commands::resolve::{ResolveArgs, ResolveFormat};
pub use ui::Output;
