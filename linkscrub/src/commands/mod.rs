//! One module per subcommand.

pub mod clean;
pub mod providers;
pub mod scan;
pub mod update;
