mod cli;

pub use cli::{Cli, Command, EncodeRangeArgs, ResolveArgs};
