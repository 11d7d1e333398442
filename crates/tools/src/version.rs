use std::fmt;

use clap::Args;

/// Prints the name and version of the running tool.
pub struct Version;

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "superperm {}", env!("CARGO_PKG_VERSION"))
    }
}

#[derive(Args, Debug)]
pub struct VersionFlag {
    #[arg(long, global = true, help = "Print the version of this tool")]
    version: bool,
}

impl From<VersionFlag> for bool {
    fn from(flag: VersionFlag) -> Self {
        flag.version
    }
}
