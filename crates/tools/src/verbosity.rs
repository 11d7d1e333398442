use clap::Args;
use log::LevelFilter;

#[derive(Args, Debug)]
pub struct VerbosityFlag {
    #[arg(short, long, global = true, help = "Only report errors")]
    quiet: bool,

    #[arg(short, long, global = true, help = "Report progress and results (default)")]
    verbose: bool,

    #[arg(short, long, global = true, help = "Report the individual steps of the algorithms")]
    debug: bool,

    #[arg(short, long, global = true, help = "Report every explored state")]
    trace: bool,
}

impl VerbosityFlag {
    /// Returns the log level filter. Quiet takes precedence, otherwise the most detailed flag wins.
    pub fn log_level_filter(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Error
        } else if self.trace {
            LevelFilter::Trace
        } else if self.debug {
            LevelFilter::Debug
        } else if self.verbose {
            LevelFilter::Info
        } else {
            LevelFilter::Info
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        verbosity: VerbosityFlag,
    }

    #[test]
    fn test_log_level_filter() {
        let level = |arguments: &[&str]| TestCli::parse_from(arguments).verbosity.log_level_filter();

        assert_eq!(level(&["test"]), LevelFilter::Info);
        assert_eq!(level(&["test", "-q"]), LevelFilter::Error);
        assert_eq!(level(&["test", "--debug"]), LevelFilter::Debug);
        assert_eq!(level(&["test", "-t"]), LevelFilter::Trace);
        assert_eq!(level(&["test", "-q", "-t"]), LevelFilter::Error);
        assert_eq!(level(&["test", "-v", "-t"]), LevelFilter::Trace);
        assert_eq!(level(&["test", "-v", "-d"]), LevelFilter::Debug);
    }
}
