use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(about, long_about = None)]
pub struct RampCli {
    /// The rate of the first generation, in requests per second
    #[clap(long)]
    pub lower_bound: u64,

    /// The highest rate to run a generation at, in requests per second
    #[clap(long)]
    pub upper_bound: u64,

    /// How much to increase the rate by between generations
    #[clap(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub step: u64,

    /// The minimum number of measurements to take in each generation
    #[clap(long, default_value = "1000")]
    pub minimum_measurements: u64,

    /// The minimum number of seconds to run each generation for
    #[clap(long, default_value = "30")]
    pub minimum_window_s: u64,

    /// The number of workers each generation may use to issue requests
    #[clap(long, default_value = "10")]
    pub threads: usize,

    /// The number of seconds to pause between generations, so that the system under test can
    /// settle before the rate is increased
    #[clap(long, default_value = "5")]
    pub pause_s: u64,

    /// Do not show a progress bar on the CLI.
    ///
    /// This is recommended for CI/CD environments where the progress bar isn't being looked at by anyone and is just adding noise to the logs.
    #[clap(long, default_value = "false")]
    pub no_progress: bool,

    /// The command to benchmark, given after `--`
    #[clap(last = true)]
    pub command: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_with_defaults() {
        let cli = RampCli::try_parse_from([
            "ramp",
            "--lower-bound",
            "10",
            "--upper-bound",
            "100",
            "--step",
            "10",
            "--",
            "ls",
            "-l",
        ])
        .unwrap();

        assert_eq!(10, cli.lower_bound);
        assert_eq!(100, cli.upper_bound);
        assert_eq!(10, cli.step);
        assert_eq!(1000, cli.minimum_measurements);
        assert_eq!(30, cli.minimum_window_s);
        assert_eq!(10, cli.threads);
        assert_eq!(5, cli.pause_s);
        assert!(!cli.no_progress);
        assert_eq!(vec!["ls".to_string(), "-l".to_string()], cli.command);
    }

    #[test]
    fn zero_step_is_rejected() {
        let result = RampCli::try_parse_from([
            "ramp",
            "--lower-bound",
            "10",
            "--upper-bound",
            "100",
            "--step",
            "0",
        ]);

        assert!(result.is_err());
    }
}
