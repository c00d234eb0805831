pub mod cli;
pub mod toml_config;

pub const DEFAULT_INPUT_PATH: &str = "./input.txt";
pub const DEFAULT_DEMO_INPUT_PATH: &str = "./demo-input.txt";

#[cfg(feature = "cli")]
pub use self::args::CliConfig;

#[cfg(feature = "cli")]
mod args {
    use super::{DEFAULT_DEMO_INPUT_PATH, DEFAULT_INPUT_PATH};
    use crate::core::ConfigProvider;
    use crate::domain::model::{MalformedPolicy, OutputFormat, ScanMode};
    use crate::utils::error::Result;
    use crate::utils::validation::{validate_path, Validate};
    use clap::builder::FalseyValueParser;
    use clap::Parser;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "trebuchet")]
    #[command(about = "Sums the first/last digit calibration values of a text file")]
    pub struct CliConfig {
        /// Input file; overrides --demo.
        #[arg(long, short, env = "CALIBRATION_INPUT_FILE")]
        pub input: Option<String>,

        /// Read ./demo-input.txt instead of ./input.txt.
        #[arg(long, env = "DEMO_MODE", value_parser = FalseyValueParser::new())]
        pub demo: bool,

        /// Load settings from a TOML file instead of these flags.
        #[arg(long, short)]
        pub config: Option<String>,

        #[arg(long, value_enum, default_value_t = ScanMode::Digits)]
        pub mode: ScanMode,

        #[arg(long, value_enum, default_value_t = MalformedPolicy::Abort)]
        pub on_malformed: MalformedPolicy,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        pub format: OutputFormat,

        /// Do not echo each input line.
        #[arg(long, short)]
        pub quiet: bool,

        #[arg(long, short, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Log process CPU and memory usage per phase")]
        pub monitor: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub log_json: bool,
    }

    impl ConfigProvider for CliConfig {
        fn input_path(&self) -> &str {
            match &self.input {
                Some(path) => path.as_str(),
                None if self.demo => DEFAULT_DEMO_INPUT_PATH,
                None => DEFAULT_INPUT_PATH,
            }
        }

        fn scan_mode(&self) -> ScanMode {
            self.mode
        }

        fn malformed_policy(&self) -> MalformedPolicy {
            self.on_malformed
        }

        fn output_format(&self) -> OutputFormat {
            self.format
        }

        fn echo_lines(&self) -> bool {
            !self.quiet
        }

        fn monitor(&self) -> bool {
            self.monitor
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_path("input", self.input_path())
        }
    }

}
