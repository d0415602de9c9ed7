use std::io;

use clap::Parser;

use simplifyc_shell::config::{ShellCli, ShellConfig};
use simplifyc_shell::drivers::{ConsoleInputDriver, ConsoleOutputDriver, OutputDriver};
use simplifyc_shell::shell::Shell;
use simplifyc_shell::tracing_sub;

fn main() -> io::Result<()> {
    let args = ShellCli::parse();
    let config = ShellConfig::try_from(&args)?;
    tracing_sub::init(config.log_file.as_deref(), config.log_level)?;

    let mut shell = Shell::new(&config);
    let mut output = ConsoleOutputDriver::new()?;
    output.enter()?;
    let result = shell.run(ConsoleInputDriver::new(), &mut output, config.poll_interval);
    output.exit()?;

    if let Err(err) = &result {
        tracing::error!(error = %err, "shell exited with an error");
    }
    result
}
