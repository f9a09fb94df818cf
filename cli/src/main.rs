mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, Commands, catalog, check, read, time, write};
use tagcrawl_common::error;
use tagcrawl_common::progress::Interrupt;
use tagcrawl_core::TagService;
use terminal::{logging, print, spinner};

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose, commands.quiet);
    print::banner(commands.quiet);

    let result: anyhow::Result<()> = run(&commands).await;
    let code: ExitCode = match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    };

    spinner::finish();
    print::end_of_program(commands.quiet);
    code
}

async fn run(commands: &CommandLine) -> anyhow::Result<()> {
    let interrupt: Interrupt = Interrupt::new();
    watch_ctrl_c(interrupt.clone());

    let service: TagService = commands.service(interrupt)?;
    let quiet: u8 = commands.quiet;

    match &commands.command {
        Commands::Check { ip } => {
            print::header("checking controller", quiet);
            check::check(&service, ip).await
        }
        Commands::Catalog { ip, output } => {
            print::header("tag discovery", quiet);
            catalog::catalog(&service, ip, output.as_deref()).await
        }
        Commands::Snapshot { ip, output } => {
            print::header("tag snapshot", quiet);
            catalog::snapshot(&service, ip, output.as_deref()).await
        }
        Commands::Read { ip, tags } => {
            print::header("reading tags", quiet);
            read::read(&service, ip, tags, quiet).await
        }
        Commands::Write { ip, table } => {
            print::header("writing tags", quiet);
            write::write(&service, ip, table.as_deref(), quiet).await
        }
        Commands::Time { action } => {
            print::header("controller clock", quiet);
            time::time(&service, action).await
        }
    }
}

fn watch_ctrl_c(interrupt: Interrupt) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.trigger();
            spinner::report("stopping after the current tag");
        }
    });
}
