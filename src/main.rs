use clap::Parser;
use idpick::cli::{Cli, Commands};
use idpick::picker::LinePicker;
use idpick::tools::{handle_list, handle_pick, handle_refresh, handle_suggest};
use idpick::workspace::Workspace;
use std::io::Write;
use std::process::ExitCode;
use tokio::io::BufReader;

/// Exit status for a cancelled selection.
const EXIT_CANCELLED: u8 = 1;

/// Exit status for host errors (bad workspace, bad configuration).
const EXIT_ERROR: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    idpick::tracing::init(cli.log_level());
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::Pick {
            workspace,
            cap,
            source,
            builder,
        } => {
            let mut workspace = Workspace::open(&workspace).await?;
            if let Some(cap) = cap {
                workspace.config_mut().max_suggestions = cap;
            }
            source.apply(workspace.config_mut());
            builder.apply(workspace.config_mut());

            let mut picker = LinePicker::new(BufReader::new(tokio::io::stdin()), std::io::stderr());
            let outcome = handle_pick(&workspace, &mut picker).await;

            print_lines(outcome.ids.iter().map(String::as_str))?;
            Ok(if outcome.resolved {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(EXIT_CANCELLED)
            })
        }
        Commands::Suggest {
            workspace,
            query,
            limit,
            source,
        } => {
            let mut workspace = Workspace::open(&workspace).await?;
            source.apply(workspace.config_mut());
            let output = handle_suggest(&workspace, &query, limit).await;
            write_stdout(&output)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::List { workspace, source } => {
            let mut workspace = Workspace::open(&workspace).await?;
            source.apply(workspace.config_mut());
            write_stdout(&handle_list(&workspace).await)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Refresh {
            workspace,
            source,
            builder,
        } => {
            let mut workspace = Workspace::open(&workspace).await?;
            source.apply(workspace.config_mut());
            builder.apply(workspace.config_mut());
            let count = handle_refresh(&workspace).await?;
            write_stdout(&format!("Refreshed cached ids. Found {} ids.\n", count))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_lines<'a>(lines: impl Iterator<Item = &'a str>) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    for line in lines {
        writeln!(stdout, "{}", line)?;
    }
    stdout.flush()
}

fn write_stdout(text: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()
}
