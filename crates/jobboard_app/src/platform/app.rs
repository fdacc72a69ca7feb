use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use engine_logging::{engine_debug, engine_info};
use jobboard_core::Msg;
use jobboard_engine::EngineHandle;

use super::commands::UserCommand;
use super::config::{Cli, Command};
use super::controller::Controller;
use super::logging;
use super::ui;

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.log, &cli.data_dir, engine_logging::default_level());
    engine_info!("jobboard starting command={:?}", cli.command);

    let engine = EngineHandle::new(cli.engine_config()).context("failed to start engine")?;
    let mut controller = Controller::new(engine);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command.unwrap_or(Command::Browse) {
        Command::Browse => browse(&mut controller, &mut out)?,
        Command::Feed { pages } => {
            controller.dispatch(Msg::FeedScreenMounted);
            for _ in 1..pages.max(1) {
                if !controller.state().has_more() {
                    break;
                }
                controller.dispatch(Msg::ScrolledNearEnd);
            }
            print_view(&controller, &mut out)?;
        }
        Command::Bookmarks => {
            controller.dispatch(Msg::BookmarksScreenFocused);
            print_view(&controller, &mut out)?;
        }
        Command::ClearBookmarks => {
            controller.dispatch(Msg::ClearBookmarksClicked);
            match controller.state().notice() {
                Some(notice) => anyhow::bail!("{notice}"),
                None => writeln!(out, "Bookmarks cleared.")?,
            }
        }
    }
    Ok(())
}

fn browse(controller: &mut Controller, out: &mut impl Write) -> anyhow::Result<()> {
    controller.dispatch(Msg::FeedScreenMounted);
    print_view(controller, out)?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        write!(out, "{}", ui::constants::PROMPT)?;
        out.flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read command")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match UserCommand::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "{message}")?;
                continue;
            }
        };
        match command {
            UserCommand::Quit => break,
            UserCommand::Help => writeln!(out, "{}", ui::constants::HELP)?,
            other => {
                let Some(msg) = other.into_msg() else {
                    continue;
                };
                if controller.dispatch(msg) {
                    print_view(controller, out)?;
                } else {
                    engine_debug!("Command {:?} changed nothing", line.trim());
                    writeln!(out, "Nothing to do.")?;
                }
            }
        }
    }
    engine_info!("jobboard leaving interactive mode");
    Ok(())
}

fn print_view(controller: &Controller, out: &mut impl Write) -> anyhow::Result<()> {
    write!(out, "{}", ui::render::render(&controller.state().view()))?;
    Ok(())
}
