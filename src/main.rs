use std::{path::PathBuf, process::ExitCode};

use anyhow::Context as _;
use chrono::Local;
use clap::{command, value_parser, Arg, ArgAction, ArgMatches, Command};
use log::{debug, warn};
use serde_json::Value;

use commands::{create_post, create_post_from, report, run_panel};
use context::{find_workspace, Opened, Session};
use host::TerminalHost;
use metadata::{PostRequest, DEFAULT_LAYOUT};
use panel::{parse_option_value, run_form, PanelHandle};

mod commands;
mod context;
mod error;
mod formatter;
mod host;
mod metadata;
mod panel;
#[cfg(test)]
mod testing;
mod writer;

/// `key=value` with the value typed like a form field.
fn option_arg(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {raw:?}"))?;
    Ok((key.to_string(), parse_option_value(value)))
}

fn request_from_args(matches: &ArgMatches) -> Option<PostRequest> {
    let title: &String = matches.get_one("title")?;
    let mut request = PostRequest::new(title.as_str());
    if let Some(categories) = matches.get_one::<String>("categories") {
        request.categories = categories.clone();
    }
    if let Some(tags) = matches.get_one::<String>("tags") {
        request.tags = tags.clone();
    }
    if let Some(layout) = matches.get_one::<String>("layout") {
        request.layout = layout.clone();
    }
    if let Some(options) = matches.get_many::<(String, Value)>("option") {
        request.additional_options = options.cloned().collect();
    }
    Some(request)
}

fn cli() -> Command {
    command!()
        .arg(
            Arg::new("root")
                .long("root")
                .global(true)
                .env("JEKYLL_POST_ROOT")
                .help("Root of the Jekyll site. Found from the current directory if omitted.")
                .value_parser(value_parser!(PathBuf)),
        )
        .subcommand(
            Command::new("new")
                .about("Create a post. Prompts for everything unless --title is given.")
                .args(&[
                    Arg::new("title").long("title").short('t').help("Post title"),
                    Arg::new("categories")
                        .long("categories")
                        .short('c')
                        .help("Space separated categories")
                        .requires("title"),
                    Arg::new("tags")
                        .long("tags")
                        .short('g')
                        .help("Space separated tags")
                        .requires("title"),
                    Arg::new("layout")
                        .long("layout")
                        .short('l')
                        .help(format!("Layout name [default: {DEFAULT_LAYOUT}]"))
                        .requires("title"),
                    Arg::new("option")
                        .long("option")
                        .short('o')
                        .help("Extra front matter field, e.g. comments=true")
                        .action(ArgAction::Append)
                        .value_parser(option_arg)
                        .requires("title"),
                ]),
        )
        .subcommand(Command::new("panel").about("Open the post form"))
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();

    let matches = cli().get_matches();

    let cwd = std::env::current_dir().context("while reading the current directory")?;
    let root = matches.get_one::<PathBuf>("root");
    let workspace = find_workspace(root.map(PathBuf::as_path), &cwd);
    match &workspace {
        Some(root) => debug!("workspace: {root:?}"),
        None => warn!("no Jekyll site found from {cwd:?}"),
    }

    let mut session = Session::new(workspace);
    let mut host = TerminalHost::from_env();
    let now = || Local::now().fixed_offset();

    let result = match matches.subcommand() {
        Some(("panel", _)) => {
            let opened = session.panel.open_or_reveal(|| PanelHandle::spawn(run_form));
            if opened == Opened::Revealed {
                debug!("post form already open");
            }
            run_panel(&mut session, &mut host, &now);
            return Ok(ExitCode::SUCCESS);
        }
        Some(("new", sub)) => match request_from_args(sub) {
            Some(request) => create_post_from(&session, &mut host, &request, &now()),
            None => create_post(&session, &mut host, &now()),
        },
        _ => create_post(&session, &mut host, &now()),
    };
    report(&mut host, &result);

    Ok(match result {
        Err(error::PostError::Open { .. }) | Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    })
}
