//! The `geoprep chat` command.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use geoprep_core::model::{AppMode, Message};
use geoprep_core::session::Session;

use super::{AppContext, Paths};

const HELP: &str = "Commands: /mode <syllabus|interview|haryana>, /reset, /help, /quit";

/// Reject modes that have no chat transcript.
pub(crate) fn chat_mode(mode: AppMode) -> Result<AppMode> {
    if !mode.is_chat() {
        anyhow::bail!(
            "'{}' is not a chat mode; use `geoprep evaluate` or `geoprep dashboard`",
            mode.title()
        );
    }
    Ok(mode)
}

pub(crate) fn print_reply(message: &Message) {
    println!("\nMentor: {}\n", message.text);
}

pub async fn execute(
    paths: &Paths,
    username: String,
    password: String,
    mode: AppMode,
) -> Result<()> {
    let ctx = AppContext::load(paths)?;
    let user = ctx.login_student(username, password)?;
    let gateway = ctx.gateway()?;
    let mode = chat_mode(mode)?;

    let mut session = Session::new();
    println!(
        "Welcome, {} [{}]. {}",
        user.username,
        user.profile_type,
        user.profile_type.tagline()
    );
    session.login(user);
    enter(&mut session, mode)?;
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input.split_once(' ').unwrap_or((input, "")) {
            ("/quit" | "/exit", _) => break,
            ("/help", _) => println!("{HELP}"),
            ("/reset", _) => {
                session.reset();
                println!("Transcript cleared.");
            }
            ("/mode", arg) => match arg.trim().parse::<AppMode>() {
                Ok(next) if next == session.mode() => {
                    println!("Already in {}.", next.title())
                }
                Ok(next) => match chat_mode(next) {
                    Ok(next) => enter(&mut session, next)?,
                    Err(e) => println!("{e}"),
                },
                Err(e) => println!("{e}"),
            },
            _ => {
                let reply = session.send_message(&gateway, input).await?;
                print_reply(reply);
            }
        }
    }

    session.logout();
    println!("Goodbye.");
    Ok(())
}

fn enter(session: &mut Session, mode: AppMode) -> Result<()> {
    session.switch_mode(mode)?;
    println!("== {} ==", session.mode().title());
    if let Some(welcome) = session.messages().last() {
        print_reply(welcome);
    }
    Ok(())
}
