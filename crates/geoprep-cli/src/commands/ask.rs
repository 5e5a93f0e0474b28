//! The `geoprep ask` command.

use anyhow::Result;

use geoprep_core::model::AppMode;
use geoprep_core::session::Session;

use super::chat::chat_mode;
use super::{AppContext, Paths};

pub async fn execute(
    paths: &Paths,
    username: String,
    password: String,
    mode: AppMode,
    message: String,
) -> Result<()> {
    let ctx = AppContext::load(paths)?;
    let user = ctx.login_student(username, password)?;
    let gateway = ctx.gateway()?;

    let mut session = Session::new();
    session.login(user);
    session.switch_mode(chat_mode(mode)?)?;

    let reply = session.send_message(&gateway, &message).await?;
    println!("{}", reply.text);
    Ok(())
}
