//! The `geoprep signup` command.

use anyhow::Result;

use geoprep_core::auth::{self, AuthOutcome, LoginRequest};
use geoprep_core::model::ProfileType;

use super::{AppContext, Paths};

pub fn execute(
    paths: &Paths,
    username: String,
    password: String,
    profile: ProfileType,
) -> Result<()> {
    let ctx = AppContext::load(paths)?;
    let outcome = auth::login(
        &ctx.directory(),
        LoginRequest::Signup {
            username,
            password,
            profile,
        },
        &ctx.config.admin_passcode,
    )?;

    if let AuthOutcome::Registered { username } = outcome {
        println!("Account created for {username} ({profile}). Please log in.");
    }
    Ok(())
}
