//! The `geoprep history` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use geoprep_core::evaluation::ScoreBand;
use geoprep_core::lab::Trend;

use super::evaluate::print_trend;
use super::{AppContext, Paths};

pub fn execute(paths: &Paths, username: String, password: String) -> Result<()> {
    let ctx = AppContext::load(paths)?;
    let user = ctx.login_student(username, password)?;
    let logs = ctx.logbook().student_logs(&user.username)?;

    if logs.is_empty() {
        println!("No evaluations yet for {}.", user.username);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Date", "Topic", "Module", "Score", "Band"]);
    for (i, log) in logs.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(log.timestamp.format("%Y-%m-%d %H:%M")),
            Cell::new(&log.topic),
            Cell::new(log.module),
            Cell::new(format!("{:.0}", log.score())),
            Cell::new(ScoreBand::of(log.score())),
        ]);
    }
    println!("{table}");
    print_trend(&Trend::from_logs(&logs));
    Ok(())
}
