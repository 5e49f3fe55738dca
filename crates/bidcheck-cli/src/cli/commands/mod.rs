use super::args::{Cli, Command};

pub(crate) mod history;
pub(crate) mod run;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Run(args) => run::run(args).await,
        Command::History(args) => history::run(args).await,
    }
}
