use anyhow::Context;

use ledger_demo::{DemoConfig, render::render, scenario};

fn main() -> anyhow::Result<()> {
    let config = DemoConfig::from_env().context("invalid configuration")?;
    ledger_observability::init(config.log_format);

    tracing::info!(output = ?config.output, "running ledger walkthroughs");

    println!("======= Account =======");
    let plain = scenario::plain_account().context("opening plain account")?;
    print!("{}", render(&plain, config.output)?);

    println!("======= CreditAccount =======");
    let credit = scenario::credit_account().context("opening credit account")?;
    print!("{}", render(&credit, config.output)?);

    Ok(())
}
