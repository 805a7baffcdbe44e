mod builder;
mod cli;
mod config;
mod logging;
mod runner;
mod structure;

fn main() -> anyhow::Result<()> {
    logging::init();
    let app = cli::parse();
    runner::run(app)
}
