//! taskcat-cats - interactive CRUD menu over the cat records collection

use anyhow::Context;
use clap::Parser;
use std::io;
use tracing::info;

use taskcat_lib::engine::{
    cats::Console,
    cli::CatsCli,
    config::Config,
    logging,
    nosql::NoSqlEngine,
};

fn main() {
    let cli = CatsCli::parse();
    logging::init(logging::level_for(cli.verbose));

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: CatsCli) -> anyhow::Result<()> {
    let project_dir = cli.get_project_dir();
    let config = Config::load_or_default(&project_dir)?;
    let data_dir = config.data_dir(&project_dir, cli.data_dir.as_deref());

    let engine = NoSqlEngine::open_or_create(&data_dir, &config.documents.database)
        .with_context(|| format!("opening document store in {}", data_dir.display()))?;
    let meta = engine.meta();
    info!(
        database = %meta.database,
        format = meta.format_version,
        created_by = %meta.created_by,
        path = %engine.path().display(),
        "document store opened"
    );
    let cats = engine
        .collection_or_create(&config.documents.collection)
        .with_context(|| format!("opening collection '{}'", config.documents.collection))?;

    let stdin = io::stdin();
    let mut console = Console::new(&cats, stdin.lock(), io::stdout());
    console.run()?;
    Ok(())
}
