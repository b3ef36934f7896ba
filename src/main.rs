use anyhow::Result;
use clap::Parser;
use hangman::cli::{Cli, Commands};
use hangman::core::engine::Engine;
use hangman::games::hangman::dictionary::DefinitionProvider;
use hangman::games::hangman::store::{FileStore, KeyValueStore, ResultStore};
use hangman::games::hangman::words::WordProvider;
use hangman::games::hangman::HangmanApp;
use hangman::logging;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_path(), cli.log_level)?;

    let store = FileStore::open_or_empty(cli.storage_path());
    info!(path = %store.path().display(), "storage opened");
    let results = ResultStore::load(store);

    match cli.command.unwrap_or(Commands::Play) {
        Commands::Stats => {
            print_stats(&results);
            Ok(())
        }
        Commands::Play => play(&cli, results).await,
    }
}

async fn play(cli: &Cli, results: ResultStore<FileStore>) -> Result<()> {
    let client = reqwest::Client::builder().timeout(cli.timeout()).build()?;
    let words = WordProvider::new(client.clone(), cli.word_url.clone());
    let definitions = DefinitionProvider::new(client, cli.dictionary_url.clone());
    let app = HangmanApp::new(cli.settings(), results, words, definitions);

    let terminal = ratatui::init();
    let result = Engine::new(app).run(terminal).await;
    ratatui::restore();

    let app = result?;
    let totals = app.results().totals();
    info!(wins = totals.wins, losses = totals.losses, "bye");
    Ok(())
}

fn print_stats<S: KeyValueStore>(results: &ResultStore<S>) {
    let totals = results.totals();
    println!("Wins: {} | Losses: {}", totals.wins, totals.losses);
    println!();
    if results.history().is_empty() {
        println!("No games played yet.");
        return;
    }
    println!("{:<20} {:<6} {:<16} {:<10} {}", "Date", "Result", "Word", "Difficulty", "Language");
    for record in results.history() {
        println!(
            "{:<20} {:<6} {:<16} {:<10} {}",
            record.date,
            record.result.label(),
            record.word,
            record.difficulty.to_string(),
            record.language
        );
    }
}
