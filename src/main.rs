//! Budget Jigsaw entry point
//!
//! The apps run in the browser (see `web`). Natively this prints a report of
//! the data held in a local data directory.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use budget_jigsaw::consts::{DATA_DIR_ENV, DEFAULT_DATA_DIR};
    use budget_jigsaw::persistence::FileStore;
    use budget_jigsaw::{FinanceTracker, HighScores, Storage};

    env_logger::init();

    let dir = std::env::var(DATA_DIR_ENV).unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
    let store = FileStore::open(&dir).with_context(|| format!("open data dir {dir}"))?;
    log::info!("Budget Jigsaw (native) using {}", store.dir().display());
    let storage = Storage::new(store);

    let tracker = FinanceTracker::load(storage.clone());
    let summary = tracker.summary();
    println!("Transactions: {}", tracker.transactions.len());
    println!("  income   {:>12.2}", summary.income);
    println!("  expenses {:>12.2}", summary.expenses);
    println!("  balance  {:>12.2}", summary.balance);
    println!("Categories: {}", tracker.categories.list().join(", "));

    let scores = HighScores::load(&storage);
    if scores.is_empty() {
        println!("No puzzle high scores yet");
    } else {
        println!("Puzzle high scores:");
        for (rank, entry) in scores.entries.iter().enumerate() {
            println!(
                "  {:>2}. {:>3} pieces  {:>5}s  {:>4} moves",
                rank + 1,
                entry.difficulty,
                entry.time,
                entry.moves
            );
        }
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::init, this is just to satisfy the compiler
}
