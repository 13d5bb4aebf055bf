//! Categorize command - suggest a category for a manually entered description.

use clap::Args;
use console::style;

use slipscan_core::receipt::rules::KeywordTable;
use slipscan_core::Category;

use super::load_config;

/// Arguments for the categorize command.
#[derive(Args)]
pub struct CategorizeArgs {
    /// Transaction description
    #[arg(required = true, num_args = 1..)]
    description: Vec<String>,

    /// Show keyword hits per category
    #[arg(long)]
    scores: bool,
}

pub async fn run(args: CategorizeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let description = args.description.join(" ");

    let custom;
    let table = if config.classifier.extra_keywords.is_empty() {
        KeywordTable::builtin()
    } else {
        custom = KeywordTable::with_extra(&config.classifier.extra_keywords);
        &custom
    };

    println!("{}", table.classify(&description));

    if args.scores {
        let scores = table.score(&description);
        if scores.is_empty() {
            eprintln!("{} No keywords matched", style("ℹ").blue());
        }
        for category in Category::SCORED {
            let hits = scores.get(&category).copied().unwrap_or(0);
            eprintln!("  {:<10} {}", category.name(), hits);
        }
    }

    Ok(())
}
