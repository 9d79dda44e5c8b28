mod app;
mod render;

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use drill_lib::clock::SystemClock;
use drill_lib::review::{CommandPlayer, InteractiveReviewer, Prompter};

use render::terminal::{render_new_practice, render_plan_size, render_summary};

#[derive(Parser)]
#[command(name = "drill", about = "Vocabulary drill with spaced repetition", version)]
struct Cli {
    /// Directory holding the word list, recordings and history
    #[arg(default_value = ".")]
    dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = atty_check();
    let clock = SystemClock;

    let mut app = app::App::new(&cli.dir)?;

    for key in app.discover(&clock)? {
        println!("{}", render_new_practice(&key, use_color));
    }

    let mut rng = StdRng::from_entropy();
    let plan = app.plan(&clock, &mut rng);
    println!("{}", render_plan_size(plan.len(), use_color));

    let stdin = io::stdin();
    let prompter = Prompter::new(stdin.lock(), io::stdout());
    let player = CommandPlayer::from_config(&app.config.player);
    let mut reviewer = InteractiveReviewer::new(
        prompter,
        player,
        app.dir.clone(),
        app.config.audio_extension.clone(),
        app.config.audio_replays,
    );

    let summary = app.review(&plan, &mut reviewer, &clock)?;
    app.save()?;

    if summary.reviewed > 0 || summary.skipped > 0 {
        println!("{}", render_summary(&summary, use_color));
    }

    Ok(())
}

/// Check if stdout is a terminal (for color support)
fn atty_check() -> bool {
    io::stdout().is_terminal()
}
