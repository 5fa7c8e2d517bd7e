use anyhow::Result;
use clap::{Parser, Subcommand};
use engine::{scoring, BoardConfig};
use shared::domain::{Cell, Orientation, PlayerNumber};

#[derive(Parser, Debug)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the opening board for an orientation and size.
    Render {
        #[arg(long, default_value = "standard")]
        orientation: Orientation,
        #[arg(long, default_value_t = 20)]
        size: usize,
    },
    /// List every supported board with its win percentage.
    Table,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Render { orientation, size } => {
            let config = BoardConfig::new(orientation, size)?;
            let board = config.build();
            for row in board.grid() {
                let line: String = row.iter().map(|cell| glyph(*cell)).collect();
                println!("{line}");
            }
            let scores = scoring::calculate(&board);
            println!(
                "{orientation} {size}x{size}: win at {}%, opening scores {}% / {}%",
                config.win_percentage, scores.player_one, scores.player_two
            );
        }
        Command::Table => {
            for config in BoardConfig::supported() {
                println!(
                    "{:<16}{:>4}{:>6}%",
                    config.orientation, config.size, config.win_percentage
                );
            }
        }
    }

    Ok(())
}

fn glyph(cell: Cell) -> char {
    match cell {
        Cell::Neutral => '.',
        Cell::Owned(PlayerNumber::One) => '1',
        Cell::Owned(PlayerNumber::Two) => '2',
    }
}
