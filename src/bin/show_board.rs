use clap::Parser;
use settlers_board::{GameSession, SessionConfig};

#[derive(Parser, Debug)]
#[command(name = "show_board", about = "Generate a random board and print it")]
struct Args {
    /// RNG seed for the terrain shuffle and token spiral.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of seated players.
    #[arg(long, default_value_t = 4)]
    players: usize,

    /// Emit the hex list as JSON instead of ASCII art.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();
    let session = GameSession::new(SessionConfig {
        num_players: args.players,
        seed: args.seed,
    });

    if args.json {
        let encoded =
            serde_json::to_string_pretty(session.board.hexes()).expect("hexes serialize");
        println!("{encoded}");
    } else {
        print!("{}", session.render_board());
    }
}
