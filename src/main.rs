use anyhow::Result;
use clap::Parser;
use torus_snake::app::App;
use torus_snake::game::GameConfig;

#[derive(Parser)]
#[command(name = "torus_snake")]
#[command(version, about = "Classic grid snake on a wrapping board")]
struct Cli {
    /// Grid width in cells
    #[arg(long, default_value = "32")]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value = "24")]
    height: usize,

    /// Simulation ticks per second
    #[arg(long, default_value = "15")]
    speed: u32,

    /// Number of stones on the board
    #[arg(long, default_value = "1")]
    stones: usize,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = GameConfig {
        grid_width: cli.width,
        grid_height: cli.height,
        tick_rate: cli.speed,
        obstacle_count: cli.stones,
    };

    App::new(config)?.run().await
}
