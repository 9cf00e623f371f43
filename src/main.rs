use std::io::{Error, ErrorKind, Result};
use std::path::PathBuf;

use log::{error, info};
use structopt::StructOpt;
use visuals::{text_board, tui, tui_app::TuiApp};

use logic::config::Config;
use logic::hotels_game::HotelsGame;

pub mod logic;
pub mod visuals;

#[derive(Debug, structopt::StructOpt)]
struct Opt {
    /// Directory holding cell.json, cell_type.json, hotel.json,
    /// hotel_upgrade_type.json and game.json.
    #[structopt(short = "-c", long, parse(from_os_str), default_value = "configs")]
    config_dir: PathBuf,

    /// Print the board once and exit.
    #[structopt(short = "-t", long)]
    text: bool,

    /// The width of each cell.
    #[structopt(short = "-w", long, default_value = "6")]
    cell_width: u16,

    /// The height of each cell.
    #[structopt(short = "-H", long, default_value = "3")]
    cell_height: u16,
}

fn invalid_data<E: std::error::Error + Send + Sync + 'static>(err: E) -> Error {
    error!("{}", err);
    Error::new(ErrorKind::InvalidData, err)
}

fn main() -> Result<()> {
    env_logger::init();

    let Opt {
        config_dir,
        text,
        cell_width,
        cell_height,
    } = Opt::from_args();

    let config = Config::load(&config_dir).map_err(invalid_data)?;
    let hotels_game = HotelsGame::new(&config).map_err(invalid_data)?;

    if text {
        print!("{}", hotels_game);
        println!();
        print!("{}", text_board::show_board(&hotels_game));
        for hotel in hotels_game.hotels() {
            println!();
            print!("{}", hotel);
        }
        return Ok(());
    }

    let mut terminal = tui::init()?;
    let mut tui_app = TuiApp::builder()
        .cell_width(cell_width)
        .cell_height(cell_height)
        .hotels_game(hotels_game)
        .exit(false)
        .build();

    let app_result = tui_app.run(&mut terminal);
    tui::restore()?;
    info!("Bye");

    app_result
}
