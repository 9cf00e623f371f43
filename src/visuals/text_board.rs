use crate::logic::hotels_game::HotelsGame;

use super::colors::{colorize, PlayerColor};
use super::ring_layout::ring_grid;

const CELL_TEXT_WIDTH: usize = 4;

/// Colour of the first player in roster order standing on the cell.
fn occupant_color(game: &HotelsGame, id: i32) -> Option<PlayerColor> {
    game.players()
        .iter()
        .enumerate()
        .find(|(_, player)| {
            game.board()
                .find_player_position(player.get_name())
                .map_or(false, |cell| cell.get_id() == id)
        })
        .map(|(index, _)| PlayerColor::for_index(index))
}

fn cell_text(game: &HotelsGame, id: i32) -> String {
    let text = format!("|{:02}|", id);
    match occupant_color(game, id) {
        Some(color) => colorize(&text, color),
        None => text,
    }
}

/// Plain text picture of the ring with a colour legend of the players.
pub fn show_board(game: &HotelsGame) -> String {
    let mut out = String::from("Players:");
    for (index, player) in game.players().iter().enumerate() {
        out.push(' ');
        out.push_str(&colorize(player.get_name(), PlayerColor::for_index(index)));
    }
    out.push_str("\n\n");

    for row in ring_grid() {
        let mut line = String::new();
        let mut written = 0;
        for (col, id) in row.iter().enumerate() {
            if let Some(id) = id {
                // pad up to the column the cell belongs to
                let start = col * (CELL_TEXT_WIDTH + 1);
                line.push_str(&" ".repeat(start - written));
                line.push_str(&cell_text(game, *id));
                written = start + CELL_TEXT_WIDTH;
            }
        }
        out.push_str(&line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::config::Config;

    #[test]
    fn test_every_cell_printed_once() {
        let game = HotelsGame::new(&Config::bundled()).unwrap();
        let board = show_board(&game);

        for id in -1..31 {
            let text = format!("|{:02}|", id);
            assert_eq!(board.matches(&text).count(), 1, "cell {}", id);
        }
    }

    #[test]
    fn test_legend_and_shape() {
        let mut game = HotelsGame::new(&Config::bundled()).unwrap();
        game.board_mut().move_player("Bob", Some(12), 0).unwrap();

        let board = show_board(&game);
        let lines: Vec<&str> = board.lines().collect();

        assert!(lines[0].starts_with("Players:"));
        for name in ["Alice", "Bob", "Carol", "Dave"] {
            assert!(lines[0].contains(name));
        }
        // legend, blank line, then 7 rows of the ring
        assert_eq!(lines.len(), 9);
        assert!(lines[2].contains("|-1|"));
        assert!(lines[3].starts_with("|30|"));
        assert!(lines[8].contains("|15|"));
        assert!(lines[5].contains("|12|"));
    }
}
