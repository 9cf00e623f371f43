use std::io::Result;

use crossterm::event::{self, KeyCode, KeyEventKind};
use log::warn;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols::border,
    text::{Line, Span, Text},
    widgets::{block::Title, Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::logic::hotels_game::HotelsGame;

use super::colors::PlayerColor;
use super::ring_layout::{ring_grid, RING_COLS, RING_ROWS};

/// Size of `count` cells plus padding on both sides, clipped to what is available.
fn grid_extent(cell: u16, count: usize, padding: u16, available: u16) -> u16 {
    let count = u16::try_from(count).unwrap_or(u16::MAX);
    cell.saturating_mul(count)
        .saturating_add(padding.saturating_mul(2))
        .min(available)
}

struct InnerRects {
    game_board: Rect,
    players: Rect,
    hotels: Rect,
    status: Rect,
}

#[derive(typed_builder::TypedBuilder)]
pub struct TuiApp {
    cell_width: u16,
    cell_height: u16,
    hotels_game: HotelsGame,
    exit: bool,
    #[builder(default = String::from("space: roll, b: buy, u: upgrade, n: end turn, q: quit"))]
    status: String,
    #[builder(default)]
    rolled: bool,
}

impl TuiApp {
    pub fn run(&mut self, terminal: &mut super::tui::Tui) -> Result<()> {
        while !self.exit {
            terminal.draw(|frame| self.render_frame(frame))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn render_frame(&self, frame: &mut Frame) {
        let inner_rects = self.split_rects(frame.size());
        self.render_game_board(inner_rects.game_board, frame);
        self.render_players(inner_rects.players, frame);
        self.render_hotels(inner_rects.hotels, frame);
        self.render_status(inner_rects.status, frame);
    }

    fn handle_events(&mut self) -> Result<()> {
        if let event::Event::Key(event) = event::read()? {
            match (event.code, event.kind) {
                (KeyCode::Char('q'), KeyEventKind::Press) => self.exit = true,
                (KeyCode::Char(' '), KeyEventKind::Press) => self.roll(),
                (KeyCode::Char('b'), KeyEventKind::Press) => self.buy_nearby_land(),
                (KeyCode::Char('u'), KeyEventKind::Press) => self.upgrade_nearby_hotel(),
                (KeyCode::Char('n'), KeyEventKind::Press) => self.end_turn(),
                _ => {}
            }
        }
        Ok(())
    }

    fn current_name(&self) -> Option<String> {
        self.hotels_game
            .current_player()
            .map(|player| player.get_name().to_string())
    }

    fn hotels_near_current(&self) -> Vec<String> {
        self.current_name()
            .and_then(|name| self.hotels_game.board().find_player_position(&name).ok())
            .map(|cell| cell.get_hotels_near().to_vec())
            .unwrap_or_default()
    }

    fn roll(&mut self) {
        let Some(name) = self.current_name() else {
            self.status = "Nobody left to play".to_string();
            return;
        };
        if self.rolled {
            self.status = format!("{} already rolled, n: end turn", name);
            return;
        }

        self.status = match self.hotels_game.roll_and_move(&name, &mut rand::thread_rng()) {
            Ok((roll, landed)) => {
                self.rolled = true;
                format!("{} rolled {} and landed on {}", name, roll, landed)
            }
            Err(err) => {
                warn!("{} could not move: {}", name, err);
                err.to_string()
            }
        };
        self.show_messages(&name);
    }

    fn buy_nearby_land(&mut self) {
        let Some(name) = self.current_name() else {
            return;
        };
        let unowned = self.hotels_near_current().into_iter().find(|hotel| {
            self.hotels_game
                .get_hotel(hotel)
                .map_or(false, |hotel| hotel.get_owner().is_none())
        });

        self.status = match unowned {
            Some(hotel) => match self.hotels_game.buy_land(&name, &hotel) {
                Ok(()) => format!("{} bought {}", name, hotel),
                Err(err) => err.to_string(),
            },
            None => "No free land here".to_string(),
        };
        self.show_messages(&name);
    }

    fn upgrade_nearby_hotel(&mut self) {
        let Some(name) = self.current_name() else {
            return;
        };
        let target = self.hotels_near_current().into_iter().find_map(|hotel| {
            let offer = self
                .hotels_game
                .get_hotel(&hotel)
                .ok()
                .filter(|h| h.get_owner() == Some(name.as_str()))?
                .get_upgrade_costs()
                .into_iter()
                .next()?;
            Some((hotel, offer.name))
        });

        self.status = match target {
            Some((hotel, upgrade)) => match self.hotels_game.build_upgrade(&name, &hotel, &upgrade) {
                Ok(cost) => format!("{} built {} on {} for ${}", name, upgrade, hotel, cost),
                Err(err) => err.to_string(),
            },
            None => "Nothing to build here".to_string(),
        };
        self.show_messages(&name);
    }

    /// Shows what the game told a human player, if anything.
    fn show_messages(&mut self, name: &str) {
        let messages = self.hotels_game.take_messages(name).unwrap_or_default();
        if !messages.is_empty() {
            self.status = messages.join(" / ");
        }
    }

    fn end_turn(&mut self) {
        self.hotels_game.next_turn();
        self.rolled = false;
        if let Some(name) = self.current_name() {
            self.status = format!("{} to play", name);
        }
    }

    fn split_rects(&self, rect: Rect) -> InnerRects {
        let side_width = self.cell_width.saturating_mul(5).min(rect.width);
        let status_height = 3u16.min(rect.height);
        let game_board_width = rect.width - side_width;
        let game_board_height = rect.height - status_height;

        let game_board = Rect {
            x: rect.x,
            y: rect.y,
            width: game_board_width,
            height: game_board_height,
        };

        let players = Rect {
            x: game_board.right(),
            y: rect.y,
            width: side_width,
            height: game_board_height / 2,
        };

        let hotels = Rect {
            x: game_board.right(),
            y: players.bottom(),
            width: side_width,
            height: game_board_height - players.height,
        };

        let status = Rect {
            x: rect.x,
            y: game_board.bottom(),
            width: rect.width,
            height: status_height,
        };

        InnerRects {
            game_board,
            players,
            hotels,
            status,
        }
    }

    fn titled_block(title: &str) -> Block {
        let title = Title::from(Span::styled(
            format!(" {} ", title),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        Block::default()
            .title(title.alignment(Alignment::Center))
            .borders(Borders::ALL)
            .border_set(border::THICK)
            .border_type(BorderType::Rounded)
    }

    fn render_game_board(&self, area: Rect, frame: &mut Frame) -> Rect {
        let block = Self::titled_block("Board");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let cell_width = self.cell_width;
        let cell_height = self.cell_height;
        let padding = 1;

        let grid_width = grid_extent(cell_width, RING_COLS, padding, inner.width);
        let grid_height = grid_extent(cell_height, RING_ROWS, padding, inner.height);

        let row_constraints = std::iter::repeat(Constraint::Length(cell_height))
            .take(RING_ROWS)
            .collect::<Vec<_>>();

        let col_constraints = std::iter::repeat(Constraint::Length(cell_width))
            .take(RING_COLS)
            .collect::<Vec<_>>();

        let (center_x, center_y) = (inner.x + inner.width / 2, inner.y + inner.height / 2);
        let board_rect = Rect {
            x: center_x - grid_width / 2,
            y: center_y - grid_height / 2,
            width: grid_width,
            height: grid_height,
        };

        let row_rects = Layout::default()
            .direction(Direction::Vertical)
            .vertical_margin(1)
            .horizontal_margin(0)
            .constraints(row_constraints)
            .split(board_rect);

        let grid = ring_grid();
        for (r, row_rect) in row_rects.iter().enumerate() {
            let col_rects = Layout::default()
                .direction(Direction::Horizontal)
                .vertical_margin(0)
                .horizontal_margin(1)
                .constraints(col_constraints.clone())
                .split(*row_rect);

            for (c, cell_rect) in col_rects.iter().enumerate() {
                let Some(id) = grid[r][c] else {
                    continue;
                };

                let occupants = self.occupants_of(id);
                let initials: String = occupants
                    .iter()
                    .filter_map(|(name, _)| name.chars().next())
                    .collect();

                // 1 line for the text, 1 line each for the top and bottom of the cell
                let num_pad_lines = (cell_height as usize).saturating_sub(3);
                let pad_line = " ".repeat(cell_width.into());
                let text = std::iter::repeat(pad_line.clone())
                    .take(num_pad_lines / 2)
                    .chain(std::iter::once(format!("{:02}{}", id, initials)))
                    .chain(std::iter::repeat(pad_line).take(num_pad_lines / 2))
                    .collect::<Vec<_>>()
                    .join("\n");

                let style = match occupants.first() {
                    Some((_, color)) => Style::default().fg(Color::Black).bg(color.to_ratatui()),
                    None => self.get_cell_text_style(),
                };

                let cell_text = Paragraph::new(text)
                    .block(self.get_cell_block(style))
                    .style(style)
                    .alignment(Alignment::Center);
                frame.render_widget(cell_text, *cell_rect);
            }
        }
        inner
    }

    fn occupants_of(&self, id: i32) -> Vec<(&str, PlayerColor)> {
        let board = self.hotels_game.board();
        self.hotels_game
            .players()
            .iter()
            .enumerate()
            .filter(|(_, player)| {
                board
                    .find_player_position(player.get_name())
                    .map_or(false, |cell| cell.get_id() == id)
            })
            .map(|(index, player)| (player.get_name(), PlayerColor::for_index(index)))
            .collect()
    }

    fn get_cell_block(&self, style: Style) -> Block {
        Block::default()
            .borders(Borders::ALL)
            .style(style)
            .border_type(BorderType::Rounded)
    }

    fn get_cell_text_style(&self) -> Style {
        Style::default().fg(Color::White).bg(Color::Black)
    }

    fn render_players(&self, area: Rect, frame: &mut Frame) {
        let block = Self::titled_block("Players");
        let board = self.hotels_game.board();
        let current = self
            .hotels_game
            .current_player()
            .map(|player| player.get_name().to_string());

        let lines: Vec<Line> = self
            .hotels_game
            .players()
            .iter()
            .enumerate()
            .map(|(index, player)| {
                let marker = match current.as_deref() == Some(player.get_name()) {
                    true => "> ",
                    false => "  ",
                };
                let position = board
                    .find_player_position(player.get_name())
                    .map(|cell| format!("{:02}", cell.get_id()))
                    .unwrap_or_else(|_| "--".to_string());
                let mut spans = vec![
                    Span::raw(marker),
                    Span::styled(
                        player.get_name().to_string(),
                        Style::default().fg(PlayerColor::for_index(index).to_ratatui()),
                    ),
                    Span::raw(format!(" ${} @{}", player.get_money(), position)),
                ];
                if player.is_broke() {
                    spans.push(" broke".red());
                }
                Line::from(spans)
            })
            .collect();

        frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
    }

    fn render_hotels(&self, area: Rect, frame: &mut Frame) {
        let block = Self::titled_block("Hotels");

        let lines: Vec<Line> = self
            .hotels_game
            .hotels()
            .map(|hotel| {
                Line::from(format!(
                    "{} {} {}*",
                    hotel.get_name(),
                    hotel.get_owner().unwrap_or("-"),
                    hotel.get_star_level()
                ))
            })
            .collect();

        frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
    }

    fn render_status(&self, area: Rect, frame: &mut Frame) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded);
        frame.render_widget(
            Paragraph::new(self.status.as_str())
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::config::Config;

    fn app(cell_width: u16, cell_height: u16) -> TuiApp {
        TuiApp::builder()
            .cell_width(cell_width)
            .cell_height(cell_height)
            .hotels_game(HotelsGame::new(&Config::bundled()).unwrap())
            .exit(false)
            .build()
    }

    #[test]
    fn test_grid_extent() {
        assert_eq!(grid_extent(6, RING_COLS, 1, 200), 68);
        assert_eq!(grid_extent(6, RING_COLS, 1, 40), 40);
        assert_eq!(grid_extent(u16::MAX, RING_COLS, 1, 120), 120);
        assert_eq!(grid_extent(u16::MAX, RING_ROWS, u16::MAX, u16::MAX), u16::MAX);
    }

    #[test]
    fn test_split_rects_with_huge_cells() {
        let area = Rect::new(0, 0, 120, 40);
        let rects = app(u16::MAX, u16::MAX).split_rects(area);

        assert_eq!(rects.players.width, 120);
        assert_eq!(rects.game_board.width, 0);
        assert_eq!(rects.status.height, 3);
        assert_eq!(rects.hotels.bottom(), rects.game_board.bottom());
    }

    #[test]
    fn test_rolling_shows_human_messages() {
        let mut tui_app = app(6, 3);

        // Alice is the human player in the bundled game
        tui_app.roll();
        assert!(tui_app.status.starts_with("Rolled "));
        assert!(tui_app.rolled);
        assert!(tui_app.hotels_game.take_messages("Alice").unwrap().is_empty());

        tui_app.end_turn();
        assert_eq!(tui_app.status, "Bob to play");
        tui_app.roll();
        assert!(tui_app.status.starts_with("Bob rolled "));
    }
}
