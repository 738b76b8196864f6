//! User interface rendering functions for all application screens.

use std::rc::Rc;

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::{block::FULL, DOT},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::{
    engine::{Engine, EntityKind},
    grid::Position,
    layout::LevelPack,
    types::{MainMenuItem, MenuType, OptionsMenuItem, Screen},
    App,
};

/// Terminal columns used to draw a single grid cell.
const CELL_WIDTH: usize = 2;

/// Updates the application UI based on the persistent state.
///
/// This function renders different screens based on the current state stored in the [`App`]
/// structure, dispatching to the appropriate rendering function for each screen type.
///
/// # Errors
///
/// This function may return errors from drawing operations or data conversion failures.
pub(crate) fn draw(app: &mut App, frame: &mut Frame) -> Result<()> {
    match &app.screen {
        Screen::MainMenu(item) => main_menu(frame, *item),
        Screen::OptionsMenu(item) => options_menu(frame, *item),
        Screen::PackMenu => pack_menu(app, frame)?,
        Screen::InGame => in_game(app, frame)?,
        Screen::GameComplete => game_complete(app, frame),
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Renders the generic layout structure for the main and options menus.
///
/// This function creates the common layout and block structure used by both main and options menus.
/// The generic part includes the centered positioning and border styling, while the specific menu
/// content is handled by the caller using the [`MenuType`] parameter.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn init_menu(frame: &mut Frame, menu: MenuType) -> Rc<[Rect]> {
    let space = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(40),
    ])
    .split(frame.area())[1];
    let space = Layout::horizontal([
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(40),
    ])
    .split(space)[1];

    let layout = Layout::vertical([Constraint::Max(u16::from(menu.entries() + 2))])
        .flex(Flex::Center)
        .split(space)[0];

    let block = Block::bordered()
        .title(menu.title())
        .title_bottom("(j) down / (k) up / (l) select")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(block, layout);

    Layout::vertical(vec![Constraint::Max(1); usize::from(menu.entries())]).split(inner_space)
}

/// Renders a vertical list of menu entries, highlighting the active one.
fn menu_entries(frame: &mut Frame, area: &[Rect], entries: &[(&str, bool)]) {
    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    for (slot, (label, active)) in area.iter().zip(entries) {
        let style = if *active {
            active_content_style
        } else {
            content_style
        };
        frame.render_widget(Line::raw(*label).centered().style(style), *slot);
    }
}

/// Renders the main menu screen with navigation options.
pub(crate) fn main_menu(frame: &mut Frame, item: MainMenuItem) {
    clear(frame);

    let inner_layout = init_menu(frame, MenuType::MainMenu(3));

    menu_entries(
        frame,
        &inner_layout,
        &[
            ("Start Game", item == MainMenuItem::StartGame),
            ("Options", item == MainMenuItem::Options),
            ("Quit", item == MainMenuItem::Quit),
        ],
    );
}

/// Renders the options menu screen with configuration choices.
pub(crate) fn options_menu(frame: &mut Frame, item: OptionsMenuItem) {
    clear(frame);

    let inner_layout = init_menu(frame, MenuType::OptionsMenu(2));

    menu_entries(
        frame,
        &inner_layout,
        &[
            ("Level packs", item == OptionsMenuItem::Packs),
            ("Return", item == OptionsMenuItem::Back),
        ],
    );
}

/// Renders the pack selection menu with a scrollable list of available level packs.
///
/// This function displays a viewport containing the built-in pack and every valid pack found in
/// the levels directory. A dot marks the pack that is currently active.
///
/// # Errors
///
/// This function may return errors if the viewport pack cannot be retrieved.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn pack_menu(app: &mut App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let space = Layout::horizontal([
        Constraint::Percentage(30),
        Constraint::Fill(1),
        Constraint::Percentage(30),
    ])
    .split(frame.area())[1];
    let space = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Fill(1),
        Constraint::Percentage(40),
    ])
    .split(space)[1];

    let block = Block::bordered()
        .title_top("Level packs")
        .title_bottom("(j) down / (k) up / (l) select / (h) return")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(space);

    frame.render_widget(block, space);

    app.viewport_height = inner_space.height.into();

    let inner_layout = Layout::horizontal([Constraint::Percentage(5), Constraint::Percentage(100)])
        .split(inner_space);
    let inner_selector = Layout::vertical(vec![Constraint::Max(1); inner_space.height.into()])
        .split(inner_layout[0]);
    let inner_list = Layout::vertical(vec![Constraint::Max(1); inner_space.height.into()])
        .split(inner_layout[1]);

    let viewport_pack = app
        .viewport_pack
        .clone()
        .ok_or_eyre("failed to retrieve cursor-selected pack")?;
    let viewport_packs: Vec<&LevelPack> = app
        .packs
        .iter()
        .skip(app.viewport_offset)
        .take(app.viewport_height)
        .collect();

    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    for ((pack, selector_area), entry_area) in viewport_packs
        .into_iter()
        .zip(inner_selector.iter())
        .zip(inner_list.iter())
    {
        let style = if *pack == viewport_pack {
            active_content_style
        } else {
            content_style
        };
        let marker = if *pack == app.pack { DOT } else { " " };

        frame.render_widget(Line::styled(marker, style).centered(), *selector_area);
        frame.render_widget(
            Line::styled(
                format!("{} ({} levels)", pack.key, pack.layouts.len()),
                style,
            ),
            *entry_area,
        );
    }

    Ok(())
}

/// Returns the glyph and style used to draw a single grid cell.
fn cell_span(engine: &Engine, position: Position) -> Span<'static> {
    let on_target = engine.target() == position;
    let target_color = if engine.is_satisfied() {
        Color::Green
    } else {
        Color::Magenta
    };

    match engine.entity_at(position) {
        Some(EntityKind::Agent) => Span::styled(
            "()",
            Style::default()
                .fg(Color::Cyan)
                .bg(if on_target { target_color } else { Color::Reset })
                .add_modifier(Modifier::BOLD),
        ),
        Some(EntityKind::Movable) => Span::styled(
            "[]",
            Style::default()
                .fg(if on_target { Color::Black } else { Color::Yellow })
                .bg(if on_target { target_color } else { Color::Reset }),
        ),
        Some(EntityKind::Immovable) => {
            Span::styled(FULL.repeat(CELL_WIDTH), Style::default().fg(Color::Gray))
        }
        None if on_target => Span::styled("<>", Style::default().fg(target_color)),
        None => Span::styled(format!(" {DOT}"), Style::default().fg(Color::DarkGray)),
    }
}

/// Builds the rows of text that make up the board of the active level.
pub(crate) fn board_lines(engine: &Engine) -> Vec<Line<'static>> {
    let grid = engine.grid();

    (0..grid.rows)
        .map(|row| {
            Line::from(
                (0..grid.columns)
                    .map(|col| cell_span(engine, Position::new(col, row)))
                    .collect::<Vec<_>>(),
            )
        })
        .collect()
}

/// Renders the in-game screen with the board, the level counter and the controls.
///
/// The board is centered in the frame inside a bordered block titled with the level counter and
/// the move and push counters. The line above the board names the active pack, or shows a banner
/// once the level is solved.
///
/// # Errors
///
/// This function may return errors from layout conversion operations.
pub(crate) fn in_game(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let engine = &app.engine;
    let grid = engine.grid();
    let board_width = u16::try_from(grid.columns * CELL_WIDTH + 2)?;
    let board_height = u16::try_from(grid.rows + 2)?;

    let overall_layout = Layout::vertical([
        Constraint::Min(1),    // Board and padding area
        Constraint::Length(3), // Tooltip block
    ])
    .split(frame.area());

    let board_content_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get board content area from layout")?;
    let tooltip_full_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get tooltip area from layout")?;

    let main_layout = Layout::vertical([
        Constraint::Length(1),            // Status line
        Constraint::Length(board_height), // Board
    ])
    .flex(Flex::Center)
    .split(board_content_area);

    let status_area = *main_layout
        .first()
        .ok_or_eyre("failed to get status area from layout")?;
    let board_area = main_layout
        .get(1)
        .copied()
        .ok_or_eyre("failed to get board area from layout")?;
    let board_area = Layout::horizontal([Constraint::Length(board_width)])
        .flex(Flex::Center)
        .split(board_area)
        .first()
        .copied()
        .ok_or_eyre("failed to get board space from horizontal layout")?;

    let status = if engine.is_satisfied() {
        Line::styled(
            if app.victory_timer.is_armed() {
                "Solved! Next level coming up"
            } else {
                "Solved!"
            },
            Style::default()
                .fg(Color::White)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Line::styled(app.pack.key.clone(), Style::default().fg(Color::Green))
    };
    frame.render_widget(status.centered(), status_area);

    let block = Block::bordered()
        .title_top(
            Line::from(format!(
                "Level {}/{}",
                engine.level_index() + 1,
                engine.level_count()
            ))
            .centered(),
        )
        .title_bottom(
            Line::from(format!(
                "moves {} / pushes {}",
                engine.moves(),
                engine.pushes()
            ))
            .centered(),
        )
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Rounded);

    frame.render_widget(Paragraph::new(board_lines(engine)).block(block), board_area);

    let tooltip_block = Block::bordered()
        .title("(arrows/wasd) move / (r) reset / (n) skip / (h) menu / (q) quit")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);

    frame.render_widget(tooltip_block, tooltip_full_area);

    Ok(())
}

/// Renders the end-of-game screen shown once the last level has been passed.
pub(crate) fn game_complete(app: &App, frame: &mut Frame) {
    clear(frame);

    let area = Layout::vertical([Constraint::Length(5)])
        .flex(Flex::Center)
        .split(frame.area());
    let Some(area) = area.first() else {
        return;
    };

    let block = Block::bordered()
        .title("Game complete!")
        .title_bottom("(l) main menu / (q) quit")
        .title_alignment(Alignment::Center)
        .style(Color::Yellow)
        .border_type(BorderType::Double);
    let text = vec![
        Line::raw(format!("You cleared every level of {}.", app.pack.key)).centered(),
        Line::raw(format!("{} levels", app.engine.level_count())).centered(),
    ];

    frame.render_widget(Paragraph::new(text).block(block), *area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, grid::Direction};
    use ratatui::{backend::TestBackend, Terminal};

    /// Creates a minimal test app for UI testing.
    fn create_test_app() -> App {
        App::new(Config::default()).expect("default app should start")
    }

    /// Creates a test terminal with known dimensions for UI testing.
    fn create_test_terminal() -> Terminal<TestBackend> {
        let backend = TestBackend::new(80, 24);
        Terminal::new(backend).expect("failed to create test terminal")
    }

    /// Flattens the rendered buffer into a single string for content checks.
    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_draw_main_menu() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            draw(&mut app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing main menu should succeed");
        assert!(buffer_text(&terminal).contains("Start Game"));
    }

    #[test]
    fn test_draw_options_menu() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();
        app.screen = Screen::OptionsMenu(OptionsMenuItem::Packs);

        let result = terminal.draw(|frame| {
            draw(&mut app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing options menu should succeed");
        assert!(buffer_text(&terminal).contains("Level packs"));
    }

    #[test]
    fn test_draw_pack_menu() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();
        app.screen = Screen::PackMenu;
        app.packs = vec![LevelPack::default()];
        app.viewport_pack = app.packs.first().cloned();

        let result = terminal.draw(|frame| {
            draw(&mut app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing pack menu should succeed");
        assert!(buffer_text(&terminal).contains("Default (3 levels)"));
        assert!(app.viewport_height > 0);
    }

    #[test]
    fn test_pack_menu_empty_viewport_pack_error() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();
        app.packs = vec![LevelPack::default()];
        app.viewport_pack = None;

        let result = terminal.draw(|frame| {
            let pack_result = pack_menu(&mut app, frame);
            assert!(
                pack_result.is_err(),
                "pack menu should fail with empty viewport_pack"
            );
        });

        assert!(
            result.is_ok(),
            "terminal drawing should succeed even if pack_menu fails"
        );
    }

    #[test]
    fn test_draw_in_game() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();
        app.screen = Screen::InGame;

        let result = terminal.draw(|frame| {
            draw(&mut app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing in-game screen should succeed");
        let text = buffer_text(&terminal);
        assert!(text.contains("Level 1/3"));
        assert!(text.contains("moves 0 / pushes 0"));
        assert!(!text.contains("Solved!"));
    }

    #[test]
    fn test_draw_in_game_solved_banner() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();
        app.screen = Screen::InGame;
        for direction in [
            Direction::Down,
            Direction::Down,
            Direction::Right,
            Direction::Right,
            Direction::Right,
            Direction::Right,
            Direction::Right,
            Direction::Up,
            Direction::Right,
            Direction::Down,
            Direction::Down,
        ] {
            let _ = app.engine.attempt_move(direction);
        }

        let result = terminal.draw(|frame| {
            draw(&mut app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing solved level should succeed");
        assert!(buffer_text(&terminal).contains("Solved!"));
    }

    #[test]
    fn test_in_game_too_small_terminal() {
        let mut app = create_test_app();
        let mut terminal = Terminal::new(TestBackend::new(10, 5)).expect("failed to create test terminal");
        app.screen = Screen::InGame;

        let result = terminal.draw(|frame| {
            in_game(&app, frame).expect("in-game should render in a cramped terminal");
        });

        assert!(result.is_ok(), "rendering should clip rather than fail");
    }

    #[test]
    fn test_draw_game_complete() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();
        app.screen = Screen::GameComplete;

        let result = terminal.draw(|frame| {
            draw(&mut app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing end screen should succeed");
        assert!(buffer_text(&terminal).contains("Game complete!"));
    }

    #[test]
    fn test_board_lines_dimensions() {
        let app = create_test_app();
        let lines = board_lines(&app.engine);

        assert_eq!(lines.len(), 10);
        for line in &lines {
            assert_eq!(line.width(), 10 * CELL_WIDTH);
        }
    }

    #[test]
    fn test_board_lines_glyphs() {
        let app = create_test_app();
        let lines = board_lines(&app.engine);
        let row = |index: usize| {
            lines
                .get(index)
                .map(|line| {
                    line.spans
                        .iter()
                        .map(|span| span.content.as_ref())
                        .collect::<String>()
                })
                .expect("row should exist")
        };

        assert!(row(1).starts_with(&format!("{}()", FULL.repeat(CELL_WIDTH))));
        assert!(row(3).contains("[]"));
        assert!(row(5).contains("<>"));
    }

    #[test]
    fn test_init_menu_main_menu() {
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            let layout = init_menu(frame, MenuType::MainMenu(3));
            assert_eq!(layout.len(), 3, "main menu should have 3 items");
        });

        assert!(result.is_ok(), "initializing main menu should succeed");
    }

    #[test]
    fn test_init_menu_options_menu() {
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            let layout = init_menu(frame, MenuType::OptionsMenu(2));
            assert_eq!(layout.len(), 2, "options menu should have 2 items");
        });

        assert!(result.is_ok(), "initializing options menu should succeed");
    }
}
