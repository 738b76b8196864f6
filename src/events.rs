//! Event handling functions for user input and application state updates.

use std::time::Duration;

use color_eyre::eyre::{OptionExt as _, Result};
use log::debug;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::{
    engine::AdvanceOutcome,
    file_loader,
    grid::Direction,
    layout::LevelPack,
    types::{MainMenuItem, OptionsMenuItem, Screen},
    App,
};

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard events and dispatches them to the appropriate handler
/// functions based on the key pressed. It uses a timeout to avoid blocking the UI, so the victory
/// cooldown keeps ticking while no key is pressed.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key(app, key.code)?;
            }
        }
    }

    if matches!(app.screen, Screen::InGame) {
        update_progression(app)?;
    }

    Ok(())
}

/// Dispatches a single key press based on the current screen.
pub(crate) fn handle_key(app: &mut App, code: KeyCode) -> Result<()> {
    match app.screen {
        Screen::InGame => handle_game_key(app, code)?,
        Screen::GameComplete => match code {
            KeyCode::Char('q') => app.exit = true,
            KeyCode::Char('l' | 'h') | KeyCode::Enter | KeyCode::Esc => {
                app.screen = Screen::MainMenu(MainMenuItem::StartGame);
            }
            _ => {}
        },
        _ => match code {
            KeyCode::Char('q') => app.exit = true,
            KeyCode::Char('j') | KeyCode::Down => handle_j_events(app)?,
            KeyCode::Char('k') | KeyCode::Up => handle_k_events(app)?,
            KeyCode::Char('l') | KeyCode::Enter => handle_l_events(app)?,
            KeyCode::Char('h') | KeyCode::Esc => handle_h_events(app),
            _ => {}
        },
    }

    Ok(())
}

/// Maps a key to the movement direction it stands for in game.
pub(crate) const fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') => Some(Direction::Right),
        _ => None,
    }
}

/// Handles key presses on the in-game screen.
///
/// Movement keys are forwarded to the engine, `r` reloads the level, `n` skips to the next one and
/// `h` or escape return to the main menu.
fn handle_game_key(app: &mut App, code: KeyCode) -> Result<()> {
    if let Some(direction) = direction_for(code) {
        let outcome = app.engine.attempt_move(direction);
        debug!("move {direction:?}: {outcome:?}");
        return Ok(());
    }

    match code {
        KeyCode::Char('q') => app.exit = true,
        KeyCode::Char('r') => {
            app.engine.reset()?;
            app.victory_timer.clear();
        }
        KeyCode::Char('n') => advance(app)?,
        KeyCode::Char('h') | KeyCode::Esc => {
            app.victory_timer.clear();
            app.screen = Screen::MainMenu(MainMenuItem::StartGame);
        }
        _ => {}
    }

    Ok(())
}

/// Advances past a solved level once the victory cooldown has elapsed.
pub(crate) fn update_progression(app: &mut App) -> Result<()> {
    if app.victory_timer.update(app.engine.is_satisfied()) {
        advance(app)?;
    }

    Ok(())
}

/// Asks the engine for the next level and switches to the end screen when there is none.
fn advance(app: &mut App) -> Result<()> {
    app.victory_timer.clear();
    if app.engine.advance()? == AdvanceOutcome::GameComplete {
        app.screen = Screen::GameComplete;
    }

    Ok(())
}

/// Handles 'j' key press events for downward navigation.
///
/// This function processes the 'j' key press which is used for moving down in menus and lists.
/// The behavior varies depending on the current screen, handling menu navigation and viewport
/// scrolling appropriately.
pub(crate) fn handle_j_events(app: &mut App) -> Result<()> {
    match app.screen {
        Screen::MainMenu(MainMenuItem::StartGame) => {
            app.screen = Screen::MainMenu(MainMenuItem::Options);
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::MainMenu(MainMenuItem::Quit);
        }
        Screen::OptionsMenu(OptionsMenuItem::Packs) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Back);
        }
        Screen::PackMenu => {
            let index = viewport_index(app)?;

            if index + 1 < app.packs.len() {
                if index + 1 >= app.viewport_offset + app.viewport_height {
                    app.viewport_offset += 1;
                }
                app.viewport_pack = app.packs.get(index + 1).cloned();
            }
        }
        _ => {}
    }

    Ok(())
}

/// Handles 'k' key press events for upward navigation.
///
/// This function processes the 'k' key press which is used for moving up in menus and lists.
/// Like the 'j' handler, behavior varies by screen and includes proper viewport management for
/// scrollable content.
pub(crate) fn handle_k_events(app: &mut App) -> Result<()> {
    match app.screen {
        Screen::MainMenu(MainMenuItem::Quit) => {
            app.screen = Screen::MainMenu(MainMenuItem::Options);
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::MainMenu(MainMenuItem::StartGame);
        }
        Screen::OptionsMenu(OptionsMenuItem::Back) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Packs);
        }
        Screen::PackMenu => {
            let index = viewport_index(app)?;

            if index > 0 {
                if index == app.viewport_offset {
                    app.viewport_offset -= 1;
                }
                app.viewport_pack = app.packs.get(index - 1).cloned();
            }
        }
        _ => {}
    }

    Ok(())
}

/// Handles 'l' key press events for selection and forward navigation.
///
/// This function processes the 'l' key press which is used for selecting menu items and moving
/// forward in the application flow. It handles screen transitions, pack discovery, and pack
/// selection.
pub(crate) fn handle_l_events(app: &mut App) -> Result<()> {
    match app.screen {
        Screen::MainMenu(MainMenuItem::StartGame) => {
            app.start_pack(app.pack.clone())?;
            app.screen = Screen::InGame;
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Packs);
        }
        Screen::MainMenu(MainMenuItem::Quit) => {
            app.exit = true;
        }
        Screen::OptionsMenu(OptionsMenuItem::Packs) => {
            let grid = app.config.grid();
            let built_in = LevelPack::default();
            app.packs.clear();
            if file_loader::validate_pack(&built_in, grid) {
                app.packs.push(built_in);
            }
            file_loader::fetch_packs(&app.config.levels_dir, grid, &mut app.packs)?;
            app.viewport_pack = app.packs.first().cloned();
            app.viewport_offset = 0;

            if app.viewport_pack.is_some() {
                app.screen = Screen::PackMenu;
            }
        }
        Screen::OptionsMenu(OptionsMenuItem::Back) => {
            app.screen = Screen::MainMenu(MainMenuItem::StartGame);
        }
        Screen::PackMenu => {
            let pack = app
                .viewport_pack
                .clone()
                .ok_or_eyre("failed to retrieve cursor-selected pack")?;
            app.start_pack(pack)?;
        }
        _ => {}
    }

    Ok(())
}

/// Handles 'h' key press events for backward navigation.
pub(crate) fn handle_h_events(app: &mut App) {
    match app.screen {
        Screen::PackMenu => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Packs);
        }
        Screen::OptionsMenu(_) => {
            app.screen = Screen::MainMenu(MainMenuItem::Options);
        }
        _ => {}
    }
}

/// Returns the index of the cursor-selected pack within the pack list.
fn viewport_index(app: &App) -> Result<usize> {
    let viewport_pack = app
        .viewport_pack
        .as_ref()
        .ok_or_eyre("failed to retrieve cursor-selected pack")?;

    app.packs
        .iter()
        .position(|pack| pack == viewport_pack)
        .ok_or_eyre("cursor-selected pack is not in the pack list")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, grid::Position};

    /// Creates an application sitting on the in-game screen of the built-in pack.
    fn in_game_app() -> App {
        let mut app = App::new(Config {
            advance_delay_ms: 0,
            ..Config::default()
        })
        .expect("default app should start");
        handle_key(&mut app, KeyCode::Enter).expect("start game should succeed");
        assert_eq!(app.screen, Screen::InGame);
        app
    }

    /// Creates a pack with a distinct key for pack menu tests.
    fn named_pack(key: &str) -> LevelPack {
        LevelPack {
            key: key.to_owned(),
            ..LevelPack::default()
        }
    }

    #[test]
    fn test_direction_for_keys() {
        assert_eq!(direction_for(KeyCode::Up), Some(Direction::Up));
        assert_eq!(direction_for(KeyCode::Char('s')), Some(Direction::Down));
        assert_eq!(direction_for(KeyCode::Char('a')), Some(Direction::Left));
        assert_eq!(direction_for(KeyCode::Right), Some(Direction::Right));
        assert_eq!(direction_for(KeyCode::Char('r')), None);
    }

    #[test]
    fn test_main_menu_navigation() {
        let mut app = App::new(Config::default()).expect("default app should start");

        handle_key(&mut app, KeyCode::Char('j')).expect("navigation should succeed");
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Options));
        handle_key(&mut app, KeyCode::Char('j')).expect("navigation should succeed");
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Quit));
        handle_key(&mut app, KeyCode::Char('k')).expect("navigation should succeed");
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Options));
        handle_key(&mut app, KeyCode::Char('l')).expect("navigation should succeed");
        assert_eq!(app.screen, Screen::OptionsMenu(OptionsMenuItem::Packs));
        handle_key(&mut app, KeyCode::Char('h')).expect("navigation should succeed");
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Options));
    }

    #[test]
    fn test_quit_from_menu() {
        let mut app = App::new(Config::default()).expect("default app should start");

        handle_key(&mut app, KeyCode::Char('q')).expect("quit should succeed");

        assert!(app.exit);
    }

    #[test]
    fn test_game_keys_move_agent() {
        let mut app = in_game_app();

        handle_key(&mut app, KeyCode::Down).expect("move should succeed");
        assert_eq!(app.engine.agent(), Position::new(1, 2));
        handle_key(&mut app, KeyCode::Char('d')).expect("move should succeed");
        assert_eq!(app.engine.agent(), Position::new(2, 2));
    }

    #[test]
    fn test_game_reset_key() {
        let mut app = in_game_app();

        handle_key(&mut app, KeyCode::Down).expect("move should succeed");
        handle_key(&mut app, KeyCode::Char('r')).expect("reset should succeed");

        assert_eq!(app.engine.agent(), Position::new(1, 1));
        assert_eq!(app.engine.moves(), 0);
    }

    #[test]
    fn test_skip_through_to_game_complete() {
        let mut app = in_game_app();

        handle_key(&mut app, KeyCode::Char('n')).expect("skip should succeed");
        handle_key(&mut app, KeyCode::Char('n')).expect("skip should succeed");
        assert_eq!(app.engine.level_index(), 2);
        assert_eq!(app.screen, Screen::InGame);

        handle_key(&mut app, KeyCode::Char('n')).expect("skip should succeed");
        assert_eq!(app.screen, Screen::GameComplete);
        assert_eq!(app.engine.level_index(), 2);

        handle_key(&mut app, KeyCode::Enter).expect("return should succeed");
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::StartGame));
    }

    #[test]
    fn test_solved_level_advances_after_cooldown() {
        let mut app = in_game_app();
        let solution = [
            KeyCode::Down,
            KeyCode::Down,
            KeyCode::Right,
            KeyCode::Right,
            KeyCode::Right,
            KeyCode::Right,
            KeyCode::Right,
            KeyCode::Up,
            KeyCode::Right,
            KeyCode::Down,
            KeyCode::Down,
        ];

        for code in solution {
            handle_key(&mut app, code).expect("move should succeed");
        }
        assert!(app.engine.is_satisfied());

        update_progression(&mut app).expect("advance should succeed");

        assert_eq!(app.engine.level_index(), 1);
        assert!(!app.engine.is_satisfied());
    }

    #[test]
    fn test_return_to_menu_from_game() {
        let mut app = in_game_app();

        handle_key(&mut app, KeyCode::Esc).expect("return should succeed");

        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::StartGame));
    }

    #[test]
    fn test_pack_menu_scrolls_viewport() {
        let mut app = App::new(Config::default()).expect("default app should start");
        app.screen = Screen::PackMenu;
        app.packs = vec![named_pack("one"), named_pack("two"), named_pack("three")];
        app.viewport_pack = app.packs.first().cloned();
        app.viewport_height = 2;

        handle_j_events(&mut app).expect("navigation should succeed");
        assert_eq!(app.viewport_pack, Some(named_pack("two")));
        assert_eq!(app.viewport_offset, 0);

        handle_j_events(&mut app).expect("navigation should succeed");
        assert_eq!(app.viewport_pack, Some(named_pack("three")));
        assert_eq!(app.viewport_offset, 1);

        handle_j_events(&mut app).expect("navigation should succeed");
        assert_eq!(app.viewport_pack, Some(named_pack("three")));
        assert_eq!(app.viewport_offset, 1);

        handle_k_events(&mut app).expect("navigation should succeed");
        assert_eq!(app.viewport_pack, Some(named_pack("two")));
        assert_eq!(app.viewport_offset, 1);

        handle_k_events(&mut app).expect("navigation should succeed");
        assert_eq!(app.viewport_pack, Some(named_pack("one")));
        assert_eq!(app.viewport_offset, 0);
    }

    #[test]
    fn test_pack_menu_select_starts_pack() {
        let mut app = App::new(Config::default()).expect("default app should start");
        app.screen = Screen::PackMenu;
        app.packs = vec![named_pack("one"), named_pack("two")];
        app.viewport_pack = Some(named_pack("two"));

        handle_l_events(&mut app).expect("selection should succeed");

        assert_eq!(app.pack.key, "two");
        assert_eq!(app.engine.level_index(), 0);
    }

    #[test]
    fn test_pack_menu_without_cursor_errors() {
        let mut app = App::new(Config::default()).expect("default app should start");
        app.screen = Screen::PackMenu;
        app.packs = vec![named_pack("one")];
        app.viewport_pack = None;

        assert!(handle_j_events(&mut app).is_err());
    }
}
