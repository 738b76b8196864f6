//! Core application state and logic for the puzzle game.

use color_eyre::eyre::{OptionExt as _, Result, WrapErr as _};
use log::info;
use ratatui::DefaultTerminal;

use crate::{
    config::Config,
    engine::Engine,
    events,
    file_loader,
    layout::LevelPack,
    loader::LevelLoader,
    timer::VictoryTimer,
    types::{MainMenuItem, Screen},
    ui,
};

/// Application state container for the puzzle game.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the game and Crossterm events will help writing to. It is the presentation
/// adapter around the [`Engine`]: it forwards commands to it and only reads its state back.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit the game but it starts off `false`.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    pub(crate) screen: Screen,
    /// Configuration the application was started with.
    pub(crate) config: Config,
    /// Currently active level pack.
    ///
    /// This field always holds a pack, either the built-in one or one loaded and selected by the
    /// user in the pack menu.
    pub(crate) pack: LevelPack,
    /// Engine running the active pack.
    pub(crate) engine: Engine,
    /// Collection of all available level packs.
    ///
    /// This field holds the built-in pack followed by every valid pack found in the levels
    /// directory the last time the pack menu was opened.
    pub(crate) packs: Vec<LevelPack>,
    /// Pack currently selected in the viewport.
    ///
    /// This field holds the pack under the user cursor in the pack menu.
    pub(crate) viewport_pack: Option<LevelPack>,
    /// Scrolling offset for the pack list viewport.
    ///
    /// This field holds the offset by which to scroll the sliding window into the
    /// [`packs`](App::packs) vector in the pack menu's viewport.
    pub(crate) viewport_offset: usize,
    /// Height of the pack list rendering area.
    ///
    /// This field holds the height of the area in which the list of packs is rendered as a measure
    /// of terminal cells during the last redraw of the on-screen frame.
    pub(crate) viewport_height: usize,
    /// Cooldown between a solved level and the automatic advance.
    pub(crate) victory_timer: VictoryTimer,
}

impl App {
    /// Creates a new application.
    ///
    /// The built-in pack is started when it fits the configured grid. Otherwise the first valid pack
    /// found in the levels directory is used instead.
    ///
    /// # Errors
    ///
    /// Returns an error if no pack fits the configured grid or the levels directory cannot be read
    /// while looking for one.
    pub fn new(config: Config) -> Result<Self> {
        let pack = Self::initial_pack(&config)?;
        let engine = Self::engine_for(&pack, &config)?;

        Ok(Self {
            exit: false,
            screen: Screen::MainMenu(MainMenuItem::StartGame),
            victory_timer: VictoryTimer::new(config.advance_delay()),
            config,
            pack,
            engine,
            packs: Vec::new(),
            viewport_pack: None,
            viewport_offset: 0,
            viewport_height: 0,
        })
    }

    /// Runs the main loop of the application.
    ///
    /// This function handles user input and updates the application state. The loop continues until
    /// the exit condition is `true`, after which the function returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    /// - [`crate::loader::LoadError`] if a level of the active pack fails to load
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| {
                ui::draw(self, frame)
                    .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))
            })?;
            events::handle_events(self)?;
        }

        Ok(())
    }

    /// Makes `pack` the active pack and restarts it from its first level.
    ///
    /// # Errors
    ///
    /// Returns an error if the first level of the pack cannot be loaded.
    pub(crate) fn start_pack(&mut self, pack: LevelPack) -> Result<()> {
        self.engine = Self::engine_for(&pack, &self.config)?;
        info!("starting level pack {}", pack.key);
        self.pack = pack;
        self.victory_timer.clear();

        Ok(())
    }

    /// Picks the pack played when the application starts.
    fn initial_pack(config: &Config) -> Result<LevelPack> {
        let pack = LevelPack::default();
        if file_loader::validate_pack(&pack, config.grid()) {
            return Ok(pack);
        }

        let mut packs = Vec::new();
        file_loader::fetch_packs(&config.levels_dir, config.grid(), &mut packs)?;
        packs
            .into_iter()
            .next()
            .ok_or_eyre("no level pack fits the configured grid")
    }

    /// Builds an engine over a pack using the configured grid.
    fn engine_for(pack: &LevelPack, config: &Config) -> Result<Engine> {
        let loader = LevelLoader::new(config.grid(), pack.layouts.clone());
        Engine::new(loader).wrap_err_with(|| format!("failed to start level pack {}", pack.key))
    }
}
