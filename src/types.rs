//! Type definitions and enums for the application state and navigation.

/// Enumeration of available application screens.
///
/// This enumeration holds information about the current screen of the game. This is used to
/// determine which screen to render and what actions to take based on user input.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Screen {
    /// Main menu screen of the game.
    MainMenu(MainMenuItem),
    /// Options configuration screen.
    OptionsMenu(OptionsMenuItem),
    /// Level pack selection screen.
    ///
    /// This variant represents the list of level packs found in the levels directory, plus the
    /// built-in pack when it fits the configured grid.
    PackMenu,
    /// In-game puzzle screen.
    ///
    /// This variant represents the screen where the active level is drawn and movement commands are
    /// forwarded to the engine.
    InGame,
    /// End-of-game screen.
    ///
    /// This variant is shown once the engine reports there is no level after the last solved one.
    GameComplete,
}

/// Main menu navigation options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MainMenuItem {
    /// "Start Game" menu option.
    StartGame,
    /// "Options" menu option.
    Options,
    /// "Quit" menu option.
    Quit,
}

/// Options menu navigation choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OptionsMenuItem {
    /// "Level packs" selection option.
    Packs,
    /// "Back" navigation option.
    Back,
}

/// Boxed menus drawn by the shared menu frame.
///
/// Both menus render as a centered bordered box with one line per entry; each variant carries how
/// many entries its box has to fit.
pub(crate) enum MenuType {
    /// The main menu and its entry count.
    MainMenu(u8),
    /// The options menu and its entry count.
    OptionsMenu(u8),
}

impl MenuType {
    /// Returns the title drawn on the menu border.
    pub(crate) const fn title(&self) -> &str {
        match self {
            Self::MainMenu(_) => "Main Menu",
            Self::OptionsMenu(_) => "Options Menu",
        }
    }

    /// Returns how many entry lines the menu box holds.
    pub(crate) const fn entries(&self) -> u8 {
        match self {
            Self::MainMenu(value) | Self::OptionsMenu(value) => *value,
        }
    }
}
