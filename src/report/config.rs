//! Report configuration
//!
//! Controls verbosity, colour and timing output of the console reporter and progress observers.

use std::io::IsTerminal;

/// Terminals known to render ANSI colour codes.
pub const COLOR_TERMINALS: [&str; 11] = [
    "xterm",
    "xterm-color",
    "xterm-256color",
    "screen",
    "screen-256color",
    "tmux",
    "tmux-256color",
    "rxvt-unicode",
    "rxvt-unicode-256color",
    "linux",
    "cygwin",
];

/// When to emit ANSI colour codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorChoice {
    /// Colour when stdout is a colour-capable terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Resolve against the current process: stdout and `TERM`.
    pub fn enabled(self) -> bool {
        let term = std::env::var("TERM").ok();
        self.enabled_for(std::io::stdout().is_terminal(), term.as_deref())
    }

    /// Resolve against an explicit environment.
    pub fn enabled_for(self, is_terminal: bool, term: Option<&str>) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => is_terminal && term.is_some_and(|term| COLOR_TERMINALS.contains(&term)),
        }
    }
}

/// Report configuration
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// List passed and skipped tests, not only failures and errors
    pub verbose: bool,
    /// Colour policy
    pub color: ColorChoice,
    /// Print elapsed times next to scenarios and tests
    pub show_timings: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            color: ColorChoice::Auto,
            show_timings: true,
        }
    }
}

impl ReportConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    pub fn with_show_timings(mut self, show_timings: bool) -> Self {
        self.show_timings = show_timings;
        self
    }
}
