use ratatui::style::{palette::tailwind, Color};

pub const INFO_TEXT: [&str; 2] = [
    "(q) quit | (←↑↓→) move | (Enter) chart | (d) detail | (/) search",
    "(f) filter | (s) sort | (u) upload archive | (Esc) close/back",
];

pub const TITLE: &str = "Top 10 Cryptocurrencies";

pub const POLL_DURATION_MS: u64 = 50;
pub const NOTICE_DURATION_MS: u64 = 4000;

/// Cards per row in the coin grid.
pub const GRID_COLUMNS: usize = 4;
pub const CARD_HEIGHT: u16 = 7;

pub const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

pub const GAIN_COLOR: Color = tailwind::EMERALD.c400;
pub const LOSS_COLOR: Color = tailwind::RED.c400;
pub const ACCENT_COLOR: Color = tailwind::BLUE.c400;
pub const MUTED_COLOR: Color = tailwind::SLATE.c500;
pub const CHART_COLOR: Color = Color::Rgb(75, 192, 192);
