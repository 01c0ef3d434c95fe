//! Shared constants for the salon crate.

// ── Tolerances ──────────────────────────────────────────────────

/// Default allowed horizontal deviation, in normalized board units.
pub const DEFAULT_TOLERANCE_X: f64 = 0.02;

/// Default allowed vertical deviation, in normalized board units.
pub const DEFAULT_TOLERANCE_Y: f64 = 0.02;

/// Default allowed rotation deviation, in degrees.
pub const DEFAULT_TOLERANCE_ROTATION: f64 = 10.0;

/// Default allowed scale deviation, as an absolute fraction.
pub const DEFAULT_TOLERANCE_SCALE: f64 = 0.05;

/// Slack added to every tolerance comparison so that a placement exactly on
/// the boundary survives floating-point subtraction error.
pub const TOLERANCE_EPSILON: f64 = 1e-9;

// ── Stickers ────────────────────────────────────────────────────

/// Scale given to a sticker whose definition names none.
pub const DEFAULT_STICKER_SCALE: f64 = 0.35;

/// Rotation step applied by a tap on a placed sticker, in degrees.
pub const NUDGE_ROTATION_DEG: f64 = 15.0;

// ── Paint ───────────────────────────────────────────────────────

/// Bare-nail color every nail starts with.
pub const NATURAL_NAIL_COLOR: &str = "#F5E6D3";

/// A named paint color offered by the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteColor {
    pub name: &'static str,
    pub value: &'static str,
}

/// Paint colors in palette order. The first entry is selected on every reset.
pub const PALETTE: &[PaletteColor] = &[
    PaletteColor { name: "Hot pink", value: "#f06292" },
    PaletteColor { name: "Glossy pink", value: "#f48fb1" },
    PaletteColor { name: "Candy pink", value: "#ffb3c1" },
    PaletteColor { name: "Powder pink", value: "#fce4ec" },
    PaletteColor { name: "Turquoise", value: "#7ae0c5" },
    PaletteColor { name: "Mint", value: "#9bf6e6" },
    PaletteColor { name: "Sky blue", value: "#7ad6ff" },
    PaletteColor { name: "Peach", value: "#ffcc80" },
    PaletteColor { name: "Golden peach", value: "#ffd6a5" },
    PaletteColor { name: "Strawberry", value: "#f28cb0" },
    PaletteColor { name: "Cotton pink", value: "#f5c1d8" },
    PaletteColor { name: "Ice blue", value: "#bde0fe" },
];

// ── Timer ───────────────────────────────────────────────────────

/// Interval at which hosts are expected to deliver `Tick` events.
pub const TICK_INTERVAL_MS: u64 = 500;

// ── Persistence ─────────────────────────────────────────────────

/// Storage slot holding the remaining play order.
pub const QUEUE_SLOT: &str = "nail-art-queue";

/// Storage slot holding per-task statistics.
pub const STATS_SLOT: &str = "nail-art-stats";

/// Storage slot holding the full session snapshot for resume-after-close.
pub const SESSION_SLOT: &str = "nail-art-session";
