use rand::Rng;
use serde::{Deserialize, Serialize};

/// An RGB color from the pin palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS hex form, e.g. "#e74c3c"
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Fixed, visually distinct palette for newly visited provinces.
pub const PALETTE: [Color; 8] = [
    Color::new(0xe7, 0x4c, 0x3c), // red
    Color::new(0xe6, 0x7e, 0x22), // orange
    Color::new(0xf1, 0xc4, 0x0f), // yellow
    Color::new(0x2e, 0xcc, 0x71), // green
    Color::new(0x1a, 0xbc, 0x9c), // teal
    Color::new(0x34, 0x98, 0xdb), // blue
    Color::new(0x9b, 0x59, 0xb6), // purple
    Color::new(0xe8, 0x4c, 0x8b), // pink
];

/// Policy seam for assigning a color to a freshly visited province.
///
/// The shipped policy resamples uniformly on every add, so re-visiting a
/// province yields a fresh color. Tests inject [`SequencePicker`].
pub trait ColorPicker: Send {
    fn pick(&mut self) -> Color;
}

/// Uniform random pick from the fixed palette.
#[derive(Default)]
pub struct RandomPicker;

impl ColorPicker for RandomPicker {
    fn pick(&mut self) -> Color {
        let idx = rand::thread_rng().gen_range(0..PALETTE.len());
        PALETTE[idx]
    }
}

/// Deterministic picker cycling through the palette in order.
#[derive(Default)]
pub struct SequencePicker {
    next: usize,
}

impl ColorPicker for SequencePicker {
    fn pick(&mut self) -> Color {
        let color = PALETTE[self.next % PALETTE.len()];
        self.next += 1;
        color
    }
}
