//! Drifting vacation glyphs behind the loading screen.

use rand::Rng;

const GLYPHS: [&str; 10] = ["🌴", "☀️", "🏖️", "✈️", "🌺", "🍹", "⛱️", "🌊", "🎉", "🎊"];

#[derive(Debug, Clone, PartialEq)]
pub struct Floater {
    pub glyph: &'static str,
    /// Horizontal position, 0.0 (left) to 1.0 (right).
    pub x: f32,
    /// Vertical position, 0.0 (top) to 1.0 (bottom).
    pub y: f32,
    /// Upward drift per tick.
    pub speed: f32,
}

#[derive(Debug, Clone, Default)]
pub struct FloatingField {
    pub floaters: Vec<Floater>,
}

impl FloatingField {
    pub fn new(count: usize) -> Self {
        let mut rng = rand::thread_rng();
        let floaters = (0..count)
            .map(|_| Floater {
                glyph: GLYPHS[rng.gen_range(0..GLYPHS.len())],
                x: rng.gen_range(0.0..1.0),
                y: rng.gen_range(0.0..1.0),
                speed: rng.gen_range(0.002..0.01),
            })
            .collect();
        Self { floaters }
    }

    /// Drift everything upwards, wrapping back to the bottom.
    pub fn step(&mut self) {
        for floater in &mut self.floaters {
            floater.y -= floater.speed;
            if floater.y < 0.0 {
                floater.y += 1.0;
            }
        }
    }

    /// Cell positions inside a `width` x `height` area.
    pub fn positions(&self, width: u16, height: u16) -> Vec<(u16, u16, &'static str)> {
        if width < 2 || height == 0 {
            return Vec::new();
        }
        self.floaters
            .iter()
            .map(|f| {
                let x = (f.x * (width - 2) as f32) as u16;
                let y = (f.y * (height - 1) as f32) as u16;
                (x, y, f.glyph)
            })
            .collect()
    }
}
