use anyhow::{Result, bail};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RRGGBB` or `RRGGBB`.
    pub fn from_hex(s: &str) -> Result<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            bail!("'{}' is not a #RRGGBB color", s);
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub fn channel(&self, ch: Channel) -> u8 {
        match ch {
            Channel::Red => self.r,
            Channel::Green => self.g,
            Channel::Blue => self.b,
        }
    }

    pub fn adjust(&mut self, ch: Channel, delta: i16) {
        let slot = match ch {
            Channel::Red => &mut self.r,
            Channel::Green => &mut self.g,
            Channel::Blue => &mut self.b,
        };
        *slot = (*slot as i16 + delta).clamp(0, 255) as u8;
    }

    pub fn lerp(&self, other: &Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    pub fn label(&self) -> &'static str {
        match self {
            Channel::Red => "R",
            Channel::Green => "G",
            Channel::Blue => "B",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Channel::Red => Channel::Green,
            Channel::Green => Channel::Blue,
            Channel::Blue => Channel::Red,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Channel::Red => Channel::Blue,
            Channel::Green => Channel::Red,
            Channel::Blue => Channel::Green,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GradientDirection {
    #[default]
    Horizontal,
    Vertical,
    Diagonal,
}

impl GradientDirection {
    pub const ALL: [GradientDirection; 3] = [
        GradientDirection::Horizontal,
        GradientDirection::Vertical,
        GradientDirection::Diagonal,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GradientDirection::Horizontal => "Horizontal",
            GradientDirection::Vertical => "Vertical",
            GradientDirection::Diagonal => "Diagonal",
        }
    }

    /// CSS-style name of the direction.
    pub fn css(&self) -> &'static str {
        match self {
            GradientDirection::Horizontal => "to right",
            GradientDirection::Vertical => "to bottom",
            GradientDirection::Diagonal => "to bottom right",
        }
    }

    /// End point of the gradient axis in unit coordinates; the start is (0, 0).
    pub fn end_point(&self) -> (f32, f32) {
        match self {
            GradientDirection::Horizontal => (1.0, 0.0),
            GradientDirection::Vertical => (0.0, 1.0),
            GradientDirection::Diagonal => (1.0, 1.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ActiveColor {
    #[default]
    First,
    Second,
}

impl ActiveColor {
    pub fn toggle(&self) -> Self {
        match self {
            ActiveColor::First => ActiveColor::Second,
            ActiveColor::Second => ActiveColor::First,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    pub start: Rgb,
    pub end: Rgb,
    pub direction: GradientDirection,
}

impl Default for Gradient {
    fn default() -> Self {
        Self {
            start: Rgb::new(0xFF, 0x00, 0x00),
            end: Rgb::new(0x00, 0x00, 0xFF),
            direction: GradientDirection::Horizontal,
        }
    }
}

impl Gradient {
    pub fn color(&self, which: ActiveColor) -> Rgb {
        match which {
            ActiveColor::First => self.start,
            ActiveColor::Second => self.end,
        }
    }

    pub fn color_mut(&mut self, which: ActiveColor) -> &mut Rgb {
        match which {
            ActiveColor::First => &mut self.start,
            ActiveColor::Second => &mut self.end,
        }
    }

    /// Color at cell (`x`, `y`) of a `width` x `height` grid.
    ///
    /// The position is projected onto the direction's axis, so the
    /// top-left cell is always `start` and the far end is `end`.
    pub fn sample(&self, x: u16, y: u16, width: u16, height: u16) -> Rgb {
        let u = unit(x, width);
        let v = unit(y, height);
        let (ex, ey) = self.direction.end_point();
        let t = (u * ex + v * ey) / (ex * ex + ey * ey);
        self.start.lerp(&self.end, t)
    }
}

fn unit(pos: u16, len: u16) -> f32 {
    if len <= 1 {
        0.0
    } else {
        pos as f32 / (len - 1) as f32
    }
}
