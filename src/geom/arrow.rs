//! Arrow decorations for lines, Bezier curves and complex curves.

use bitflags::bitflags;

use crate::error::Result;

bitflags! {
    /// Rendering style of an arrow head.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ArrowStyle: u32 {
        /// A short segment perpendicular to the line, at the tip.
        const LIMITER = 0x01;
        /// The head is stroked instead of filled.
        const EMPTY = 0x02;
    }
}

/// Default arrow length in logical units.
pub const DEFAULT_LENGTH: f32 = 3.0;
/// Default arrow half width in logical units.
pub const DEFAULT_HALF_WIDTH: f32 = 1.0;

/// Arrow state attached to a primitive: whether heads are present at
/// the two ends, their style and their size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrow {
    pub start: bool,
    pub end: bool,
    pub style: ArrowStyle,
    pub length: f32,
    pub half_width: f32,
}

impl Default for Arrow {
    fn default() -> Self {
        Self {
            start: false,
            end: false,
            style: ArrowStyle::empty(),
            length: DEFAULT_LENGTH,
            half_width: DEFAULT_HALF_WIDTH,
        }
    }
}

impl Arrow {
    /// True if at least one of the two heads is present.
    pub fn at_least_one(&self) -> bool {
        self.start || self.end
    }

    /// Read the four arrow tokens `flags style length halfwidth`
    /// starting at `tokens[i]`. Returns the index of the first token
    /// after the arrow description. A truncated token list is a parse
    /// error, not a panic.
    pub fn parse_tokens(&mut self, tokens: &[String], i: usize) -> Result<usize> {
        let tok = |j: usize| -> Result<&str> {
            tokens
                .get(j)
                .map(String::as_str)
                .ok_or_else(|| "truncated arrow description".into())
        };
        let mut j = i;
        let flags: u32 = tok(j)?.parse()?;
        self.start = flags & 0x01 != 0;
        self.end = flags & 0x02 != 0;
        j += 1;
        self.style = ArrowStyle::from_bits_truncate(tok(j)?.parse()?);
        j += 1;
        self.length = tok(j)?.parse()?;
        j += 1;
        self.half_width = tok(j)?.parse()?;
        j += 1;
        Ok(j)
    }

    /// Serialize the four arrow tokens, space separated, without a
    /// trailing space.
    pub fn save_tokens(&self) -> String {
        let mut flags = 0u32;
        if self.start {
            flags |= 0x01;
        }
        if self.end {
            flags |= 0x02;
        }
        format!(
            "{} {} {} {}",
            flags,
            self.style.bits(),
            round_intelligently(self.length as f64),
            round_intelligently(self.half_width as f64)
        )
    }

    /// Compute the head geometry of an arrow with its tip at `(x, y)`
    /// pointing away from `(xc, yc)`.
    pub fn head(&self, x: f64, y: f64, xc: f64, yc: f64) -> ArrowHead {
        head_geometry(
            x,
            y,
            xc,
            yc,
            self.length as f64,
            self.half_width as f64,
            self.style,
        )
    }
}

/// The geometry of one arrow head: the triangle, an optional limiter
/// segment and the base point where the decorated line should stop.
#[derive(Debug, Clone, Copy)]
pub struct ArrowHead {
    /// Tip of the triangle.
    pub tip: (f64, f64),
    /// First wing of the triangle.
    pub p1: (f64, f64),
    /// Second wing of the triangle.
    pub p2: (f64, f64),
    /// Perpendicular limiter segment at the tip, drawn only when the
    /// `LIMITER` style bit is active.
    pub limiter: Option<((f64, f64), (f64, f64))>,
    /// True when the triangle should be filled.
    pub filled: bool,
    /// Middle of the base of the triangle.
    pub base: (f64, f64),
}

/// Compute the points of an arrow head. `l` is the total head length
/// and `h` its half width, both in output units.
pub fn head_geometry(
    x: f64,
    y: f64,
    xc: f64,
    yc: f64,
    l: f64,
    h: f64,
    style: ArrowStyle,
) -> ArrowHead {
    // Direction of the arrow, with the quadrant fixups needed by atan.
    let mut alpha = if x == xc {
        std::f64::consts::FRAC_PI_2 + if y - yc < 0.0 { 0.0 } else { std::f64::consts::PI }
    } else {
        ((y - yc) / (x - xc)).atan()
    };
    alpha += if x - xc > 0.0 { 0.0 } else { std::f64::consts::PI };

    let x0 = x - l * alpha.cos();
    let y0 = y - l * alpha.sin();

    let p1 = (x0 - h * alpha.sin(), y0 + h * alpha.cos());
    let p2 = (x0 + h * alpha.sin(), y0 - h * alpha.cos());

    let limiter = if style.contains(ArrowStyle::LIMITER) {
        Some((
            (x - h * alpha.sin(), y + h * alpha.cos()),
            (x + h * alpha.sin(), y - h * alpha.cos()),
        ))
    } else {
        None
    };

    ArrowHead {
        tip: (x, y),
        p1,
        p2,
        limiter,
        filled: !style.contains(ArrowStyle::EMPTY),
        base: (x0, y0),
    }
}

/// Format a number dropping the fractional part when it is negligible,
/// so that `3.0` is written back as `3` but `2.5` survives.
pub fn round_intelligently(v: f64) -> String {
    if (v - v.round()).abs() < 1e-5 {
        format!("{}", v.round() as i64)
    } else {
        format!("{}", v)
    }
}
