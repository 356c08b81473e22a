//! Bootstrap grid class normalisation.
//! Recognises `col`, `col-auto`, `col-{bp}`, `col-{bp}-auto`, `col-{n}`,
//! `col-{bp}-{n}`, `offset-{n}` and `offset-{bp}-{n}`. Everything else is
//! opaque to the layout engine.

use serde::Serialize;

/// Responsive breakpoints, most specific first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Xxl,
    Xl,
    Lg,
    Md,
    Sm,
    /// Unqualified token such as `col-6`.
    Base,
}

impl Breakpoint {
    /// All breakpoints in specificity order.
    pub const ORDER: [Breakpoint; 6] = [
        Breakpoint::Xxl,
        Breakpoint::Xl,
        Breakpoint::Lg,
        Breakpoint::Md,
        Breakpoint::Sm,
        Breakpoint::Base,
    ];

    pub fn from_infix(s: &str) -> Option<Self> {
        match s {
            "xxl" => Some(Breakpoint::Xxl),
            "xl" => Some(Breakpoint::Xl),
            "lg" => Some(Breakpoint::Lg),
            "md" => Some(Breakpoint::Md),
            "sm" => Some(Breakpoint::Sm),
            _ => None,
        }
    }

    /// Lower rank wins.
    pub fn rank(self) -> usize {
        self as usize
    }
}

/// A recognised grid class token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridClass {
    /// `col-{bp}-{n}`, span already clamped into 1..=12.
    Span(Breakpoint, u8),
    /// `offset-{bp}-{n}`, offset already clamped into 0..=11.
    Offset(Breakpoint, u8),
    /// `col`, `col-{bp}`, `col-auto` or `col-{bp}-auto`.
    Auto(Breakpoint),
}

pub const GRID_COLUMNS: u8 = 12;

impl GridClass {
    /// Parse a single class token. Returns `None` for non-grid classes and
    /// for grid-looking tokens with a malformed numeric suffix.
    pub fn parse(token: &str) -> Option<GridClass> {
        if let Some(rest) = token.strip_prefix("offset-") {
            let (bp, number) = split_breakpoint(rest)?;
            let offset = parse_grid_number(number)?;
            return Some(GridClass::Offset(bp, offset.min(GRID_COLUMNS - 1)));
        }

        if token == "col" {
            return Some(GridClass::Auto(Breakpoint::Base));
        }
        let rest = token.strip_prefix("col-")?;
        if rest == "auto" {
            return Some(GridClass::Auto(Breakpoint::Base));
        }
        if let Some(bp) = Breakpoint::from_infix(rest) {
            return Some(GridClass::Auto(bp));
        }
        let (bp, suffix) = split_breakpoint(rest)?;
        if suffix == "auto" {
            return Some(GridClass::Auto(bp));
        }
        let span = parse_grid_number(suffix)?;
        Some(GridClass::Span(bp, span.clamp(1, GRID_COLUMNS)))
    }
}

/// Split `md-6` into (`Md`, `6`) and `6` into (`Base`, `6`).
fn split_breakpoint(s: &str) -> Option<(Breakpoint, &str)> {
    match s.split_once('-') {
        Some((infix, rest)) => Some((Breakpoint::from_infix(infix)?, rest)),
        None => Some((Breakpoint::Base, s)),
    }
}

/// One or two ASCII digits; anything else is malformed.
fn parse_grid_number(s: &str) -> Option<u8> {
    if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn most_specific<I>(candidates: I) -> Option<u8>
where
    I: Iterator<Item = (Breakpoint, u8)>,
{
    // min_by_key keeps the first of equal ranks, so document order only
    // decides between two tokens at the same breakpoint.
    candidates.min_by_key(|(bp, _)| bp.rank()).map(|(_, v)| v)
}

/// Explicit span for the most specific breakpoint present, or 0 when the
/// class set carries no numeric span.
pub fn resolve_span<S: AsRef<str>>(classes: &[S]) -> u8 {
    most_specific(classes.iter().filter_map(|c| match GridClass::parse(c.as_ref()) {
        Some(GridClass::Span(bp, span)) => Some((bp, span)),
        _ => None,
    }))
    .unwrap_or(0)
}

/// Explicit offset for the most specific breakpoint present, or 0.
pub fn resolve_offset<S: AsRef<str>>(classes: &[S]) -> u8 {
    most_specific(classes.iter().filter_map(|c| match GridClass::parse(c.as_ref()) {
        Some(GridClass::Offset(bp, offset)) => Some((bp, offset)),
        _ => None,
    }))
    .unwrap_or(0)
}

/// True if any token declares a bare/auto column at some breakpoint.
pub fn is_auto_width<S: AsRef<str>>(classes: &[S]) -> bool {
    classes
        .iter()
        .any(|c| matches!(GridClass::parse(c.as_ref()), Some(GridClass::Auto(_))))
}

/// The breakpoint whose span token won resolution, if any.
pub fn resolve_breakpoint<S: AsRef<str>>(classes: &[S]) -> Option<Breakpoint> {
    classes
        .iter()
        .filter_map(|c| match GridClass::parse(c.as_ref()) {
            Some(GridClass::Span(bp, _)) => Some(bp),
            _ => None,
        })
        .min()
}

/// Normalised grid parameters for one column element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSpec {
    /// 1..=12 once the tree builder has resolved auto widths; 0 before.
    pub span: u8,
    pub offset: u8,
    /// `None` when no numeric span token was present.
    pub breakpoint: Option<Breakpoint>,
    pub auto: bool,
    /// Original class tokens, kept for downstream styling.
    pub classes: Vec<String>,
}

impl ColumnSpec {
    pub fn from_classes(classes: &[String]) -> Self {
        for c in classes {
            let grid_like = c.starts_with("col-") || c.starts_with("offset-");
            if grid_like && GridClass::parse(c).is_none() {
                log::debug!("ignoring unrecognised grid class `{c}`");
            }
        }
        Self {
            span: resolve_span(classes),
            offset: resolve_offset(classes),
            breakpoint: resolve_breakpoint(classes),
            auto: is_auto_width(classes),
            classes: classes.to_vec(),
        }
    }

    /// Grid columns consumed on a line, offset included.
    pub fn footprint(&self) -> u32 {
        u32::from(self.offset) + u32::from(self.span)
    }
}
