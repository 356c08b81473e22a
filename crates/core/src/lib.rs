pub mod config;
pub mod dom;
pub mod error;
pub mod grid;
pub mod measure;
pub mod output;
pub mod solver;
pub mod tree;

pub use config::DeckConfig;
pub use error::{GridslideError, Result};
pub use output::SlideDeck;
pub use solver::{LayoutObserver, Placement, Rect};
pub use tree::LayoutTree;

/// Parse a Bootstrap-grid HTML string and lay it out as one slide.
/// This is the primary entry point for gridslide-core.
pub fn parse(html: &str, config: &DeckConfig) -> Result<SlideDeck> {
    parse_with(html, config, &mut solver::NoopObserver)
}

/// [`parse`] with solver trace hooks.
pub fn parse_with<O: LayoutObserver>(
    html: &str,
    config: &DeckConfig,
    observer: &mut O,
) -> Result<SlideDeck> {
    config.validate()?;
    let tree = layout_tree(html)?;
    let placements = solver::solve_with(
        &tree,
        &config.page_geometry(),
        config.bands.row_height_in,
        config.base_gutter_fraction(),
        observer,
    )?;
    Ok(output::generate_deck(&placements, config))
}

/// Solve a parsed tree with the geometry of `config`.
///
/// Placements borrow their columns from `tree`, so callers parse with
/// [`layout_tree`] first and keep the tree alive while using the result.
pub fn layout<'t>(tree: &'t LayoutTree, config: &DeckConfig) -> Result<Vec<Placement<'t>>> {
    config.validate()?;
    solver::solve(
        tree,
        &config.page_geometry(),
        config.bands.row_height_in,
        config.base_gutter_fraction(),
    )
}

/// Parse HTML into the row/column tree without placing it.
pub fn layout_tree(html: &str) -> Result<LayoutTree> {
    let dom = dom::parse_html(html)?;
    Ok(tree::build_tree(&dom))
}
