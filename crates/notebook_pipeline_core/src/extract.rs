use crate::document::NotebookDocument;

/// Lines containing this marker anywhere are left out of production code.
pub const EXCLUSION_TAG: &str = "#noprod";

/// A code cell after filtering, keyed by its position in the notebook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedCell {
    pub index: usize,
    pub lines: Vec<String>,
}

/// Yield every code cell in document order with tagged lines removed.
///
/// `index` is the cell's position among all cells, so skipped markdown or raw
/// cells leave gaps rather than shifting later indices. Kept lines are passed
/// through untouched, including their line terminators.
pub fn extract_code_cells<'a>(
    document: &'a NotebookDocument,
    exclusion_tag: &'a str,
) -> impl Iterator<Item = ExtractedCell> + 'a {
    document
        .cells
        .iter()
        .enumerate()
        .filter(|(_, cell)| cell.is_code())
        .map(move |(index, cell)| ExtractedCell {
            index,
            lines: cell
                .lines
                .iter()
                .filter(|line| !line.contains(exclusion_tag))
                .cloned()
                .collect(),
        })
}
