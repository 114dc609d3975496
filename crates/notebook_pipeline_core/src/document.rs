//! Notebook document model.
//!
//! Two on-disk layouts are accepted and normalized into one flat cell list:
//! `nbformat >= 4` keeps cells at the top level with their text in `source`,
//! older documents nest cells under `worksheets[0]` with code text in `input`.

use serde::Deserialize;

use crate::error::PipelineError;

/// First notebook format version with a top-level cell list.
pub const MODERN_FORMAT_VERSION: u64 = 4;

pub const CODE_CELL_TYPE: &str = "code";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotebookDocument {
    pub nbformat: u64,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub cell_type: String,
    pub lines: Vec<String>,
}

impl Cell {
    pub fn is_code(&self) -> bool {
        self.cell_type == CODE_CELL_TYPE
    }
}

#[derive(Debug, Deserialize)]
struct RawNotebook {
    nbformat: Option<u64>,
    cells: Option<Vec<RawCell>>,
    worksheets: Option<Vec<RawWorksheet>>,
}

#[derive(Debug, Deserialize)]
struct RawWorksheet {
    #[serde(default)]
    cells: Vec<RawCell>,
}

#[derive(Debug, Deserialize)]
struct RawCell {
    cell_type: String,
    source: Option<CellText>,
    input: Option<CellText>,
}

/// Cell text is stored either as a list of lines or as one joined string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CellText {
    Lines(Vec<String>),
    Joined(String),
}

impl CellText {
    fn into_lines(self) -> Vec<String> {
        match self {
            CellText::Lines(lines) => lines,
            CellText::Joined(text) => text.split_inclusive('\n').map(str::to_string).collect(),
        }
    }
}

impl NotebookDocument {
    pub fn from_json_str(text: &str) -> Result<Self, PipelineError> {
        let raw: RawNotebook = serde_json::from_str(text)?;
        Self::from_raw(raw)
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, PipelineError> {
        let raw: RawNotebook = serde_json::from_slice(bytes)?;
        Self::from_raw(raw)
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self, PipelineError> {
        let raw: RawNotebook = serde_json::from_value(value)?;
        Self::from_raw(raw)
    }

    /// Whether the document uses the top-level `cells` layout.
    pub fn is_modern(&self) -> bool {
        self.nbformat >= MODERN_FORMAT_VERSION
    }

    fn from_raw(raw: RawNotebook) -> Result<Self, PipelineError> {
        let nbformat = raw
            .nbformat
            .ok_or_else(|| PipelineError::layout("missing 'nbformat' field"))?;

        let cells = if nbformat >= MODERN_FORMAT_VERSION {
            raw.cells
                .ok_or_else(|| PipelineError::layout("missing 'cells' list"))?
                .into_iter()
                .map(|cell| Cell {
                    cell_type: cell.cell_type,
                    lines: cell.source.map(CellText::into_lines).unwrap_or_default(),
                })
                .collect()
        } else {
            raw.worksheets
                .and_then(|worksheets| worksheets.into_iter().next())
                .ok_or_else(|| PipelineError::layout("legacy notebook has no worksheet"))?
                .cells
                .into_iter()
                .map(|cell| Cell {
                    cell_type: cell.cell_type,
                    lines: cell
                        .input
                        .or(cell.source)
                        .map(CellText::into_lines)
                        .unwrap_or_default(),
                })
                .collect()
        };

        Ok(Self { nbformat, cells })
    }
}
