use crate::extract::ExtractedCell;

/// Name of the nullary routine wrapping the handler's program body.
pub const ENTRY_POINT_NAME: &str = "run";

const BODY_INDENT: &str = "    ";

/// Concatenate extracted cells into one script.
///
/// Each cell becomes a `#cell <index>` header line, its kept lines in order,
/// and a blank separator line.
pub fn assemble_script(cells: impl IntoIterator<Item = ExtractedCell>) -> String {
    let mut script = String::new();
    for cell in cells {
        script.push_str(&format!("#cell {}\n", cell.index));
        for line in &cell.lines {
            script.push_str(line);
        }
        if !script.ends_with('\n') {
            script.push('\n');
        }
        script.push('\n');
    }
    script
}

/// Turn a script into the body of `def <entry_point>():`.
///
/// Every line is indented, blank lines included, and the body always ends in
/// `pass` so a notebook without code cells still defines a callable no-op.
pub fn wrap_in_entry_point(script: &str, entry_point: &str) -> String {
    let mut program = format!("def {entry_point}():\n");
    for line in script.split_inclusive('\n') {
        program.push_str(BODY_INDENT);
        program.push_str(line);
    }
    if !program.ends_with('\n') {
        program.push('\n');
    }
    program.push_str(BODY_INDENT);
    program.push_str("pass\n");
    program
}
