use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use notebook_pipeline_core::convert_notebook_file;

#[derive(Parser)]
#[command(
    name = "notebook_convert",
    about = "Convert a notebook into a plain script of its code cells",
    long_about = "Writes every code cell of INPUT to OUTPUT, each preceded by a\n\
                  `#cell <index>` comment. Lines containing `#noprod` are dropped.\n\
                  OUTPUT is overwritten."
)]
struct Cli {
    /// Notebook to read (.ipynb)
    input: PathBuf,
    /// Script to write
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    convert_notebook_file(&cli.input, &cli.output).with_context(|| {
        format!(
            "failed to convert '{}' into '{}'",
            cli.input.display(),
            cli.output.display()
        )
    })
}
