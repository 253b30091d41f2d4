//! obfmap: render obfuscation rename maps as text, XML, or JSON

use anyhow::Result;

fn main() -> Result<()> {
    obfmap::cli::run()
}
