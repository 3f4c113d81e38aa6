use anyhow::{bail, Context, Result};

use std::{
    io::Write,
    path::Path,
    process::{Command, Stdio},
};

/// PlantUML source for the product class diagram emitted alongside the
/// `products` report.
pub const PRODUCT_CLASS_DIAGRAM: &str = "\
@startuml
class Product {
    - product_name: String
    - purchase_price: Price
    - expiry_date: String
}
@enduml
";

/// Renders `source` through PlantUML into `output_dir` as SVG.
///
/// Fire-and-forget: any failure (missing `java`, missing jar, renderer
/// error) is logged as a warning and never propagated.
pub fn render(source: &str, output_dir: &str, jar_path: &Path) {
    if let Err(e) = run_plantuml(source, output_dir, jar_path) {
        log::warn!("generating diagram: {e:#}");
    }
}

fn run_plantuml(source: &str, output_dir: &str, jar_path: &Path) -> Result<()> {
    let mut child = Command::new("java")
        .arg("-jar")
        .arg(jar_path)
        .args(["-tsvg", "-o", output_dir])
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("spawning java")?;
    child
        .stdin
        .as_mut()
        .context("opening plantuml stdin")?
        .write_all(source.as_bytes())?;
    let status = child.wait()?;
    if !status.success() {
        bail!("plantuml exited with {status}");
    }
    Ok(())
}
