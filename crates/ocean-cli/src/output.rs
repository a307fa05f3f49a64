//! Human-readable reporting for `--generate-only`.

use std::path::Path;

use ocean_compose::CompositionManifest;

/// Lines describing a freshly generated manifest.
#[must_use]
pub fn summary_lines(path: &Path, manifest: &CompositionManifest) -> Vec<String> {
    let mut lines = vec![format!(
        "Generated {} ({} service(s))",
        path.display(),
        manifest.services.len()
    )];
    for (key, entry) in &manifest.services {
        let build = entry.build.as_ref().map_or_else(String::new, |b| {
            format!(" <- {}/{}", b.context, b.dockerfile)
        });
        let ports = if entry.ports.is_empty() {
            String::new()
        } else {
            format!(" [{}]", entry.ports.join(", "))
        };
        lines.push(format!("  {key}{build}{ports}"));
    }
    lines
}
