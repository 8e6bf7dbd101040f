use std::io::Write;

use tempfile::NamedTempFile;

/// Write `contents` to a temporary `.yaml` file removed on drop.
pub fn write_temp_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("tradeloom-config-test-")
        .suffix(".yaml")
        .tempfile()
        .expect("create temp config");
    file.write_all(contents.as_bytes())
        .expect("write temp config");
    file
}
