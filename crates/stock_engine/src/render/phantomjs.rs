use std::io::Write;
use std::path::{Path, PathBuf};

use stock_logging::stock_debug;
use tempfile::NamedTempFile;
use tokio::process::Command;

use super::{ContentRenderer, RenderError};

const WRAPPER_SCRIPT: &str = r#"
var system = require('system');
var url = system.args[1];
var page = require('webpage').create();
page.open(url, function () {
    console.log(page.content);
    phantom.exit();
});
"#;

/// `$PHANTOMJS_BIN`, then `/usr/local/bin/phantomjs`, then `./phantomjs`.
pub fn default_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(3);
    if let Some(bin) = std::env::var_os("PHANTOMJS_BIN").filter(|v| !v.is_empty()) {
        paths.push(PathBuf::from(bin));
    }
    paths.push(PathBuf::from("/usr/local/bin/phantomjs"));
    paths.push(PathBuf::from("./phantomjs"));
    paths
}

/// Renders pages by running phantomjs with a small wrapper script that
/// prints `page.content` once the page has loaded.
///
/// The binary is looked up on every call, so installing it while the
/// monitor runs takes effect on the next tick. The wrapper script lives in a
/// temp file owned by the renderer.
#[derive(Debug)]
pub struct PhantomJsRenderer {
    search_paths: Vec<PathBuf>,
    script: NamedTempFile,
}

impl PhantomJsRenderer {
    pub fn new(search_paths: Vec<PathBuf>) -> Result<Self, RenderError> {
        let mut script = tempfile::Builder::new()
            .prefix("phantomjs-wrapper")
            .suffix(".js")
            .tempfile()?;
        script.write_all(WRAPPER_SCRIPT.as_bytes())?;
        script.flush()?;
        Ok(Self {
            search_paths,
            script,
        })
    }

    pub fn from_env() -> Result<Self, RenderError> {
        Self::new(default_search_paths())
    }

    pub fn script_path(&self) -> &Path {
        self.script.path()
    }

    fn binary(&self) -> Result<&Path, RenderError> {
        self.search_paths
            .iter()
            .map(PathBuf::as_path)
            .find(|path| is_executable(path))
            .ok_or_else(|| RenderError::BinaryNotFound {
                searched: self.search_paths.clone(),
            })
    }
}

#[async_trait::async_trait]
impl ContentRenderer for PhantomJsRenderer {
    async fn render(&self, url: &str) -> Result<String, RenderError> {
        let binary = self.binary()?;
        stock_debug!("Rendering {} with {:?}", url, binary);
        let output = Command::new(binary)
            .arg(self.script.path())
            .arg(url)
            .output()
            .await?;

        if !output.status.success() {
            return Err(RenderError::ExitStatus {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(stdout_text(&output.stdout))
    }
}

/// `console.log` writes UTF-8; invalid bytes become U+FFFD.
fn stdout_text(stdout: &[u8]) -> String {
    String::from_utf8_lossy(stdout).into_owned()
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
