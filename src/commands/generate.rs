//! Generate a frontend component with the external model

use std::fs;
use std::path::PathBuf;

use crate::model::{ModelError, ModelRunner};
use crate::Site;

/// Prompt sent for a target, relative to the base directory
pub fn prompt(site: &Site, target: &str) -> String {
    site.config.model.render_prompt(target)
}

/// Ask the model for the target file and write it if the answer looks like a component.
///
/// Nothing is written unless the output contains the configured marker.
pub fn run(site: &Site, runner: &dyn ModelRunner, target: &str) -> Result<PathBuf, ModelError> {
    let prompt = prompt(site, target);

    tracing::info!("Requesting {} from the model...", target);
    let code = runner.run(&prompt)?;

    let marker = &site.config.model.marker;
    if !code.contains(marker.as_str()) {
        return Err(ModelError::UnexpectedOutputFormat {
            marker: marker.clone(),
            output: code,
        });
    }

    let path = site.base_dir.join(target);
    write_output(&path, &code).map_err(|source| ModelError::WriteOutput {
        path: path.clone(),
        source,
    })?;
    tracing::info!("Wrote {} bytes to {:?}", code.len(), path);

    Ok(path)
}

fn write_output(path: &std::path::Path, code: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use std::cell::RefCell;
    use tempfile::TempDir;

    struct FakeModel {
        output: String,
        prompts: RefCell<Vec<String>>,
    }

    impl FakeModel {
        fn new(output: &str) -> Self {
            Self {
                output: output.to_string(),
                prompts: RefCell::new(Vec::new()),
            }
        }
    }

    impl ModelRunner for FakeModel {
        fn run(&self, prompt: &str) -> Result<String, ModelError> {
            self.prompts.borrow_mut().push(prompt.to_string());
            Ok(self.output.clone())
        }
    }

    struct BrokenModel;

    impl ModelRunner for BrokenModel {
        fn run(&self, _prompt: &str) -> Result<String, ModelError> {
            Err(ModelError::ProcessSpawn {
                command: "gh".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            })
        }
    }

    #[test]
    fn test_writes_component() {
        let dir = TempDir::new().unwrap();
        let site = Site::with_config(dir.path(), SiteConfig::default());
        let code = "<template>\n  <canvas ref=\"stars\" />\n</template>\n";
        let model = FakeModel::new(code);

        let path = run(&site, &model, "src/components/Galaxy.vue").unwrap();
        assert_eq!(path, dir.path().join("src/components/Galaxy.vue"));
        assert_eq!(fs::read_to_string(&path).unwrap(), code);

        let prompts = model.prompts.borrow();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("full code for src/components/Galaxy.vue"));
    }

    #[test]
    fn test_unexpected_output_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let site = Site::with_config(dir.path(), SiteConfig::default());

        let err = run(&site, &FakeModel::new("hello"), "src/components/Galaxy.vue").unwrap_err();
        match err {
            ModelError::UnexpectedOutputFormat { marker, output } => {
                assert_eq!(marker, "<template>");
                assert!(output.contains("hello"));
            }
            other => panic!("expected unexpected output, got {:?}", other),
        }
        assert!(!dir.path().join("src").exists());
    }

    #[test]
    fn test_runner_error_passes_through() {
        let dir = TempDir::new().unwrap();
        let site = Site::with_config(dir.path(), SiteConfig::default());

        let err = run(&site, &BrokenModel, "Galaxy.vue").unwrap_err();
        assert!(matches!(err, ModelError::ProcessSpawn { .. }));
        assert!(!dir.path().join("Galaxy.vue").exists());
    }

    #[test]
    fn test_write_failure() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("src"), "a file, not a directory").unwrap();
        let site = Site::with_config(dir.path(), SiteConfig::default());

        let err = run(&site, &FakeModel::new("<template></template>"), "src/Galaxy.vue").unwrap_err();
        assert!(matches!(err, ModelError::WriteOutput { .. }));
    }
}
