//! External model invocation
//!
//! The model is an external command-line tool that reads a prompt on stdin
//! and answers on stdout (`gh models run gpt-4o` by default).

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;
use thiserror::Error;

use crate::config::ModelConfig;

/// Model invocation errors
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Failed to start `{command}`: {source}")]
    ProcessSpawn {
        command: String,
        source: io::Error,
    },

    #[error("Failed to communicate with the model process: {0}")]
    Communication(io::Error),

    #[error("Model output does not contain {marker:?}")]
    UnexpectedOutputFormat { marker: String, output: String },

    #[error("Failed to write {path:?}: {source}")]
    WriteOutput { path: PathBuf, source: io::Error },
}

/// Something that turns a prompt into generated text
pub trait ModelRunner {
    fn run(&self, prompt: &str) -> Result<String, ModelError>;
}

/// A model behind a command-line tool
#[derive(Debug, Clone)]
pub struct CliModel {
    command: String,
    args: Vec<String>,
}

impl CliModel {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    /// `<command> <args...> <name>` from configuration
    pub fn from_config(config: &ModelConfig) -> Self {
        let mut args = config.args.clone();
        args.push(config.name.clone());
        Self::new(config.command.clone(), args)
    }

    /// Command line, for display
    pub fn command_line(&self) -> String {
        std::iter::once(self.command.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl ModelRunner for CliModel {
    fn run(&self, prompt: &str) -> Result<String, ModelError> {
        tracing::debug!("Spawning {}", self.command_line());

        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ModelError::ProcessSpawn {
                command: self.command.clone(),
                source,
            })?;

        let mut stdin = child.stdin.take().ok_or_else(|| {
            ModelError::Communication(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "stdin was not captured",
            ))
        })?;

        // Feed stdin on its own thread so a chatty child can't fill stdout and stall us
        let input = prompt.to_string();
        let writer = thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child.wait_with_output().map_err(ModelError::Communication)?;

        match writer.join() {
            Ok(Ok(())) => {}
            // The child may exit without reading its input
            Ok(Err(e)) if e.kind() == io::ErrorKind::BrokenPipe => {}
            Ok(Err(e)) => return Err(ModelError::Communication(e)),
            Err(_) => {
                return Err(ModelError::Communication(io::Error::new(
                    io::ErrorKind::Other,
                    "stdin writer panicked",
                )))
            }
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            tracing::debug!("Model stderr: {}", stderr.trim());
        }
        if !output.status.success() {
            tracing::warn!("`{}` exited with {}", self.command_line(), output.status);
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        let model = CliModel::from_config(&ModelConfig::default());
        assert_eq!(model.command_line(), "gh models run gpt-4o");
    }

    #[test]
    fn test_spawn_error() {
        let model = CliModel::new("sitekit-no-such-model-cli", vec![]);
        match model.run("prompt") {
            Err(ModelError::ProcessSpawn { command, .. }) => {
                assert_eq!(command, "sitekit-no-such-model-cli")
            }
            other => panic!("expected spawn error, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_prompt_goes_through_stdin() {
        let model = CliModel::new("cat", vec![]);
        let output = model.run("<template>\n  <canvas />\n</template>\n").unwrap();
        assert_eq!(output, "<template>\n  <canvas />\n</template>\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_child_ignoring_stdin() {
        let model = CliModel::new("sh", vec!["-c".to_string(), "echo hello".to_string()]);
        assert_eq!(model.run("ignored").unwrap(), "hello\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_exit_still_returns_output() {
        let model = CliModel::new(
            "sh",
            vec!["-c".to_string(), "cat; echo oops >&2; exit 3".to_string()],
        );
        assert_eq!(model.run("partial").unwrap(), "partial");
    }
}
