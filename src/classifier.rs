use crate::arff::ArffArtifact;
use crate::config::AppConfig;
use log::{debug, error, warn};
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// Leading token of the prediction table header in WEKA's `-p` output.
pub const PREDICTION_MARKER: &str = "inst#";

pub const EXTRACT_FAILED: &str = "Prediction error: could not extract result";

const EVALUATOR_CLASS: &str = "weka.classifiers.Classifier";

#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("Could not write classifier input: {0}")]
    Artifact(#[from] io::Error),
}

/// Turns article text into a label, or a diagnostic string when the
/// classifier itself misbehaves.
pub trait Classifier: Send + Sync {
    fn classify(&self, text: &str) -> Result<String, ClassifyError>;
}

/// Combined stdout/stderr of one classifier run.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub success: bool,
    pub text: String,
}

/// Launches the external tool against a prepared input file.
pub trait ToolRunner: Send + Sync {
    fn run(&self, input: &Path) -> io::Result<ToolOutput>;
}

/// Runs WEKA through the JVM with a pre-trained model.
#[derive(Debug, Clone)]
pub struct WekaRunner {
    java_bin: PathBuf,
    weka_jar: PathBuf,
    model: PathBuf,
}

impl WekaRunner {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            java_bin: config.java_bin.clone(),
            weka_jar: config.weka_jar_path.clone(),
            model: config.model_path.clone(),
        }
    }

    fn command(&self, input: &Path) -> Command {
        let mut cmd = Command::new(&self.java_bin);
        cmd.arg("-cp")
            .arg(&self.weka_jar)
            .arg(EVALUATOR_CLASS)
            .arg("-l")
            .arg(&self.model)
            .arg("-T")
            .arg(input)
            .arg("-p")
            .arg("0");
        cmd
    }
}

impl ToolRunner for WekaRunner {
    fn run(&self, input: &Path) -> io::Result<ToolOutput> {
        let output = self.command(input).output()?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        debug!("classifier exited with {}", output.status);
        Ok(ToolOutput {
            success: output.status.success(),
            text,
        })
    }
}

/// Returns the last token of the first line starting with [`PREDICTION_MARKER`].
///
/// The token is returned as printed; no attempt is made to split the
/// `index:label` pair or drop a trailing confidence column.
pub fn extract_prediction(output: &str) -> Option<&str> {
    output
        .lines()
        .find(|line| line.trim_start().starts_with(PREDICTION_MARKER))
        .and_then(|line| line.split_whitespace().last())
}

pub struct WekaClassifier<R = WekaRunner> {
    runner: R,
}

impl WekaClassifier<WekaRunner> {
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(WekaRunner::new(config))
    }
}

impl<R: ToolRunner> WekaClassifier<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    fn interpret(result: io::Result<ToolOutput>) -> String {
        match result {
            Ok(output) if output.success => match extract_prediction(&output.text) {
                Some(prediction) => prediction.to_string(),
                None => {
                    warn!("no prediction line in classifier output");
                    EXTRACT_FAILED.to_string()
                }
            },
            Ok(output) => {
                warn!("classifier failed: {}", output.text.trim());
                format!("Error occurred: {}", output.text)
            }
            Err(e) => {
                error!("Failed to launch classifier: {}", e);
                format!("Error occurred: {}", e)
            }
        }
    }
}

impl<R: ToolRunner> Classifier for WekaClassifier<R> {
    fn classify(&self, text: &str) -> Result<String, ClassifyError> {
        let artifact = ArffArtifact::create(text).map_err(|e| {
            error!("Failed to create ARFF input: {}", e);
            e
        })?;
        debug!("wrote classifier input to {}", artifact.path().display());

        let prediction = Self::interpret(self.runner.run(artifact.path()));

        if let Err(e) = artifact.close() {
            warn!("Failed to remove classifier input: {}", e);
        }

        Ok(prediction)
    }
}
