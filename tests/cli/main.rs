use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use serde_json::Value;
use tempfile::TempDir;

mod check;
mod init;
mod inspect;
mod recent;

const BIN_NAME: &str = "xcstool";

pub const CATALOG: &str = "Localizable.xcstrings";

/// A small catalog: English source, partial French, one locked key.
pub const SAMPLE_CATALOG: &str = r#"{
  "sourceLanguage" : "en",
  "strings" : {
    "%d items" : {
      "localizations" : {
        "fr" : {
          "variations" : {
            "plural" : {
              "one" : { "stringUnit" : { "state" : "translated", "value" : "%d élément" } },
              "other" : { "stringUnit" : { "state" : "translated", "value" : "%d éléments" } }
            }
          }
        }
      }
    },
    "Cancel" : {
      "comment" : "Button title",
      "localizations" : {
        "fr" : { "stringUnit" : { "state" : "needs_review", "value" : "Annuler" } }
      }
    },
    "Hello %@" : {
      "localizations" : {
        "fr" : { "stringUnit" : { "state" : "translated", "value" : "Bonjour" } }
      }
    },
    "Internal" : {
      "shouldTranslate" : false
    },
    "Save" : {
    }
  },
  "version" : "1.0"
}
"#;

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Stop config lookup at the temp dir
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn with_file(path: &str, content: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(path, content)?;
        Ok(test)
    }

    pub fn with_sample_catalog() -> Result<Self> {
        Self::with_file(CATALOG, SAMPLE_CATALOG)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd.env("HOME", &self.project_dir); // Keep the file history inside the temp dir
        cmd
    }

    /// Run `xcstool <args...>` with the sample catalog path inserted after the subcommand.
    pub fn run_on_catalog(&self, subcommand: &str, args: &[&str]) -> Result<Output> {
        let output = self
            .command()
            .arg(subcommand)
            .arg(CATALOG)
            .args(args)
            .output()?;
        Ok(output)
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }

    pub fn read_catalog(&self) -> Result<Value> {
        let content = self.read_file(CATALOG)?;
        serde_json::from_str(&content).context("Catalog should be valid JSON")
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
