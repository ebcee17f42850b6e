//! Running tests through Gradle
//!
//! A project with a wrapper script is driven through `./gradlew` from the
//! wrapper's directory; otherwise a `gradle` on `PATH` runs from the nearest
//! directory with a build script.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use thiserror::Error;

#[cfg(not(target_os = "windows"))]
const WRAPPER: &str = "gradlew";
#[cfg(target_os = "windows")]
const WRAPPER: &str = "gradlew.bat";

const BUILD_FILES: &[&str] = &[
    "build.gradle.kts",
    "build.gradle",
    "settings.gradle.kts",
    "settings.gradle",
];

#[derive(Debug, Error)]
pub enum GradleError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}")]
    Failed { program: String, status: ExitStatus },
}

/// A fully resolved Gradle invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradleCommand {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl GradleCommand {
    /// `test --tests <target>` for a source file
    pub fn test(file: &Path, target: &str) -> Self {
        let dir = file_dir(file);
        let (program, cwd) = match find_wrapper_dir(&dir) {
            Some(root) => (wrapper_program(), root),
            None => (
                "gradle".to_string(),
                find_project_dir(&dir).unwrap_or(dir),
            ),
        };
        Self {
            program,
            args: vec!["test".into(), "--tests".into(), target.to_string()],
            cwd,
        }
    }

    /// Run to completion with inherited stdio
    pub fn run(&self) -> Result<(), GradleError> {
        tracing::info!("Running {} in {}", self, self.cwd.display());
        let status = Command::new(&self.program)
            .args(&self.args)
            .current_dir(&self.cwd)
            .status()
            .map_err(|source| GradleError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(GradleError::Failed {
                program: self.program.clone(),
                status,
            })
        }
    }
}

impl fmt::Display for GradleCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

fn wrapper_program() -> String {
    if cfg!(target_os = "windows") {
        WRAPPER.to_string()
    } else {
        format!("./{WRAPPER}")
    }
}

fn file_dir(file: &Path) -> PathBuf {
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Nearest directory at or above `start` containing a Gradle wrapper
pub fn find_wrapper_dir(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(WRAPPER).is_file())
        .map(Path::to_path_buf)
}

/// Nearest directory at or above `start` containing a build or settings script
pub fn find_project_dir(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| BUILD_FILES.iter().any(|name| dir.join(name).is_file()))
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("app/src/test/kotlin/demo");
        fs::create_dir_all(&src).unwrap();
        let file = src.join("FooTest.kt");
        fs::write(&file, "package demo\n").unwrap();
        (temp, file)
    }

    #[test]
    fn test_wrapper_wins() {
        let (temp, file) = project();
        fs::write(temp.path().join(WRAPPER), "").unwrap();
        fs::write(temp.path().join("app/build.gradle.kts"), "").unwrap();

        let command = GradleCommand::test(&file, "demo.FooTest");
        assert_eq!(command.program, wrapper_program());
        assert_eq!(command.cwd, temp.path());
        assert_eq!(command.args, vec!["test", "--tests", "demo.FooTest"]);
    }

    #[test]
    fn test_falls_back_to_build_script_dir() {
        let (temp, file) = project();
        fs::write(temp.path().join("app/build.gradle"), "").unwrap();

        let command = GradleCommand::test(&file, "demo.FooTest.works");
        assert_eq!(command.program, "gradle");
        assert_eq!(command.cwd, temp.path().join("app"));
        assert_eq!(
            command.to_string(),
            "gradle test --tests demo.FooTest.works"
        );
    }

    #[test]
    fn test_falls_back_to_file_dir() {
        let (_temp, file) = project();
        let command = GradleCommand::test(&file, "demo.FooTest");
        // Nothing above the temp dir is expected to hold a build script
        assert_eq!(command.cwd, file.parent().unwrap());
        assert_eq!(command.program, "gradle");
    }

    #[test]
    fn test_bare_file_name_uses_current_dir() {
        assert_eq!(file_dir(Path::new("Foo.kt")), PathBuf::from("."));
    }

    #[test]
    fn test_spawn_failure_is_reported() {
        let command = GradleCommand {
            program: "ktmode-no-such-program".into(),
            args: vec![],
            cwd: PathBuf::from("."),
        };
        let err = command.run().unwrap_err();
        assert!(matches!(err, GradleError::Spawn { .. }));
        assert!(err.to_string().contains("ktmode-no-such-program"));
    }
}
