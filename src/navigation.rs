//! Jumping between a source file and its test
//!
//! Gradle projects keep `src/main/kotlin/<pkg>/Foo.kt` next to
//! `src/test/kotlin/<pkg>/FooTest.kt`. The counterpart is computed purely from
//! the path; whether it exists is up to the caller.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

const TEST_SUFFIX: &str = "Test";

/// Which side of the pair a path sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceSet {
    Main,
    Test,
}

impl SourceSet {
    fn dir_name(self) -> &'static str {
        match self {
            SourceSet::Main => "main",
            SourceSet::Test => "test",
        }
    }

    fn other(self) -> Self {
        match self {
            SourceSet::Main => SourceSet::Test,
            SourceSet::Test => SourceSet::Main,
        }
    }
}

/// The source set a Kotlin file belongs to, with the index of its
/// `main`/`test` component
fn locate(components: &[Component<'_>]) -> Option<(SourceSet, usize)> {
    components.windows(3).enumerate().rev().find_map(|(i, w)| {
        if w[0].as_os_str() != "src" || w[2].as_os_str() != "kotlin" {
            return None;
        }
        let set = match w[1].as_os_str().to_str()? {
            "main" => SourceSet::Main,
            "test" => SourceSet::Test,
            _ => return None,
        };
        Some((set, i + 1))
    })
}

/// Which source set `path` lives in, if any
pub fn source_set(path: &Path) -> Option<SourceSet> {
    let parent = path.parent()?;
    let components: Vec<_> = parent.components().collect();
    locate(&components).map(|(set, _)| set)
}

/// Test file for a source file, or source file for a test file
pub fn other_file(path: &Path) -> Option<PathBuf> {
    let ext = path.extension().and_then(OsStr::to_str)?;
    if ext != "kt" && ext != "kts" {
        return None;
    }
    let stem = path.file_stem().and_then(OsStr::to_str)?;
    let components: Vec<_> = path.parent()?.components().collect();
    let (set, index) = locate(&components)?;

    let stem = match set {
        SourceSet::Main => format!("{stem}{TEST_SUFFIX}"),
        SourceSet::Test => stem
            .strip_suffix(TEST_SUFFIX)
            .filter(|s| !s.is_empty())?
            .to_string(),
    };

    let mut out = PathBuf::new();
    for (i, component) in components.iter().enumerate() {
        if i == index {
            out.push(set.other().dir_name());
        } else {
            out.push(component.as_os_str());
        }
    }
    out.push(format!("{stem}.{ext}"));
    Some(out)
}
