//! ktmode - Kotlin editing support from the command line

use std::fs;
use std::ops::Range;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;

use ktmode::cli::{CliArgs, Command, CursorPosition};
use ktmode::gradle::GradleCommand;
use ktmode::qualified::SymbolContext;
use ktmode::syntax::LanguageId;
use ktmode::tree::SyntaxTree;
use ktmode::{navigation, KotlinMode, ModeConfig};

/// One resolved span as printed by `highlight --json`
#[derive(Debug, Serialize)]
struct SpanRecord<'a> {
    start: usize,
    end: usize,
    line: usize,
    column: usize,
    tag: &'static str,
    text: &'a str,
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    ktmode::tracing::init();

    let config = match &args.config {
        Some(path) => ModeConfig::load_from(path),
        None => ModeConfig::load(),
    };

    match args.command {
        Command::Highlight {
            file,
            start,
            end,
            level,
            features,
            json,
        } => {
            let source = read_source(&file)?;
            let mut mode = KotlinMode::new(config);
            if let Some(features) = features {
                mode.set_features(features);
            } else if let Some(level) = level {
                let features = mode.rules().features_for_level(level);
                mode.set_features(features);
            }
            let range = start.unwrap_or(0)..end.unwrap_or(source.len());
            highlight(&mut mode, &file, &source, range, json)
        }
        Command::Indent { file, line } => {
            let source = read_source(&file)?;
            let mut mode = KotlinMode::new(config);
            let line = line.saturating_sub(1);
            match parse(&mut mode, &file, &source) {
                Some(tree) => println!("{}", mode.indent_line(&tree, line)),
                None => tracing::warn!("No indentation for {}", file.display()),
            }
            Ok(())
        }
        Command::Outline { file, json } => {
            let source = read_source(&file)?;
            let mut mode = KotlinMode::new(config);
            let Some(tree) = parse(&mut mode, &file, &source) else {
                return Ok(());
            };
            let groups = mode.outline(&tree).grouped();
            if json {
                println!("{}", serde_json::to_string_pretty(&groups)?);
            } else {
                for group in groups {
                    println!("{}", group.category);
                    for entry in group.entries {
                        println!(
                            "  {} {} {}:{}",
                            entry.kind.label(),
                            entry.qualified_name,
                            entry.line + 1,
                            entry.column + 1
                        );
                    }
                }
            }
            Ok(())
        }
        Command::Test {
            file,
            offset,
            line,
            class,
            dry_run,
        } => {
            let source = read_source(&file)?;
            let mut mode = KotlinMode::new(config);
            let Some(tree) = parse(&mut mode, &file, &source) else {
                return Ok(());
            };
            let Some(position) = CursorPosition::from_args(offset, line) else {
                bail!("either --offset or --line is required");
            };
            let offset = match position {
                CursorPosition::Offset(offset) => offset,
                CursorPosition::Line(line) => tree.line_bol(line),
            };

            let context = SymbolContext::at(&tree, offset);
            let target = if class {
                context.class_target()
            } else {
                context.function_target()
            };
            let target = match target {
                Ok(target) => target,
                Err(e) => {
                    tracing::warn!("Not running tests: {}", e);
                    return Ok(());
                }
            };

            let command = GradleCommand::test(&file, &target);
            if dry_run {
                println!("(cd {} && {})", command.cwd.display(), command);
                Ok(())
            } else {
                command.run()?;
                Ok(())
            }
        }
        Command::OtherFile { file } => match navigation::other_file(&file) {
            Some(other) => {
                if !other.exists() {
                    tracing::info!("{} does not exist yet", other.display());
                }
                println!("{}", other.display());
                Ok(())
            }
            None => bail!("{} has no source/test counterpart", file.display()),
        },
    }
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Parse a Kotlin file; anything else gets no analysis
fn parse(mode: &mut KotlinMode, path: &Path, source: &str) -> Option<SyntaxTree> {
    let language = LanguageId::from_path(path);
    if language != LanguageId::Kotlin {
        tracing::warn!("{} is {}, not Kotlin", path.display(), language.display_name());
        return None;
    }
    mode.parse(source)
}

fn highlight(
    mode: &mut KotlinMode,
    path: &Path,
    source: &str,
    range: Range<usize>,
    json: bool,
) -> Result<()> {
    let Some(tree) = parse(mode, path, source) else {
        if json {
            println!("[]");
        }
        return Ok(());
    };
    let spans = mode.highlight(&tree, range);

    let records: Vec<_> = spans
        .iter()
        .map(|span| SpanRecord {
            start: span.start,
            end: span.end,
            line: tree.line_of(span.start),
            column: tree.column_of(span.start),
            tag: span.name(),
            text: source.get(span.range()).unwrap_or(""),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        for record in records {
            println!(
                "{}:{} {}..{} {} {:?}",
                record.line + 1,
                record.column + 1,
                record.start,
                record.end,
                record.tag,
                record.text
            );
        }
    }
    Ok(())
}
