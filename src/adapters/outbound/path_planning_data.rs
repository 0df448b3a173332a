use std::path::{Path, PathBuf};
use std::env;
use std::fs;
use std::io::Read;
use crate::domains::path_planning::ports::MapSource;
use crate::domains::path_planning::types::{Obstacle, Point, Workspace};
use crate::common::{DomainError, DomainResult};

pub const DATA_DIR_ENV: &str = "VISIBILITY_PLANNER_DATA_DIR";

/// Map files read from a base directory.
///
/// Base resolution when none is given: `VISIBILITY_PLANNER_DATA_DIR`, then
/// `./resources/maps` when it exists, then the working directory.
pub struct FilesystemDataSource {
    base: PathBuf,
}

impl FilesystemDataSource {
    pub fn new(base: Option<PathBuf>) -> Self {
        let base = base.unwrap_or_else(|| {
            if let Ok(v) = env::var(DATA_DIR_ENV) {
                PathBuf::from(v)
            } else {
                let cwd_default = Path::new("resources/maps");
                if cwd_default.exists() { cwd_default.to_path_buf() } else { PathBuf::from(".") }
            }
        });
        Self { base }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Parse the line-oriented map format.
    ///
    /// Blank lines and `#` comments are ignored. The significant lines are:
    /// start `x y`, goal `x y`, obstacle count, then for every obstacle a
    /// corner count followed by that many `x y` lines.
    pub fn parse_map(text: &str) -> DomainResult<Workspace> {
        let lines: Vec<(usize, &str)> = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'))
            .collect();

        if lines.len() < 3 {
            return Err(DomainError::MalformedMap {
                line: lines.last().map(|(n, _)| *n).unwrap_or(0),
                reason: "incomplete map: expected start, goal and obstacle count".to_string(),
            });
        }

        let start = parse_point(lines[0])?;
        let goal = parse_point(lines[1])?;
        let obstacle_count = parse_count(lines[2])?;

        // Every obstacle needs at least its corner-count line.
        if obstacle_count > lines.len() - 3 {
            return Err(DomainError::MalformedMap {
                line: lines[2].0,
                reason: format!(
                    "inconsistent obstacle count: declared {}, only {} lines follow",
                    obstacle_count,
                    lines.len() - 3
                ),
            });
        }

        let mut obstacles = Vec::with_capacity(obstacle_count);
        let mut cursor = 3;
        for _ in 0..obstacle_count {
            let Some(&count_line) = lines.get(cursor) else {
                return Err(DomainError::MalformedMap {
                    line: lines[2].0,
                    reason: format!("inconsistent obstacle count: declared {}, found {}", obstacle_count, obstacles.len()),
                });
            };
            let corner_count = parse_count(count_line)?;
            cursor += 1;

            if corner_count > lines.len() - cursor {
                return Err(DomainError::MalformedMap {
                    line: count_line.0,
                    reason: format!(
                        "inconsistent vertex count: declared {}, only {} lines follow",
                        corner_count,
                        lines.len() - cursor
                    ),
                });
            }

            let corners = lines[cursor..cursor + corner_count]
                .iter()
                .map(|&corner_line| parse_point(corner_line))
                .collect::<DomainResult<Vec<Point>>>()?;
            cursor += corner_count;
            obstacles.push(Obstacle::new(corners));
        }

        Ok(Workspace::new(start, goal, obstacles))
    }
}

fn parse_point((line, text): (usize, &str)) -> DomainResult<Point> {
    let coords = text
        .split_whitespace()
        .map(|token| {
            token.parse::<f64>().map_err(|_| DomainError::MalformedMap {
                line,
                reason: format!("'{}' is not a number", token),
            })
        })
        .collect::<DomainResult<Vec<f64>>>()?;

    Point::try_from(coords.as_slice()).map_err(|e| DomainError::MalformedMap {
        line,
        reason: e.to_string(),
    })
}

fn parse_count((line, text): (usize, &str)) -> DomainResult<usize> {
    text.parse::<usize>().map_err(|_| DomainError::MalformedMap {
        line,
        reason: format!("'{}' is not a count", text),
    })
}

impl MapSource for FilesystemDataSource {
    fn load_map_text(&self, name: &str) -> DomainResult<String> {
        let mut p = self.base.clone();
        p.push(name);
        let mut s = String::new();
        let mut f = fs::File::open(&p).map_err(|e| DomainError::InfrastructureError(format!("{}: {}", p.display(), e)))?;
        f.read_to_string(&mut s).map_err(|e| DomainError::InfrastructureError(format!("{}: {}", p.display(), e)))?;
        Ok(s)
    }

    fn load_workspace(&self, name: &str) -> DomainResult<Workspace> {
        let text = self.load_map_text(name)?;
        Self::parse_map(&text)
    }
}
