//! Plain-text centroid listings.
//!
//! A listing is a sequence of frames, each introduced by an `ARRAY <i>` (or
//! `FRAME <i>`) header and followed by one `x y z [weight]` line per centroid.
//! This is the same layout [`crate::export::write_listing`] produces, so an
//! exported frame dump can be fed straight back in. Listings written by the
//! exporter carry no weight column; missing weights default to 1.
//!
//! Blank lines and lines starting with `#` are ignored.

use std::path::Path;

use crate::error::{Result, TrackError};
use crate::integration::source::CentroidSource;
use crate::tracker::Centroid;

const DEFAULT_WEIGHT: i64 = 1;

/// Parse headerless centroid lines, one frame's worth.
pub fn parse_frame(text: &str) -> Result<Vec<Centroid>> {
    let mut centroids = Vec::new();
    for (line_no, line) in numbered_lines(text) {
        if parse_header(line_no, line)?.is_some() {
            return Err(TrackError::Parse {
                line: line_no,
                message: "frame header in a single-frame file".to_string(),
            });
        }
        centroids.push(parse_record(line_no, line)?);
    }
    Ok(centroids)
}

/// Parse a multi-frame listing. Frame headers must count up from 0.
pub fn parse_listing(text: &str) -> Result<Vec<Vec<Centroid>>> {
    let mut frames: Vec<Vec<Centroid>> = Vec::new();
    for (line_no, line) in numbered_lines(text) {
        if let Some(index) = parse_header(line_no, line)? {
            if index != frames.len() {
                return Err(TrackError::MissingFrame {
                    expected: frames.len(),
                    found: index,
                });
            }
            frames.push(Vec::new());
            continue;
        }

        let record = parse_record(line_no, line)?;
        match frames.last_mut() {
            Some(frame) => frame.push(record),
            None => {
                return Err(TrackError::Parse {
                    line: line_no,
                    message: "centroid before the first frame header".to_string(),
                });
            }
        }
    }
    Ok(frames)
}

/// Non-empty, non-comment lines with their 1-based line numbers.
fn numbered_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

fn parse_header(line_no: usize, line: &str) -> Result<Option<usize>> {
    let mut tokens = line.split_whitespace();
    match tokens.next() {
        Some("ARRAY") | Some("FRAME") => {}
        _ => return Ok(None),
    }

    let index = tokens
        .next()
        .ok_or_else(|| TrackError::Parse {
            line: line_no,
            message: "frame header without an index".to_string(),
        })?
        .parse::<usize>()
        .map_err(|e| TrackError::Parse {
            line: line_no,
            message: format!("invalid frame index: {e}"),
        })?;

    if tokens.next().is_some() {
        return Err(TrackError::Parse {
            line: line_no,
            message: "trailing tokens after frame header".to_string(),
        });
    }
    Ok(Some(index))
}

fn parse_record(line_no: usize, line: &str) -> Result<Centroid> {
    let values = line
        .split_whitespace()
        .map(|tok| {
            tok.parse::<i64>().map_err(|_| TrackError::Parse {
                line: line_no,
                message: format!("invalid integer {tok:?}"),
            })
        })
        .collect::<Result<Vec<i64>>>()?;

    match values[..] {
        [x, y, z] => Centroid::try_from_signed(x, y, z, DEFAULT_WEIGHT),
        [x, y, z, weight] => Centroid::try_from_signed(x, y, z, weight),
        _ => Err(TrackError::Parse {
            line: line_no,
            message: format!("expected 3 or 4 values, found {}", values.len()),
        }),
    }
}

/// A multi-frame listing held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameListing {
    frames: Vec<Vec<Centroid>>,
}

impl FrameListing {
    /// Parse a listing from text.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(Self {
            frames: parse_listing(text)?,
        })
    }

    /// Read and parse a listing file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| TrackError::io(path, e))?;
        Self::parse(&text)
    }

    /// Get the parsed frames.
    pub fn frames(&self) -> &[Vec<Centroid>] {
        &self.frames
    }

    /// Consume the listing, returning its frames.
    pub fn into_frames(self) -> Vec<Vec<Centroid>> {
        self.frames
    }
}

impl CentroidSource for FrameListing {
    type Error = TrackError;

    fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn centroids(&mut self, frame: usize) -> Result<Vec<Centroid>> {
        self.frames.centroids(frame)
    }
}
