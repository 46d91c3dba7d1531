//! Text exports of trajectory sets.
//!
//! Two formats are supported:
//! - a coordinate listing: an `ARRAY <i>` header per group followed by one
//!   `x y z` line per centroid,
//! - a polyline mesh: every centroid as a `v` vertex line, then one `|` line
//!   per trajectory listing its 1-based vertex indices.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::info;

use crate::error::{Result, TrackError};
use crate::tracker::{Centroid, TrajectorySet};

/// Write groups of centroids (trajectories or raw frames) as a listing.
pub fn write_listing<'a, W, I, G>(mut out: W, groups: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a G>,
    G: AsRef<[Centroid]> + ?Sized + 'a,
{
    for (i, group) in groups.into_iter().enumerate() {
        writeln!(out, "ARRAY {i}")?;
        for c in group.as_ref() {
            writeln!(out, "{} {} {}", c.x, c.y, c.z)?;
        }
    }
    out.flush()
}

/// Write trajectories as vertices followed by one polyline per trajectory.
pub fn write_polylines<W: Write>(mut out: W, trajectories: &TrajectorySet) -> io::Result<()> {
    for t in trajectories {
        for c in t.centroids() {
            writeln!(out, "v {}.000000 {}.000000 {}.000000", c.x, c.y, c.z)?;
        }
    }

    let mut next_index = 1;
    for t in trajectories {
        write!(out, "|")?;
        for _ in 0..t.len() {
            write!(out, " {next_index}")?;
            next_index += 1;
        }
        writeln!(out)?;
    }
    out.flush()
}

/// Save trajectories as a coordinate listing.
pub fn save_listing(path: impl AsRef<Path>, trajectories: &TrajectorySet) -> Result<()> {
    let path = path.as_ref();
    info!("saving txt to {}", path.display());
    with_file(path, |out| write_listing(out, trajectories))
}

/// Save trajectories as a polyline mesh.
pub fn save_polylines(path: impl AsRef<Path>, trajectories: &TrajectorySet) -> Result<()> {
    let path = path.as_ref();
    info!("saving obj to {}", path.display());
    with_file(path, |out| write_polylines(out, trajectories))
}

/// Save unlinked per-frame centroids in the listing format.
pub fn save_frames_listing(path: impl AsRef<Path>, frames: &[Vec<Centroid>]) -> Result<()> {
    let path = path.as_ref();
    info!("saving frame listing to {}", path.display());
    with_file(path, |out| write_listing(out, frames))
}

fn with_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let file = File::create(path).map_err(|e| TrackError::io(path, e))?;
    let mut out = BufWriter::new(file);
    write(&mut out).map_err(|e| TrackError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::{TrackerConfig, reconstruct};

    fn c(x: u32, y: u32, z: u32) -> Centroid {
        Centroid::new(x, y, z, 1)
    }

    fn two_paths() -> TrajectorySet {
        // Lengths 3 and 2: the second object appears in frame 1.
        let frames = vec![
            vec![c(0, 0, 0)],
            vec![c(1, 0, 0), c(40, 40, 40)],
            vec![c(2, 0, 0), c(41, 40, 40)],
        ];
        reconstruct(&TrackerConfig::default(), &frames)
    }

    #[test]
    fn test_write_listing() {
        let mut buf = Vec::new();
        write_listing(&mut buf, &two_paths()).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "ARRAY 0\n0 0 0\n1 0 0\n2 0 0\nARRAY 1\n40 40 40\n41 40 40\n"
        );
    }

    #[test]
    fn test_write_polylines() {
        let mut buf = Vec::new();
        write_polylines(&mut buf, &two_paths()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "v 0.000000 0.000000 0.000000");
        assert_eq!(lines[3], "v 40.000000 40.000000 40.000000");
        assert_eq!(lines.iter().filter(|l| l.starts_with("v ")).count(), 5);
        assert_eq!(lines[5], "| 1 2 3");
        assert_eq!(lines[6], "| 4 5");
    }

    #[test]
    fn test_write_empty_set() {
        let mut buf = Vec::new();
        write_polylines(&mut buf, &TrajectorySet::default()).unwrap();
        assert!(buf.is_empty());
    }
}
