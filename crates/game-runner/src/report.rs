use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use board_engine::engine::{Score, Tile};
use log::info;
use serde::{Deserialize, Serialize};

/// Score needed for each point credited to the player.
pub const SCORE_PER_POINT: Score = 100;

/// Whole points earned by a final score; the remainder is dropped.
pub fn points_for(score: Score) -> u64 {
    score / SCORE_PER_POINT
}

/// Final numbers for one finished or abandoned game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub final_score: Score,
    pub points_earned: u64,
    pub highest_tile: Tile,
    pub moves: u64,
    pub won: bool,
}

/// Running totals across the games of one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Points {
    pub total: u64,
    pub high_score: Score,
}

impl Points {
    /// Credit one report. Games worth no points leave the totals untouched,
    /// high score included. Returns the points added.
    pub fn credit(&mut self, report: &ScoreReport) -> u64 {
        if report.points_earned == 0 {
            return 0;
        }
        self.total += report.points_earned;
        self.high_score = self.high_score.max(report.final_score);
        report.points_earned
    }
}

/// Receives final scores from a session (points accounting lives behind this).
pub trait ScoreSink {
    fn report_score(&mut self, report: &ScoreReport) -> Result<()>;
}

impl ScoreSink for Vec<ScoreReport> {
    fn report_score(&mut self, report: &ScoreReport) -> Result<()> {
        self.push(*report);
        Ok(())
    }
}

impl<S: ScoreSink + ?Sized> ScoreSink for Box<S> {
    fn report_score(&mut self, report: &ScoreReport) -> Result<()> {
        (**self).report_score(report)
    }
}

/// Logs each report at info level and keeps nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ScoreSink for LogSink {
    fn report_score(&mut self, report: &ScoreReport) -> Result<()> {
        info!(
            "Game finished: score {} ({} points), highest tile {}, {} moves{}",
            report.final_score,
            report.points_earned,
            report.highest_tile,
            report.moves,
            if report.won { " (won)" } else { "" }
        );
        Ok(())
    }
}

/// Append-only JSON-lines file: one serialized row per line.
pub struct JsonLines {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl JsonLines {
    /// Open `path` for appending, creating it and its parent directory if needed.
    pub fn append_to<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    /// Write one row and flush so a crash never leaves a partial line buffered.
    pub fn write_row<T: Serialize>(&mut self, row: &T) -> Result<()> {
        serde_json::to_writer(&mut self.writer, row)
            .with_context(|| format!("failed to encode row for {}", self.path.display()))?;
        self.writer.write_all(b"\n")?;
        self.writer
            .flush()
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreSink for JsonLines {
    fn report_score(&mut self, report: &ScoreReport) -> Result<()> {
        self.write_row(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample(score: Score) -> ScoreReport {
        ScoreReport {
            final_score: score,
            points_earned: points_for(score),
            highest_tile: 64,
            moves: 40,
            won: false,
        }
    }

    #[test]
    fn vec_sink_collects() {
        let mut sink: Vec<ScoreReport> = Vec::new();
        sink.report_score(&sample(10)).unwrap();
        sink.report_score(&sample(20)).unwrap();
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[1].final_score, 20);
    }

    #[test]
    fn json_lines_appends_across_opens() {
        let td = tempdir().unwrap();
        let path = td.path().join("scores").join("reports.jsonl");
        {
            let mut sink = JsonLines::append_to(&path).unwrap();
            sink.report_score(&sample(100)).unwrap();
        }
        {
            let mut sink = JsonLines::append_to(&path).unwrap();
            assert_eq!(sink.path(), path.as_path());
            sink.report_score(&sample(200)).unwrap();
        }
        let text = std::fs::read_to_string(&path).unwrap();
        let rows: Vec<ScoreReport> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(rows, vec![sample(100), sample(200)]);
    }

    #[test]
    fn points_round_down_per_hundred() {
        assert_eq!(points_for(0), 0);
        assert_eq!(points_for(99), 0);
        assert_eq!(points_for(100), 1);
        assert_eq!(points_for(250), 2);
    }

    #[test]
    fn points_credit_skips_pointless_games() {
        let mut points = Points::default();
        assert_eq!(points.credit(&sample(99)), 0);
        assert_eq!(points, Points::default());

        assert_eq!(points.credit(&sample(250)), 2);
        assert_eq!(points.credit(&sample(100)), 1);
        assert_eq!(points.total, 3);
        assert_eq!(points.high_score, 250);

        points.credit(&sample(99));
        assert_eq!(points.total, 3);
        assert_eq!(points.high_score, 250);
    }

    #[test]
    fn boxed_sink_forwards() {
        let mut sink: Box<dyn ScoreSink> = Box::new(LogSink);
        sink.report_score(&sample(4)).unwrap();
    }
}
