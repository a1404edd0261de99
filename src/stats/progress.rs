use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const PROGRESS_HEADER: &str = "Generation,Fitness,Length,Moves";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub generation: u32,
    pub fitness: i64,
    pub length: usize,
    pub moves: usize,
}

impl ProgressRecord {
    pub fn to_csv(&self) -> String {
        format!(
            "{},{},{},{}",
            self.generation, self.fitness, self.length, self.moves
        )
    }
}

pub fn create_progress_path(directory: &str) -> PathBuf {
    let now: DateTime<Local> = Local::now();
    let filename = format!(
        "{}-snake-evolution-progress.csv",
        now.format("%Y-%m-%d-%H%M%S")
    );

    Path::new(directory).join(filename)
}

/// Append-only CSV log, synced to disk after every record.
pub struct ProgressLog {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl ProgressLog {
    pub fn create(directory: &str) -> Result<Self, Box<dyn std::error::Error>> {
        fs::create_dir_all(directory)?;
        Self::create_at(create_progress_path(directory))
    }

    pub fn create_at(path: PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let file = File::create(&path)?;
        let mut progress = Self {
            path,
            writer: BufWriter::new(file),
        };
        progress.write_line(PROGRESS_HEADER)?;

        log::info!("Writing progress to {:?}", progress.path);
        Ok(progress)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&mut self, record: &ProgressRecord) -> Result<(), Box<dyn std::error::Error>> {
        self.write_line(&record.to_csv())
    }

    fn write_line(&mut self, line: &str) -> Result<(), Box<dyn std::error::Error>> {
        writeln!(self.writer, "{}", line)?;
        self.writer.flush()?;
        self.writer.get_ref().sync_all()?;
        Ok(())
    }
}
