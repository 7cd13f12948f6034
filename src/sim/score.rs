/// Running score and the persisted high score.
///
/// File format: a single decimal integer as the entire content.
/// A missing or corrupt file loads as "no prior high score" with a
/// warning; an unwritable destination warns once and the session
/// continues without persistence.

use std::fs;
use std::path::PathBuf;

pub struct ScoreTracker {
    score: u32,
    high_score: u32,
    path: PathBuf,
    /// Set after the first failed write so the warning fires only once.
    write_failed: bool,
}

impl ScoreTracker {
    pub fn load(path: PathBuf) -> Self {
        let high_score = match fs::read_to_string(&path) {
            Ok(text) => match text.trim().parse::<u32>() {
                Ok(v) => v,
                Err(_) => {
                    eprintln!(
                        "Warning: ignoring corrupt high score file {}",
                        path.display()
                    );
                    0
                }
            },
            Err(_) => 0, // no prior high score
        };
        ScoreTracker { score: 0, high_score, path, write_failed: false }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Add points to the running total. A new high score is persisted
    /// immediately with a synchronous overwrite.
    pub fn add_points(&mut self, points: u32) {
        self.score += points;
        if self.score > self.high_score {
            self.high_score = self.score;
            self.persist();
        }
    }

    fn persist(&mut self) {
        if self.write_failed {
            return;
        }
        let contents = self.high_score.to_string();
        let result = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => {
                fs::create_dir_all(dir).and_then(|_| fs::write(&self.path, &contents))
            }
            _ => fs::write(&self.path, &contents),
        };
        if let Err(e) = result {
            eprintln!(
                "Warning: could not save high score to {}: {e}",
                self.path.display()
            );
            eprintln!("Continuing without high score persistence.");
            self.write_failed = true;
        }
    }
}
