//! Player-facing combat text
//!
//! Every line lands in the `full` channel. Headline events (destructions,
//! withdrawals, surprises) also land in `summary`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::galaxy::Galaxy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogChannel {
    Full,
    Summary,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatLog {
    pub full: Vec<String>,
    pub summary: Vec<String>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blow-by-blow detail, full channel only
    pub fn detail(&mut self, line: impl Into<String>) {
        self.full.push(line.into());
    }

    /// Headline event, written to both channels
    pub fn headline(&mut self, line: impl Into<String>) {
        let line = line.into();
        self.summary.push(line.clone());
        self.full.push(line);
    }

    pub fn lines(&self, channel: LogChannel) -> &[String] {
        match channel {
            LogChannel::Full => &self.full,
            LogChannel::Summary => &self.summary,
        }
    }

    pub fn append(&mut self, other: &CombatLog) {
        self.full.extend(other.full.iter().cloned());
        self.summary.extend(other.summary.iter().cloned());
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.full.iter().any(|line| line.contains(needle))
    }

    pub fn is_empty(&self) -> bool {
        self.full.is_empty()
    }

    pub fn write_to<W: Write>(&self, channel: LogChannel, out: &mut W) -> std::io::Result<()> {
        for line in self.lines(channel) {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }
}

/// Write every species' combat log to `<dir>/<species>.full.log` and
/// `<dir>/<species>.summary.log`
///
/// Galaxy state is never touched here, so a failed write leaves the
/// battle results intact.
pub fn write_species_logs(galaxy: &Galaxy, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)?;

    for species in galaxy.species.values() {
        if species.log.is_empty() {
            continue;
        }
        let stem = species.name.to_lowercase().replace(char::is_whitespace, "_");

        for (channel, suffix) in [(LogChannel::Full, "full"), (LogChannel::Summary, "summary")] {
            let path = dir.join(format!("{}.{}.log", stem, suffix));
            let mut out = BufWriter::new(File::create(&path)?);
            species.log.write_to(channel, &mut out)?;
            out.flush()?;
        }
        tracing::debug!("Wrote combat log for SP {}", species.name);
    }

    Ok(())
}
