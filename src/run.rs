//! Run directory layout
//!
//! A simulation run is identified by a name. All of its files live in a
//! directory of that name next to the executable (never the invoking shell's
//! working directory): the sampled trajectory in `<name>_data.txt`, the
//! parameter sheet in `<name>_params.txt`, and the rendered plots prefixed
//! `plot_<name>_`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, TwoBodyError};

/// Path layout for a single named simulation run
#[derive(Debug, Clone)]
pub struct RunDir {
    name: String,
    dir: PathBuf,
}

impl RunDir {
    /// Resolve the run directory relative to the executable's location
    pub fn locate(name: &str) -> Result<Self> {
        let exe = env::current_exe()?;
        let base = exe.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(Self::at(&base, name))
    }

    /// Build the layout under an explicit base directory
    pub fn at(base: &Path, name: &str) -> Self {
        RunDir {
            name: name.to_string(),
            dir: base.join(name),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<dir>/<name>_data.txt`
    pub fn data_file(&self) -> PathBuf {
        self.dir.join(format!("{}_data.txt", self.name))
    }

    /// `<dir>/<name>_params.txt`
    pub fn params_file(&self) -> PathBuf {
        self.dir.join(format!("{}_params.txt", self.name))
    }

    /// `<dir>/plot_<name>_<suffix>.png`
    pub fn plot_file(&self, suffix: &str) -> PathBuf {
        self.dir.join(format!("plot_{}_{}.png", self.name, suffix))
    }

    /// Check that the run directory exists and is not empty.
    ///
    /// Both conditions are fatal, user-facing errors: nothing downstream can
    /// recover from a run that was never simulated.
    pub fn validate(&self) -> Result<()> {
        if !self.dir.is_dir() {
            return Err(TwoBodyError::RunDirMissing(self.dir.clone()));
        }
        if fs::read_dir(&self.dir)?.next().is_none() {
            return Err(TwoBodyError::RunDirEmpty(self.dir.clone()));
        }
        Ok(())
    }

    /// Create the run directory for a fresh simulation.
    ///
    /// Refuses to reuse an existing directory unless `force` is set, so a
    /// finished run is never clobbered by accident.
    pub fn create(&self, force: bool) -> Result<()> {
        if self.dir.exists() && !force {
            return Err(TwoBodyError::RunExists(self.name.clone()));
        }
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }
}
