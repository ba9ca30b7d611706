use crate::error::{Error, Result};
use log::info;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Post-hoc `.hic` build with juicer_tools `pre`
#[derive(Debug, Clone)]
pub struct JuicerPre {
    pub jar: PathBuf,
    pub threads: usize,
    pub fragment_map: Option<PathBuf>,
    pub merged_nodups: PathBuf,
    pub hic_output: PathBuf,
    pub chrom_sizes: PathBuf,
}

impl JuicerPre {
    pub fn command(&self) -> Command {
        let mut command = Command::new("java");
        command
            .arg("-jar")
            .arg(&self.jar)
            .arg("pre")
            .arg("-j")
            .arg(self.threads.to_string());
        if let Some(map) = &self.fragment_map {
            command.arg("-f").arg(map);
        }
        command
            .arg(&self.merged_nodups)
            .arg(&self.hic_output)
            .arg(&self.chrom_sizes);
        command
    }

    pub fn run(&self) -> Result<()> {
        let mut command = self.command();
        let rendered = format!("{:?}", command);
        info!("Building contact matrix: {}", rendered);

        let status = command.status().map_err(|e| Error::io(e, &self.jar))?;
        if !status.success() {
            return Err(Error::Downstream {
                command: rendered,
                code: status.code(),
            });
        }
        info!("Contact matrix written to {}", self.hic_output.display());
        Ok(())
    }
}

/// Default chrom.sizes location next to the `.hic` output
pub fn default_chrom_sizes_path(hic_output: &Path) -> PathBuf {
    let mut name = hic_output.as_os_str().to_owned();
    name.push(".chrom.sizes");
    PathBuf::from(name)
}
