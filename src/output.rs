use crate::classifier::EndPair;
use crate::endpoint::Endpoint;
use crate::error::{Error, Result};
use crate::fragment::FragmentMap;
use crate::stats::StatsSummary;
use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

/// Sort keys expected by contact-matrix builders reading merged_nodups
pub const MERGED_NODUPS_SORT_KEYS: &str = "-k2,2d -k6,6d -k4,4n -k8,8n -k1,1n -k5,5n -k3,3n";

/// Format one merged_nodups line (newline-terminated):
/// `strand1 chr1 pos1 frag1 strand2 chr2 pos2 frag2 mapq1 cigar1 seq1 mapq2 cigar2 seq2 name1 name2`
pub fn merged_nodups_line(pair: &EndPair<'_>, fragments: Option<&FragmentMap>) -> Result<String> {
    let (frag1, frag2) = match fragments {
        Some(map) => (
            map.fragment_number(pair.first.contig, pair.first.position)?,
            map.fragment_number(pair.second.contig, pair.second.position)?,
        ),
        None => (0, 1),
    };

    let (a, b) = (&pair.first, &pair.second);
    Ok(format!(
        "{} {} {} {} {} {} {} {} {} {} {} {} {} {} {} {}\n",
        a.record.strand_flag(),
        a.contig,
        a.position,
        frag1,
        b.record.strand_flag(),
        b.contig,
        b.position,
        frag2,
        a.record.mapq,
        a.record.cigar,
        sequence_field(a),
        b.record.mapq,
        b.record.cigar,
        sequence_field(b),
        a.record.name,
        b.record.name,
    ))
}

fn sequence_field<'a>(endpoint: &Endpoint<'a>) -> &'a str {
    if endpoint.record.sequence.is_empty() {
        "*"
    } else {
        &endpoint.record.sequence
    }
}

/// Destination of formatted merged_nodups lines
pub trait PairSink {
    fn write_line(&mut self, line: &str) -> Result<()>;

    /// Flush and wait until every written byte has been consumed
    fn finish(&mut self) -> Result<()>;
}

/// In-memory sink, keeps lines in production order
impl PairSink for Vec<String> {
    fn write_line(&mut self, line: &str) -> Result<()> {
        self.push(line.to_string());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Pipe lines through `sort | gzip` into the final output file.
///
/// Writes block when the sorter applies backpressure. `finish` closes the
/// pipe and waits for the shell pipeline to exit. The output path reaches
/// the shell as `$1`, never spliced into the script.
pub struct SortedGzipSink {
    command: String,
    output_path: PathBuf,
    child: Child,
    stdin: Option<BufWriter<ChildStdin>>,
    finished: bool,
}

impl SortedGzipSink {
    pub fn spawn<P: AsRef<Path>>(output_path: P) -> Result<Self> {
        let script = format!("sort {} | gzip -c > \"$1\"", MERGED_NODUPS_SORT_KEYS);
        Self::spawn_command(script, output_path.as_ref())
    }

    fn spawn_command(script: String, output_path: &Path) -> Result<Self> {
        let mut child = Command::new("bash")
            .arg("-c")
            .arg(&script)
            .arg("jooser")
            .arg(output_path)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| Error::io(e, output_path))?;

        let stdin = child.stdin.take().ok_or_else(|| {
            Error::io(
                io::Error::other("failed to capture stdin of the sort pipeline"),
                output_path,
            )
        })?;

        info!("Started output pipeline: {} ({})", script, output_path.display());
        Ok(Self {
            command: script,
            output_path: output_path.to_path_buf(),
            child,
            stdin: Some(BufWriter::new(stdin)),
            finished: false,
        })
    }

    /// Close the pipe, reap the pipeline and report how it ended.
    /// A non-zero exit outranks the I/O error that revealed it.
    fn close_and_wait(&mut self, write_error: Option<io::Error>) -> Result<()> {
        drop(self.stdin.take());
        let status = self
            .child
            .wait()
            .map_err(|e| Error::io(e, &self.output_path))?;
        self.finished = true;
        info!("Output pipeline completed with status {:?}", status.code());

        if !status.success() {
            return Err(Error::Downstream {
                command: self.command.clone(),
                code: status.code(),
            });
        }
        match write_error {
            Some(source) => Err(Error::io(source, &self.output_path)),
            None => Ok(()),
        }
    }
}

impl PairSink for SortedGzipSink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        let Some(stdin) = self.stdin.as_mut() else {
            return Err(Error::io(
                io::Error::other("output pipeline already closed"),
                &self.output_path,
            ));
        };
        match stdin.write_all(line.as_bytes()) {
            Ok(()) => Ok(()),
            Err(e) => self.close_and_wait(Some(e)),
        }
    }

    fn finish(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        // dropping stdin after the flush sends EOF to sort
        let flushed = match self.stdin.as_mut() {
            Some(stdin) => stdin.flush(),
            None => Ok(()),
        };
        self.close_and_wait(flushed.err())
    }
}

impl Drop for SortedGzipSink {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        drop(self.stdin.take());
        match self.child.try_wait() {
            Ok(Some(_)) => {}
            Ok(None) => {
                let _ = self.child.kill();
                let _ = self.child.wait();
            }
            Err(_) => {
                let _ = self.child.kill();
            }
        }
        self.finished = true;
    }
}

/// Write statistics as pretty-printed JSON
pub fn write_stats<P: AsRef<Path>>(summary: &StatsSummary, output_path: P) -> Result<()> {
    let output_path: PathBuf = output_path.as_ref().to_path_buf();
    let file = File::create(&output_path).map_err(|e| Error::io(e, &output_path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, summary)?;
    writeln!(writer)
        .and_then(|_| writer.flush())
        .map_err(|e| Error::io(e, &output_path))
}
