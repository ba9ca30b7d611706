use crate::cigar::{cigar_clips, cigar_to_string};
use crate::contigs::ContigTable;
use crate::error::{Error, Result};
use crate::record::{AlignmentRecord, DuplicateTag};
use log::warn;
use noodles::sam::alignment::record::data::field::Tag;
use noodles::sam::alignment::record_buf::data::field::Value;
use noodles::sam::alignment::RecordBuf;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Missing MAPQ (255 in SAM)
const MAPQ_UNAVAILABLE: u8 = 255;

/// Decoded records of a BAM file, in file order
pub struct BamRecords<R: BufRead> {
    reader: noodles::bam::io::Reader<R>,
    header: noodles::sam::Header,
    path: PathBuf,
    finished: bool,
    warned_missing_dt: bool,
}

/// Open a BAM file, returning its contig table and a record stream
pub fn open<P: AsRef<Path>>(path: P) -> Result<(ContigTable, BamRecords<impl BufRead>)> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::io(e, path))?;
    let mut reader = noodles::bam::io::Reader::new(BufReader::new(file));
    let header = reader.read_header().map_err(|e| Error::io(e, path))?;
    let contigs = ContigTable::from_header(&header);

    Ok((
        contigs,
        BamRecords {
            reader,
            header,
            path: path.to_path_buf(),
            finished: false,
            warned_missing_dt: false,
        },
    ))
}

impl<R: BufRead> Iterator for BamRecords<R> {
    type Item = Result<AlignmentRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let mut record = RecordBuf::default();
        match self.reader.read_record_buf(&self.header, &mut record) {
            Ok(0) => {
                self.finished = true;
                None
            }
            Ok(_) => {
                let decoded = decode_record(&record, &self.header);
                if let Ok(r) = &decoded {
                    if r.duplicate != DuplicateTag::None
                        && dt_value(&record).is_none()
                        && !self.warned_missing_dt
                    {
                        warn!(
                            "{}: duplicate flag without DT tag, counting as PCR duplicate",
                            r.name
                        );
                        self.warned_missing_dt = true;
                    }
                }
                Some(decoded)
            }
            Err(e) => {
                self.finished = true;
                Some(Err(Error::io(e, &self.path)))
            }
        }
    }
}

fn dt_value(record: &RecordBuf) -> Option<&[u8]> {
    match record.data().get(&Tag::new(b'D', b'T')) {
        Some(Value::String(s)) => {
            let bytes: &[u8] = s.as_ref();
            Some(bytes)
        }
        _ => None,
    }
}

/// Decode the fields the classifier needs from a noodles record
pub fn decode_record(record: &RecordBuf, header: &noodles::sam::Header) -> Result<AlignmentRecord> {
    let name = record
        .name()
        .map(|n| String::from_utf8_lossy(n).into_owned())
        .ok_or_else(|| Error::Record("alignment record without a read name".to_string()))?;

    let flags = record.flags();
    let contig = record
        .reference_sequence_id()
        .and_then(|id| header.reference_sequences().get_index(id))
        .map(|(contig_name, _)| contig_name.to_string());

    let start = record.alignment_start().map(|p| p.get() as u64).unwrap_or(0);
    let end = record
        .alignment_end()
        .map(|p| p.get() as u64)
        .unwrap_or(start);
    let (leading_clip, trailing_clip) = cigar_clips(record.cigar());

    let duplicate = if flags.is_duplicate() {
        DuplicateTag::from_dt(dt_value(record))
    } else {
        DuplicateTag::None
    };

    Ok(AlignmentRecord {
        name,
        contig,
        start,
        end,
        is_reverse: flags.is_reverse_complemented(),
        is_read1: flags.is_first_segment(),
        is_secondary: flags.is_secondary(),
        is_supplementary: flags.is_supplementary(),
        is_unmapped: flags.is_unmapped(),
        mapq: record
            .mapping_quality()
            .map(|q| q.get())
            .unwrap_or(MAPQ_UNAVAILABLE),
        leading_clip,
        trailing_clip,
        cigar: cigar_to_string(record.cigar()),
        duplicate,
        sequence: String::from_utf8_lossy(record.sequence().as_ref()).into_owned(),
    })
}
