use crate::error::Result;
use crate::record::AlignmentRecord;

/// Group a record stream by read name.
///
/// Records sharing a name must be contiguous in the input (name-grouped
/// BAM); the stream is never re-sorted. A group is yielded as soon as a
/// record with a different name arrives, or at the end of input.
pub struct ReadGrouper<I> {
    records: I,
    current_group: Vec<AlignmentRecord>,
    finished: bool,
}

impl<I> ReadGrouper<I>
where
    I: Iterator<Item = Result<AlignmentRecord>>,
{
    pub fn new(records: I) -> Self {
        Self {
            records,
            current_group: Vec::new(),
            finished: false,
        }
    }

    /// Get the next group of records with the same read name
    pub fn next_group(&mut self) -> Result<Option<Vec<AlignmentRecord>>> {
        if self.finished {
            return Ok(None);
        }

        loop {
            match self.records.next() {
                None => {
                    self.finished = true;
                    if self.current_group.is_empty() {
                        return Ok(None);
                    }
                    return Ok(Some(std::mem::take(&mut self.current_group)));
                }
                Some(Err(e)) => {
                    self.finished = true;
                    return Err(e);
                }
                Some(Ok(record)) => {
                    let same_name = self
                        .current_group
                        .first()
                        .map_or(true, |first| first.name == record.name);

                    if same_name {
                        self.current_group.push(record);
                    } else {
                        let group = std::mem::replace(&mut self.current_group, vec![record]);
                        return Ok(Some(group));
                    }
                }
            }
        }
    }
}

impl<I> Iterator for ReadGrouper<I>
where
    I: Iterator<Item = Result<AlignmentRecord>>,
{
    type Item = Result<Vec<AlignmentRecord>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_group().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn named(name: &str) -> Result<AlignmentRecord> {
        Ok(AlignmentRecord {
            name: name.to_string(),
            ..Default::default()
        })
    }

    fn names(group: &[AlignmentRecord]) -> Vec<&str> {
        group.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_groups_contiguous_names() {
        let input = vec![named("a"), named("a"), named("b"), named("c"), named("c"), named("c")];
        let groups: Vec<_> = ReadGrouper::new(input.into_iter())
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(groups.len(), 3);
        assert_eq!(names(&groups[0]), vec!["a", "a"]);
        assert_eq!(names(&groups[1]), vec!["b"]);
        assert_eq!(names(&groups[2]), vec!["c", "c", "c"]);
    }

    #[test]
    fn test_non_contiguous_names_are_separate_groups() {
        let input = vec![named("a"), named("b"), named("a")];
        let groups: Vec<_> = ReadGrouper::new(input.into_iter())
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(groups.len(), 3);
    }

    #[test]
    fn test_empty_input() {
        let mut grouper = ReadGrouper::new(std::iter::empty::<Result<AlignmentRecord>>());
        assert!(grouper.next_group().unwrap().is_none());
        assert!(grouper.next_group().unwrap().is_none());
    }

    #[test]
    fn test_error_stops_grouping() {
        let input = vec![
            named("a"),
            Err(Error::Record("truncated".to_string())),
            named("b"),
        ];
        let mut grouper = ReadGrouper::new(input.into_iter());
        assert!(grouper.next_group().is_err());
        assert!(grouper.next_group().unwrap().is_none());
    }
}
