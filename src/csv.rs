//! Utilities for working with CSV files.
//!
//! Fields containing a comma, a double quote or a line break are quoted on write, and
//! quoted fields may span lines on read. Records may differ in length.

use std::io;
use std::io::{Read, Write};

use ::csv::{ReaderBuilder, StringRecordsIntoIter, Terminator, WriterBuilder};

pub struct CsvWriter<W: Write> {
    writer: ::csv::Writer<W>,
}
impl<W: Write> CsvWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: WriterBuilder::new()
                .flexible(true)
                .terminator(Terminator::Any(b'\n'))
                .from_writer(writer),
        }
    }

    pub fn append<R>(&mut self, record: R) -> Result<(), io::Error>
    where
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        for datum in record {
            self.writer.write_field(datum.as_ref())?;
        }
        self.writer.write_record(None::<&[u8]>)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), io::Error> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> Result<W, io::Error> {
        self.writer.into_inner().map_err(|err| err.into_error())
    }
}

/// One record and the 1-based line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRecord {
    pub line: usize,
    pub fields: Vec<String>,
}

pub struct CsvReader<R: Read> {
    records: StringRecordsIntoIter<R>,
}
impl<R: Read> CsvReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            records: ReaderBuilder::new()
                .has_headers(false)
                .flexible(true)
                .from_reader(reader)
                .into_records(),
        }
    }

    pub fn read(&mut self) -> Option<Result<CsvRecord, io::Error>> {
        self.records.next().map(|record| {
            let record = record?;
            Ok(CsvRecord {
                line: record.position().map_or(0, |position| position.line() as usize),
                fields: record.iter().map(ToString::to_string).collect(),
            })
        })
    }
}

impl<R: Read> Iterator for CsvReader<R> {
    type Item = Result<CsvRecord, io::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(bytes: &[u8]) -> Vec<CsvRecord> {
        CsvReader::new(bytes).collect::<Result<_, _>>().unwrap()
    }

    #[test]
    fn write_then_read() {
        let mut writer = CsvWriter::new(vec![]);
        writer.append(["Home Team", "Away Team"]).unwrap();
        writer.append(["Brighton, Hove", "Leeds"]).unwrap();
        let bytes = writer.into_inner().unwrap();
        assert_eq!(
            "Home Team,Away Team\n\"Brighton, Hove\",Leeds\n",
            String::from_utf8(bytes.clone()).unwrap()
        );

        let fields: Vec<_> = read_all(&bytes).into_iter().map(|record| record.fields).collect();
        assert_eq!(
            vec![vec!["Home Team", "Away Team"], vec!["Brighton, Hove", "Leeds"]],
            fields
        );
    }

    #[test]
    fn quoted_fields_span_lines() {
        let mut writer = CsvWriter::new(vec![]);
        writer.append(["a", "b"]).unwrap();
        writer.append(["St\nPauli", "x\"y"]).unwrap();
        writer.append(["c", "d"]).unwrap();
        let records = read_all(&writer.into_inner().unwrap());
        assert_eq!(3, records.len());
        assert_eq!(vec!["St\nPauli", "x\"y"], records[1].fields);
        assert_eq!(2, records[1].line);
        assert_eq!(4, records[2].line);
    }

    #[test]
    fn ragged_records_and_crlf() {
        let records = read_all(b"a,b,,c\r\n62.50%,1.75\r\n");
        assert_eq!(vec!["a", "b", "", "c"], records[0].fields);
        assert_eq!(vec!["62.50%", "1.75"], records[1].fields);
    }
}
