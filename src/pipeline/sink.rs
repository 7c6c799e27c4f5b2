use serde::Serialize;
use std::convert::Infallible;
use std::io::Write;

use crate::record::LineRecord;

/// Receives decorated lines in increasing line order
pub trait LineSink {
    type Error;

    fn accept(&mut self, record: LineRecord) -> Result<(), Self::Error>;
}

impl LineSink for Vec<LineRecord> {
    type Error = Infallible;

    fn accept(&mut self, record: LineRecord) -> Result<(), Self::Error> {
        self.push(record);
        Ok(())
    }
}

/// Drops every record, for runs that only need the file summary
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl LineSink for NullSink {
    type Error = Infallible;

    fn accept(&mut self, _record: LineRecord) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[derive(Serialize)]
struct Entry<'a> {
    path: &'a str,
    #[serde(flatten)]
    record: &'a LineRecord,
}

/// Writes one JSON object per line, tagged with the file path
pub struct JsonLinesSink<W: Write> {
    writer: W,
    path: String,
    pretty: bool,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W, path: impl Into<String>) -> Self {
        Self {
            writer,
            path: path.into(),
            pretty: false,
        }
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> LineSink for JsonLinesSink<W> {
    type Error = serde_json::Error;

    fn accept(&mut self, record: LineRecord) -> Result<(), Self::Error> {
        let entry = Entry {
            path: &self.path,
            record: &record,
        };
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &entry)?;
        } else {
            serde_json::to_writer(&mut self.writer, &entry)?;
        }
        self.writer.write_all(b"\n").map_err(serde_json::Error::io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_lines_output() {
        let mut sink = JsonLinesSink::new(Vec::new(), "src/a.rs");
        let mut record = LineRecord::new(1, "fn a() {}");
        record.highlighting = Some("0,2=k".to_string());

        sink.accept(record).unwrap();
        sink.accept(LineRecord::new(2, "")).unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            output,
            concat!(
                r#"{"path":"src/a.rs","line":1,"source":"fn a() {}","highlighting":"0,2=k"}"#,
                "\n",
                r#"{"path":"src/a.rs","line":2,"source":""}"#,
                "\n",
            )
        );
    }
}
