//! Sample sinks

use std::io::{self, Write};

/// Destination for a numeric series, typically a plotter
pub trait SampleSink {
    /// Consume samples in order
    fn accept(&mut self, samples: &[f64]) -> io::Result<()>;
}

/// Writes one sample per line
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SampleSink for WriterSink<W> {
    fn accept(&mut self, samples: &[f64]) -> io::Result<()> {
        for sample in samples {
            writeln!(self.writer, "{}", sample)?;
        }
        self.writer.flush()
    }
}
