//! Sequential byte reader
//!
//! Reads the target file front to back in fixed-size chunks and hands out one
//! byte at a time. There is no seeking; a source is consumed exactly once.

use crate::{Result, SpectoneError};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// Buffered, forward-only byte stream
#[derive(Debug)]
pub struct ByteSource<R: Read = File> {
    reader: BufReader<R>,
    position: u64,
}

impl ByteSource<File> {
    /// Open a file for reading.
    ///
    /// A missing file is reported as [`SpectoneError::FileNotFound`] so callers
    /// can tell it apart from other I/O failures.
    pub fn open<P: AsRef<Path>>(path: P, chunk_size: usize) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => SpectoneError::FileNotFound(path.to_path_buf()),
            _ => SpectoneError::Io(e),
        })?;
        Ok(Self::from_reader(file, chunk_size))
    }
}

impl<R: Read> ByteSource<R> {
    /// Wrap any reader
    pub fn from_reader(reader: R, chunk_size: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(chunk_size.max(1), reader),
            position: 0,
        }
    }

    /// Next byte, or `None` at end of stream
    pub fn next_byte(&mut self) -> Result<Option<u8>> {
        loop {
            let buf = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            let Some(&byte) = buf.first() else {
                return Ok(None);
            };
            self.reader.consume(1);
            self.position += 1;
            return Ok(Some(byte));
        }
    }

    /// Number of bytes handed out so far
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Drain the rest of the stream into memory
    pub fn read_remaining(&mut self) -> Result<Vec<u8>> {
        let mut rest = Vec::new();
        self.reader.read_to_end(&mut rest)?;
        self.position += rest.len() as u64;
        Ok(rest)
    }
}

impl<R: Read> Iterator for ByteSource<R> {
    type Item = Result<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_byte().transpose()
    }
}
