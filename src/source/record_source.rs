use crate::source::SourceError;
use std::io::{BufRead, BufReader, Cursor, ErrorKind, Read, Seek, SeekFrom};

const COUNT_BUFFER_SIZE: usize = 32 * 1024;

/// Restartable view over decrypted donation input.
///
/// The underlying content can be scanned any number of times: once to count
/// lines, and again to iterate records with the header line skipped.
pub struct RecordSource<R> {
    reader: R
}

impl RecordSource<Cursor<Vec<u8>>> {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self::new(Cursor::new(bytes))
    }
}

impl<R: Read + Seek> RecordSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Counts every line in the content, header included.
    ///
    /// A final line without a trailing newline still counts. On a read error
    /// the lines counted so far are returned inside the error.
    pub fn count_lines(&mut self) -> Result<usize, SourceError> {
        self.reader.seek(SeekFrom::Start(0)).map_err(SourceError::Rewind)?;

        let mut buffer = vec![0u8; COUNT_BUFFER_SIZE];
        let mut counted = 0;
        let mut last_byte = None;

        loop {
            match self.reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(read) => {
                    counted += buffer[..read].iter().filter(|&&byte| byte == b'\n').count();
                    last_byte = Some(buffer[read - 1]);
                }
                Err(error) if error.kind() == ErrorKind::Interrupted => continue,
                Err(source) => return Err(SourceError::PartialCount { counted, source })
            }
        }

        if matches!(last_byte, Some(byte) if byte != b'\n') {
            counted += 1;
        }

        Ok(counted)
    }

    /// Rewinds and returns the record lines that follow the header.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected, so
    /// one damaged line cannot hide the lines after it.
    pub fn records(&mut self) -> Result<Records<'_, R>, SourceError> {
        self.reader.seek(SeekFrom::Start(0)).map_err(SourceError::Rewind)?;

        let mut reader = BufReader::new(&mut self.reader);
        let mut header = Vec::new();

        reader.read_until(b'\n', &mut header).map_err(SourceError::Header)?;

        Ok(Records { reader, buffer: Vec::new() })
    }
}

/// Ordered record lines, blank lines skipped and line endings stripped.
pub struct Records<'a, R> {
    reader: BufReader<&'a mut R>,
    buffer: Vec<u8>
}

impl<R: Read> Iterator for Records<'_, R> {
    type Item = std::io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buffer.clear();

            match self.reader.read_until(b'\n', &mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&self.buffer);
                    let line = line.trim_end_matches(['\n', '\r']);

                    if !line.trim().is_empty() {
                        return Some(Ok(line.to_string()));
                    }
                }
                Err(error) => return Some(Err(error))
            }
        }
    }
}
