//! Download helpers
//!
//! Streaming GETs that copy the body chunk by chunk and hand the running
//! byte count to a callback after every chunk.

use crate::core::output;
use crate::engine::FetchError;
use std::io::{Read, Write};
use std::path::Path;

/// An open streaming response.
pub struct Download {
    reader: Box<dyn Read + Send + Sync + 'static>,
    /// Declared `Content-Length`, or 0 when absent or unparsable.
    pub total: u64,
}

impl Download {
    /// Issue a GET for `url` without an overall timeout.
    ///
    /// A non-success status is an error.
    pub fn start(agent: &ureq::Agent, url: &str) -> Result<Self, FetchError> {
        output::debug(&format!("GET {}", url));

        let response = agent
            .get(url)
            .call()
            .map_err(|e| FetchError::from_ureq(url, e))?;

        let total = response
            .header("content-length")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(0);

        Ok(Self {
            reader: response.into_reader(),
            total,
        })
    }

    /// Copy the body into `writer`, calling `on_chunk(downloaded)` after each chunk.
    pub fn copy_to<W: Write>(
        mut self,
        writer: &mut W,
        chunk_size: usize,
        on_chunk: impl FnMut(u64),
    ) -> Result<u64, FetchError> {
        let downloaded = copy_chunked(&mut self.reader, writer, chunk_size, on_chunk)?;
        Ok(downloaded)
    }

    /// Stream the body into a new file at `dest`, replacing any existing file.
    pub fn save_to(
        self,
        dest: &Path,
        chunk_size: usize,
        on_chunk: impl FnMut(u64),
    ) -> Result<u64, FetchError> {
        let mut file = std::fs::File::create(dest)?;
        let downloaded = self.copy_to(&mut file, chunk_size, on_chunk)?;
        file.flush()?;
        Ok(downloaded)
    }

    /// Accumulate the whole body in memory.
    pub fn into_bytes(
        self,
        chunk_size: usize,
        on_chunk: impl FnMut(u64),
    ) -> Result<Vec<u8>, FetchError> {
        let mut buffer = Vec::with_capacity(self.total.min(64 * 1024 * 1024) as usize);
        self.copy_to(&mut buffer, chunk_size, on_chunk)?;
        Ok(buffer)
    }
}

/// Read `reader` to EOF in `chunk_size` pieces, writing each to `writer`.
///
/// Returns the total number of bytes copied.
pub fn copy_chunked<R: Read + ?Sized, W: Write + ?Sized>(
    reader: &mut R,
    writer: &mut W,
    chunk_size: usize,
    mut on_chunk: impl FnMut(u64),
) -> std::io::Result<u64> {
    let mut buffer = vec![0u8; chunk_size.max(1)];
    let mut downloaded = 0u64;

    loop {
        let bytes_read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };

        writer.write_all(&buffer[..bytes_read])?;
        downloaded += bytes_read as u64;
        on_chunk(downloaded);
    }

    Ok(downloaded)
}
