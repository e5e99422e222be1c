use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use super::CloseHandle;
use crate::error;

/// Local file source
#[derive(Debug)]
pub(crate) struct LocalSource {
    file: File,
    path: String,
    close: CloseHandle,
}

impl LocalSource {
    /// Open `path` and report its length
    pub(crate) fn open(path: &str, close: CloseHandle) -> crate::Result<(Self, Option<u64>)> {
        let file = File::open(Path::new(path))
            .map_err(|e| error::transport(e).with_location(path))?;
        let total_size = file.metadata().ok().map(|meta| meta.len());

        tracing::debug!(
            target: "mrf_index::transport",
            path,
            total_size,
            "Opened local source"
        );

        Ok((
            Self {
                file,
                path: path.to_string(),
                close,
            },
            total_size,
        ))
    }
}

impl Read for LocalSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.close.check()?;
        self.file.read(buf).map_err(|e| {
            if e.kind() == io::ErrorKind::Interrupted {
                e
            } else {
                error::transport(e).with_location(self.path.as_str()).into_io()
            }
        })
    }
}
