//! minizip `unz64local_getShort`.

use std::collections::VecDeque;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use focalcheck_core::zip::{UNZ_EOF, UNZ_ERRNO, UNZ_OK, ZipStream, get_short};

use crate::check::CheckContext;
use crate::driver::{Scenario, Suite};
use crate::error::SetupError;
use crate::mock::{CallLog, Canned};
use crate::{expect_eq, expect_ne};

/// A stream serving scripted bytes with a scripted error flag.
#[derive(Debug)]
struct ScriptedStream {
    data: VecDeque<u8>,
    failed: Canned<bool>,
    reads: CallLog<usize>,
}

impl ScriptedStream {
    fn new(bytes: &[u8]) -> Self {
        Self {
            data: bytes.iter().copied().collect(),
            failed: Canned::new(false),
            reads: CallLog::new(),
        }
    }

    fn failing(bytes: &[u8]) -> Self {
        let stream = Self::new(bytes);
        stream.failed.set_fallback(true);
        stream
    }
}

impl ZipStream for ScriptedStream {
    fn read(&mut self, buf: &mut [u8]) -> usize {
        self.reads.record(buf.len());
        let n = buf.len().min(self.data.len());
        for (slot, byte) in buf.iter_mut().zip(self.data.drain(..n)) {
            *slot = byte;
        }
        n
    }

    fn error(&self) -> bool {
        self.failed.next()
    }
}

/// A stream over a real file, the way minizip's default `fopen` callbacks
/// read.
struct FileStream {
    file: File,
    failed: bool,
}

impl ZipStream for FileStream {
    fn read(&mut self, buf: &mut [u8]) -> usize {
        let mut filled = 0;
        while filled < buf.len() {
            match self.file.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(err) if err.kind() == std::io::ErrorKind::Interrupted => {}
                Err(_) => {
                    self.failed = true;
                    break;
                }
            }
        }
        filled
    }

    fn error(&self) -> bool {
        self.failed
    }
}

fn open_stream(path: &Path) -> Result<FileStream, SetupError> {
    let file =
        File::open(path).map_err(|e| SetupError::resource(path.display().to_string(), e))?;
    Ok(FileStream {
        file,
        failed: false,
    })
}

fn scratch_file(bytes: &[u8]) -> Result<PathBuf, SetupError> {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let path = std::env::temp_dir().join(format!(
        "focalcheck-zip-{}-{nanos}.bin",
        std::process::id()
    ));
    std::fs::write(&path, bytes)
        .map_err(|e| SetupError::resource(path.display().to_string(), e))?;
    Ok(path)
}

fn reads_little_endian(ctx: &mut CheckContext) -> Result<(), SetupError> {
    let mut stream = ScriptedStream::new(&[0x34, 0x12]);
    let mut x = 0u64;
    expect_eq!(ctx, get_short(&mut stream, &mut x), UNZ_OK);
    expect_eq!(ctx, x, 0x1234);
    expect_eq!(ctx, stream.reads.calls(), vec![2], "one two-byte read");

    let mut stream = ScriptedStream::new(&[0xFF, 0xFF]);
    expect_eq!(ctx, get_short(&mut stream, &mut x), UNZ_OK);
    expect_eq!(ctx, x, 0xFFFF, "no sign extension");
    Ok(())
}

fn short_read_with_error(ctx: &mut CheckContext) -> Result<(), SetupError> {
    let mut stream = ScriptedStream::failing(&[0x01]);
    let mut x = 0xDEAD_u64;
    expect_eq!(ctx, get_short(&mut stream, &mut x), UNZ_ERRNO);
    expect_eq!(ctx, x, 0, "value cleared on failure");
    Ok(())
}

fn short_read_at_eof(ctx: &mut CheckContext) -> Result<(), SetupError> {
    let mut stream = ScriptedStream::new(&[0x01]);
    let mut x = 0xBEEF_u64;
    let status = get_short(&mut stream, &mut x);
    expect_eq!(ctx, status, UNZ_EOF);
    expect_ne!(ctx, status, UNZ_ERRNO);
    expect_eq!(ctx, x, 0);
    Ok(())
}

fn empty_stream(ctx: &mut CheckContext) -> Result<(), SetupError> {
    let mut stream = ScriptedStream::new(&[]);
    let mut x = 7u64;
    expect_eq!(ctx, get_short(&mut stream, &mut x), UNZ_EOF);
    expect_eq!(ctx, x, 0);

    let mut stream = ScriptedStream::new(&[]);
    stream.failed.push(true);
    expect_eq!(ctx, get_short(&mut stream, &mut x), UNZ_ERRNO);
    Ok(())
}

fn sequential_reads(ctx: &mut CheckContext) -> Result<(), SetupError> {
    let mut stream = ScriptedStream::new(&[0x50, 0x4B, 0x03, 0x04, 0x14]);
    let mut values = Vec::new();
    let mut statuses = Vec::new();
    for _ in 0..3 {
        let mut x = 0u64;
        statuses.push(get_short(&mut stream, &mut x));
        values.push(x);
    }
    expect_eq!(ctx, values, vec![0x4B50, 0x0403, 0]);
    expect_eq!(ctx, statuses, vec![UNZ_OK, UNZ_OK, UNZ_EOF]);
    expect_eq!(ctx, stream.reads.count(), 3);
    Ok(())
}

fn reads_local_header_file(ctx: &mut CheckContext) -> Result<(), SetupError> {
    // local file header signature, version needed, one stray byte
    let path = scratch_file(&[0x50, 0x4B, 0x03, 0x04, 0x14, 0x00, 0x08])?;
    let mut stream = open_stream(&path)?;
    let mut fields = Vec::new();
    let mut status = UNZ_OK;
    while status == UNZ_OK && fields.len() < 4 {
        let mut x = 0u64;
        status = get_short(&mut stream, &mut x);
        fields.push((status, x));
    }
    let _ = std::fs::remove_file(&path);

    expect_eq!(
        ctx,
        fields,
        vec![(UNZ_OK, 0x4B50), (UNZ_OK, 0x0403), (UNZ_OK, 0x0014), (UNZ_EOF, 0)]
    );
    expect_eq!(ctx, stream.error(), false);
    Ok(())
}

pub fn suite() -> Suite {
    Suite {
        name: "zip_get_short",
        library: "minizip",
        focal: "unz64local_getShort",
        scenarios: vec![
            Scenario::new("reads_little_endian", "two bytes, low byte first", reads_little_endian),
            Scenario::new(
                "short_read_with_error",
                "a stream error gives UNZ_ERRNO",
                short_read_with_error,
            ),
            Scenario::new("short_read_at_eof", "a clean short read gives UNZ_EOF", short_read_at_eof),
            Scenario::new("empty_stream", "nothing to read", empty_stream),
            Scenario::new(
                "sequential_reads",
                "reads advance through the stream",
                sequential_reads,
            ),
            Scenario::new(
                "reads_local_header_file",
                "header fields read from a file on disk",
                reads_local_header_file,
            ),
        ],
    }
}
