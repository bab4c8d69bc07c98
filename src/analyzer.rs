use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tracing::{debug, trace};

const CHUNK: usize = 8192;

/// Counts the lines in a file, falling back to 0 on any I/O failure.
///
/// Unreadable files (permission denied, removed mid-scan, directories,
/// broken links) under-count rather than abort the scan. The handle is
/// dropped before returning on every path.
pub fn count_lines(path: &Path) -> u64 {
    let counted = File::open(path).and_then(count_lines_in);
    match counted {
        Ok(n) => {
            trace!(path = %path.display(), lines = n, "counted");
            n
        }
        Err(err) => {
            debug!(path = %path.display(), error = %err, "unreadable file counted as 0 lines");
            0
        }
    }
}

/// Counts line records in a byte stream.
///
/// `\n`, `\r\n` and a lone `\r` each terminate one record. A trailing
/// unterminated record counts as a line only if it holds at least one
/// character that decodes as UTF-8; invalid sequences are dropped, never
/// reported.
///
/// # Errors
/// Returns an error if reading from the reader fails.
pub fn count_lines_in<R: Read>(mut reader: R) -> io::Result<u64> {
    let mut buf = vec![0u8; CHUNK];
    let mut lines: u64 = 0;
    let mut last: Option<u8> = None;
    // Undecided bytes of the open record, and whether it already holds a char.
    let mut tail: Vec<u8> = Vec::new();
    let mut tail_live = false;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        let chunk = &buf[..n];
        let mut open_from = 0;
        for i in memchr::memchr2_iter(b'\n', b'\r', chunk) {
            open_from = i + 1;
            tail.clear();
            tail_live = false;
            if chunk[i] == b'\r' {
                lines += 1;
                continue;
            }
            // `\n` closes a record unless it completes a `\r\n` pair,
            // which may straddle the previous chunk.
            let prev = if i == 0 { last } else { Some(chunk[i - 1]) };
            if prev != Some(b'\r') {
                lines += 1;
            }
        }
        if !tail_live && open_from < n {
            tail.extend_from_slice(&chunk[open_from..]);
            tail_live = take_decodable(&mut tail);
        }
        last = chunk.last().copied();
    }
    if tail_live {
        lines += 1;
    }
    Ok(lines)
}

/// Reports whether `pending` holds a character that survives lossy
/// decoding. When it does not, only an incomplete trailing sequence is
/// kept so a later chunk can finish it.
fn take_decodable(pending: &mut Vec<u8>) -> bool {
    let mut start = 0;
    loop {
        match std::str::from_utf8(&pending[start..]) {
            Ok(s) => {
                let found = !s.is_empty();
                pending.clear();
                return found;
            }
            Err(e) if e.valid_up_to() > 0 => {
                pending.clear();
                return true;
            }
            Err(e) => match e.error_len() {
                Some(bad) => start += bad,
                None => {
                    pending.drain(..start);
                    return false;
                }
            },
        }
    }
}
