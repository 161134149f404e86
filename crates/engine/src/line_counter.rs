use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Number of lines in the file at `path`.
///
/// A final line without terminator counts as a line. An empty path, a missing
/// file or any read failure yields 0; callers cannot tell these apart. This
/// is a known imprecision of the project report and is kept on purpose so
/// the report output stays stable.
#[must_use]
pub fn count_lines(path: &Path) -> usize {
    if path.as_os_str().is_empty() {
        return 0;
    }
    let Ok(file) = File::open(path) else {
        return 0;
    };
    count_lines_in(&mut BufReader::new(file)).unwrap_or(0)
}

/// Count lines from a buffered reader.
///
/// # Errors
/// Returns the first read error.
pub fn count_lines_in<R: BufRead>(reader: &mut R) -> io::Result<usize> {
    let mut lines = 0;
    let mut last_byte: Option<u8> = None;

    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            break;
        }
        last_byte = buf.last().copied();
        lines += bytecount::count(buf, b'\n');

        let len = buf.len();
        reader.consume(len);
    }

    // 末尾に改行がない場合の行カウント補正
    if last_byte.is_some_and(|b| b != b'\n') {
        lines += 1;
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    #[test]
    fn test_terminated_and_unterminated_lines() {
        assert_eq!(count_lines_in(&mut Cursor::new("a\nb\nc\n")).unwrap(), 3);
        assert_eq!(count_lines_in(&mut Cursor::new("a\nb\nc")).unwrap(), 3);
        assert_eq!(count_lines_in(&mut Cursor::new("")).unwrap(), 0);
        assert_eq!(count_lines_in(&mut Cursor::new("\n\n")).unwrap(), 2);
    }

    #[test]
    fn test_crlf_counts_once() {
        assert_eq!(count_lines_in(&mut Cursor::new("a\r\nb\r\n")).unwrap(), 2);
    }

    #[test]
    fn test_count_lines_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "one\ntwo\nthree").unwrap();
        file.flush().unwrap();

        assert_eq!(count_lines(file.path()), 3);
    }

    #[test]
    fn test_empty_or_missing_path_is_zero() {
        assert_eq!(count_lines(Path::new("")), 0);
        assert_eq!(count_lines(Path::new("/no/such/file.cpp")), 0);
    }

    #[test]
    fn test_small_buffer_chunks() {
        let data = "x\n".repeat(1000) + "tail";
        let mut reader = BufReader::with_capacity(7, Cursor::new(data));
        assert_eq!(count_lines_in(&mut reader).unwrap(), 1001);
    }
}
