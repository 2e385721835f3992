use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::Builder;

pub struct LocalStorage;

impl LocalStorage {
    /// Atomic write: write a uniquely named sibling temp file, flush it to
    /// disk, then rename it over `path`. Readers observe either the previous
    /// file or the complete new one, and concurrent writers never share a
    /// temp file. The temp file is removed if any step fails.
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> io::Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut prefix = OsString::from(".");
        prefix.push(path.file_name().unwrap_or_default());
        prefix.push(".");

        let mut tmp = Builder::new()
            .prefix(&prefix)
            .suffix(".tmp")
            .tempfile_in(dir)?;
        tmp.write_all(contents.as_ref())?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    /// Reads the whole file. A missing file is `Ok(None)`, not an error:
    /// the first run of any front-end starts without one.
    pub fn read<P: AsRef<Path>>(path: P) -> io::Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}
