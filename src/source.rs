use std::{
    borrow::Cow,
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

/// Something that can hand out a readable text stream for a file.
///
/// The stream is owned by the caller and released when it is dropped.
pub trait StreamSource {
    type Reader: BufRead;

    fn open_for_read(&self, path: &Path) -> io::Result<Self::Reader>;
}

/// Reads articles straight from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl StreamSource for FsSource {
    type Reader = BufReader<File>;

    fn open_for_read(&self, path: &Path) -> io::Result<Self::Reader> {
        Ok(BufReader::new(File::open(path)?))
    }
}

impl<S: StreamSource + ?Sized> StreamSource for &S {
    type Reader = S::Reader;

    fn open_for_read(&self, path: &Path) -> io::Result<Self::Reader> {
        (**self).open_for_read(path)
    }
}

pub(crate) fn display_path(path: &Path) -> Cow<'_, str> {
    path.to_string_lossy()
}

/// File name including its extension, `None` when the path does not name a file.
pub(crate) fn base_name(path: &Path) -> Option<Cow<'_, str>> {
    path.file_name().map(|n| n.to_string_lossy())
}

/// Extension with its leading dot (`.md`), or empty.
pub(crate) fn extension(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_parts() {
        let p = Path::new("posts/2020-01-01-hello.md");
        assert_eq!(base_name(p).as_deref(), Some("2020-01-01-hello.md"));
        assert_eq!(extension(p), ".md");
        assert_eq!(display_path(p), "posts/2020-01-01-hello.md");
    }

    #[test]
    fn paths_without_file_name() {
        assert_eq!(base_name(Path::new("")), None);
        assert_eq!(base_name(Path::new("/")), None);
        assert_eq!(base_name(Path::new("a/..")), None);
    }

    #[test]
    fn no_extension() {
        assert_eq!(extension(Path::new("README")), "");
        assert_eq!(extension(Path::new(".hidden")), "");
    }

    #[test]
    fn fs_source_reports_missing_files() {
        let err = FsSource
            .open_for_read(Path::new("definitely/not/here.md"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
