//! In-memory EPUB container
//!
//! An EPUB is a ZIP archive whose first entry is an uncompressed `mimetype`
//! file. The package keeps every file in memory, keyed by its path inside
//! the container, and can be written either as a `.epub` archive or as an
//! expanded directory tree.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{Read, Seek, Write};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::read::ZipArchive;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;

use crate::error::{EpubError, Result};

/// Path of the mimetype entry
pub const MIMETYPE_PATH: &str = "mimetype";
/// Contents of the mimetype entry
pub const MIMETYPE: &str = "application/epub+zip";

/// Represents the files of an EPUB container
#[derive(Debug, Default, Clone)]
pub struct EpubPackage {
    /// All files in the container, keyed by path
    files: BTreeMap<String, Vec<u8>>,
}

impl EpubPackage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open and unpack an `.epub` file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Create from any reader that implements Read + Seek
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut files = BTreeMap::new();

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let name = file.name().to_string();

            // Skip directories
            if name.ends_with('/') {
                continue;
            }

            let mut contents = Vec::new();
            file.read_to_end(&mut contents)?;
            files.insert(name, contents);
        }

        Ok(Self { files })
    }

    /// Get a file's contents by path
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(|v| v.as_slice())
    }

    /// Get a file's contents as a string
    pub fn get_string(&self, path: &str) -> Option<String> {
        self.files
            .get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// All paths, in sorted order
    pub fn file_list(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Set or update a file's contents
    pub fn set(&mut self, path: impl Into<String>, contents: Vec<u8>) {
        self.files.insert(path.into(), contents);
    }

    /// Set a file's contents from a string
    pub fn set_string(&mut self, path: impl Into<String>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into().into_bytes());
    }

    /// Check that every XML-based file parses as well-formed XML
    pub fn check_xml(&self) -> Result<()> {
        for (path, contents) in &self.files {
            if !is_xml_path(path) {
                continue;
            }
            let mut reader = Reader::from_reader(contents.as_slice());
            let mut buf = Vec::new();
            loop {
                match reader.read_event_into(&mut buf) {
                    Ok(Event::Eof) => break,
                    Ok(_) => {}
                    Err(source) => {
                        return Err(EpubError::Xml {
                            path: path.clone(),
                            source,
                        })
                    }
                }
                buf.clear();
            }
        }
        Ok(())
    }

    /// Write the package as an `.epub` file
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_to(file)
    }

    /// Write the package as a ZIP archive to any writer.
    ///
    /// `mimetype` is written first and stored uncompressed; every other
    /// entry follows in sorted order, deflated.
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let mimetype = self
            .get(MIMETYPE_PATH)
            .ok_or_else(|| EpubError::MissingFile(MIMETYPE_PATH.to_string()))?;
        zip.start_file(MIMETYPE_PATH, stored)?;
        zip.write_all(mimetype)?;

        for (path, contents) in self.files.iter().filter(|(p, _)| *p != MIMETYPE_PATH) {
            zip.start_file(path.as_str(), deflated)?;
            zip.write_all(contents)?;
        }

        zip.finish()?;
        Ok(())
    }

    /// Write every file below `dir`, creating directories as needed
    pub fn write_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        for (path, contents) in &self.files {
            let target = dir.join(path);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, contents)?;
        }
        Ok(())
    }
}

fn is_xml_path(path: &str) -> bool {
    [".xhtml", ".opf", ".ncx", ".xml"]
        .iter()
        .any(|ext| path.ends_with(ext))
}
