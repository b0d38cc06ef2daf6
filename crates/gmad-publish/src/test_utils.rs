//! Shared helpers for publish tests

use gmad_formats::checksum::checksum;
use gmad_formats::gma::GmaBuilder;
use gmad_formats::source::{SourceArchive, SourceMember};
use std::io::Cursor;

/// Minimal in-memory source archive for building fixture packages.
pub(crate) struct TinySource {
    members: Vec<SourceMember>,
    contents: Vec<Vec<u8>>,
}

impl TinySource {
    pub(crate) fn new(entries: &[(&str, &[u8])]) -> Self {
        let members = entries
            .iter()
            .map(|(path, content)| SourceMember {
                path: (*path).to_string(),
                size: content.len() as u64,
                crc: checksum(content),
                is_dir: false,
            })
            .collect();
        let contents = entries.iter().map(|(_, content)| content.to_vec()).collect();
        Self { members, contents }
    }
}

impl SourceArchive for TinySource {
    fn members(&self) -> &[SourceMember] {
        &self.members
    }

    fn read_member(&mut self, path: &str) -> std::io::Result<Vec<u8>> {
        self.members
            .iter()
            .position(|member| member.path == path)
            .map(|index| self.contents[index].clone())
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, path.to_string()))
    }
}

/// A small finished package with known metadata: title "Jetpack", type
/// "tool", tags ["fun", "flight"], description "Fly".
pub(crate) fn sample_package() -> Vec<u8> {
    let mut source = TinySource::new(&[
        (
            "addon.json",
            br#"{"title":"Jetpack","type":"tool","tags":["fun","flight"],"description":"Fly"}"#,
        ),
        ("lua/jetpack.lua", b"-- lift off\n"),
    ]);
    let (cursor, _) = GmaBuilder::new(Cursor::new(Vec::new()))
        .with_timestamp(1_700_000_000)
        .write_archive(&mut source)
        .expect("encode should succeed");
    cursor.into_inner()
}
