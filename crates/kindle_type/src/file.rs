use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;

use ahash::AHasher;

use crate::{BytePosition, Id, Store, span::Span};

pub type FileId = Id<SourceFile>;

impl FileId {
  /// Sentinel FileId for compiler-internal synthetic nodes.
  /// Uses u32::MAX to never collide with real file indices (which start at 0).
  pub const SYNTHETIC: FileId = FileId::new(u32::MAX);
}

#[derive(Default, Clone, Eq, PartialEq, Hash, Debug)]
pub struct SourceFile {
  pub path: PathBuf,
  pub text: String,
  pub line_starts: Vec<BytePosition>,
  pub hash: u64,
}

impl SourceFile {
  pub fn new(
    path: PathBuf,
    text: String,
  ) -> Self {
    let line_starts = compute_line_starts(&text);
    let hash = hash_text(&text);
    Self {
      path,
      text,
      line_starts,
      hash,
    }
  }

  #[inline]
  pub fn len_bytes(&self) -> u32 {
    self.text.len() as u32
  }
}

impl std::fmt::Display for Id<SourceFile> {
  fn fmt(
    &self,
    f: &mut std::fmt::Formatter<'_>,
  ) -> std::fmt::Result {
    write!(f, "(file id: {})", self.index())
  }
}

/// Script sources known to the compiler.
///
/// Scripts usually arrive as strings from the host rather than files on disk,
/// so every source is registered under a label (`<label>`) and deduplicated by
/// content hash.
#[derive(Default)]
pub struct SourceMap {
  files: Store<SourceFile>,
  by_hash: HashMap<u64, FileId>,
}

impl SourceMap {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn add_script(
    &mut self,
    label: &str,
    text: String,
  ) -> FileId {
    let file = SourceFile::new(PathBuf::from(format!("<{}>", label)), text);

    if let Some(id) = self.by_hash.get(&file.hash) {
      if self.files.get(id).text == file.text {
        return *id;
      }
    }

    let hash = file.hash;
    let id = self.files.alloc(file);
    self.by_hash.insert(hash, id);
    id
  }

  #[inline]
  pub fn get(
    &self,
    id: &FileId,
  ) -> &SourceFile {
    self.files.get(id)
  }

  pub fn line_col(
    &self,
    file: &FileId,
    pos: BytePosition,
  ) -> (u32, u32) {
    let f = self.get(file);
    let line = upper_bound_line(&f.line_starts, pos);
    let line_start = f.line_starts[line].0 as usize;
    let end = (pos.0 as usize).min(f.text.len());
    let col = unicode_column(&f.text.as_bytes()[line_start..end]);

    ((line as u32) + 1, (col as u32) + 1)
  }

  pub fn slice(
    &self,
    span: &Span,
  ) -> &str {
    let f = self.get(&span.file);
    &f.text[span.start.0 as usize..span.end.0 as usize]
  }
}

fn compute_line_starts(text: &str) -> Vec<BytePosition> {
  let mut v = Vec::with_capacity(16);
  v.push(BytePosition(0));

  for (i, b) in text.as_bytes().iter().enumerate() {
    if *b == b'\n' {
      v.push(BytePosition((i + 1) as u32));
    }
  }
  v
}

fn upper_bound_line(
  starts: &[BytePosition],
  pos: BytePosition,
) -> usize {
  let mut lo = 0usize;
  let mut hi = starts.len();
  while lo + 1 < hi {
    let mid = (lo + hi) / 2;
    if starts[mid].0 <= pos.0 { lo = mid } else { hi = mid }
  }
  lo
}

fn unicode_column(slice: &[u8]) -> usize {
  std::str::from_utf8(slice)
    .map(|s| s.chars().count())
    .unwrap_or(slice.len())
}

fn hash_text(text: &str) -> u64 {
  let mut h = AHasher::default();
  text.hash(&mut h);
  h.finish()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn line_col_is_one_based() {
    let mut sm = SourceMap::new();
    let file = sm.add_script("test", "Foo a = foo;\nreturn a?.b();".to_string());

    assert_eq!(sm.line_col(&file, BytePosition(0)), (1, 1));
    assert_eq!(sm.line_col(&file, BytePosition(13)), (2, 1));
    assert_eq!(sm.line_col(&file, BytePosition(21)), (2, 9));
  }

  #[test]
  fn identical_scripts_share_a_file() {
    let mut sm = SourceMap::new();
    let a = sm.add_script("a", "x".to_string());
    let b = sm.add_script("b", "x".to_string());
    let c = sm.add_script("c", "y".to_string());

    assert_eq!(a, b);
    assert_ne!(a, c);
  }

  #[test]
  fn slice_returns_span_text() {
    let mut sm = SourceMap::new();
    let file = sm.add_script("test", "a?.b()".to_string());
    let span = Span::new(file, BytePosition(1), BytePosition(6));

    assert_eq!(sm.slice(&span), "?.b()");
  }
}
